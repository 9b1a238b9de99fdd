// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Frame pacing on a dedicated simulation thread
//!
//! The loop measures the real time elapsed since the previous frame, runs
//! one [`World::tick`] with it and then sleeps for a fixed interval. Drift in
//! the sleep only affects smoothness, never the physics, because the measured
//! delta is what gets integrated.
//!
//! The world is shared behind an [`RwLock`]. The loop holds the write lock
//! for exactly one tick; renderers and input handlers lock in between, so
//! every snapshot they see is a whole tick.

use crate::error::RunnerError;
use crate::world::World;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A world shared between the simulation thread and its collaborators
pub type SharedWorld = Arc<RwLock<World>>;

/// Wrap a world for sharing with a [`SimulationLoop`]
pub fn share(world: World) -> SharedWorld {
    Arc::new(RwLock::new(world))
}

/// Handle to a running simulation thread
///
/// Dropping the handle stops the thread and waits for it.
///
/// # Examples
///
/// ```no_run
/// use orb_sim::runner::{share, SimulationLoop};
/// use orb_sim::World;
/// use std::time::Duration;
///
/// let world = share(World::new());
/// let sim = SimulationLoop::spawn(world.clone(), Duration::from_millis(16)).unwrap();
///
/// world.write().unwrap().enqueue_random_body(400.0, 300.0);
/// std::thread::sleep(Duration::from_millis(100));
///
/// let frames = sim.join().unwrap();
/// assert!(frames > 0);
/// ```
pub struct SimulationLoop {
    handle: Option<JoinHandle<Result<(), RunnerError>>>,
    stop: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
}

impl SimulationLoop {
    /// Start ticking `world` every `interval`
    pub fn spawn(world: SharedWorld, interval: Duration) -> Result<Self, RunnerError> {
        Self::spawn_with_observer(world, interval, |_| {})
    }

    /// Start ticking `world` and call `observer` after every frame
    ///
    /// The observer runs on the simulation thread under the read lock; it is
    /// the place where a renderer would request a repaint.
    pub fn spawn_with_observer<F>(
        world: SharedWorld,
        interval: Duration,
        mut observer: F,
    ) -> Result<Self, RunnerError>
    where
        F: FnMut(&World) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let frames = Arc::new(AtomicU64::new(0));

        let thread_stop = Arc::clone(&stop);
        let thread_frames = Arc::clone(&frames);

        let handle = thread::Builder::new()
            .name("orb-sim".to_string())
            .spawn(move || -> Result<(), RunnerError> {
                log::info!("Simulation thread started ({:?} interval)", interval);
                let mut last = Instant::now();

                while !thread_stop.load(Ordering::Acquire) {
                    let now = Instant::now();
                    let dt = now.duration_since(last).as_secs_f64();
                    last = now;

                    {
                        let mut guard = world.write().map_err(|_| poisoned())?;
                        guard.tick(dt);
                    }
                    {
                        let guard = world.read().map_err(|_| poisoned())?;
                        observer(&guard);
                    }

                    thread_frames.fetch_add(1, Ordering::Relaxed);
                    thread::sleep(interval);
                }

                log::info!(
                    "Simulation thread stopped after {} frames",
                    thread_frames.load(Ordering::Relaxed)
                );
                Ok(())
            })?;

        Ok(SimulationLoop {
            handle: Some(handle),
            stop,
            frames,
        })
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Whether the thread is still ticking
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Ask the thread to stop after the current frame
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Stop the thread, wait for it and return the number of frames run
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Panicked`] if the thread panicked and
    /// [`RunnerError::LockPoisoned`] if it stopped on a poisoned lock.
    pub fn join(mut self) -> Result<u64, RunnerError> {
        self.stop();
        let result = match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| RunnerError::Panicked)?,
            None => Ok(()),
        };
        result.map(|()| self.frames())
    }
}

impl Drop for SimulationLoop {
    fn drop(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn poisoned() -> RunnerError {
    log::error!("World lock poisoned; stopping simulation thread");
    RunnerError::LockPoisoned
}
