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
//! World management
//!
//! The [`World`] owns the live bodies, the queue of bodies waiting to join
//! them, the runtime parameters and the single highlight slot.
//!
//! # Tick boundary
//!
//! New bodies never enter the live collection directly. They wait in a
//! pending buffer that [`World::tick`] drains in one move before any body is
//! integrated, so a body cannot take part in the force pass of the tick
//! during which it was created, and no body ever integrates against a
//! partially flushed collection.

mod params;

pub use params::{
    Setting, SimulationParams, GRAVITY_SCALE_RANGE, RESTITUTION_RANGE, RESTITUTION_STEP,
    TIME_SCALE_RANGE,
};

use crate::body::{Body, BodyId, BodyView, Color, Position};
use crate::config::{BodyConfig, PhysicsConfig, SimConfig};
use crate::error::ConfigError;
use crate::physics::{integrate_all, StepContext, StepStats};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The simulation world
///
/// # Examples
///
/// ```
/// use orb_sim::World;
/// use orb_sim::body::Color;
///
/// let mut world = World::new();
/// let id = world.enqueue_body(100.0, 100.0, Color::rgb(200, 40, 40));
/// assert_eq!(world.live_count(), 0);
///
/// world.tick(1.0 / 60.0);
/// assert_eq!(world.live_count(), 1);
/// assert_eq!(world.hit_test(100.0, 100.0), Some(id));
/// ```
pub struct World {
    live: Vec<Body>,
    pending: Vec<Body>,
    params: SimulationParams,
    setting: Setting,
    highlighted: Option<BodyId>,
    next_body_id: u64,
    tick_count: u64,
    body_config: BodyConfig,
    physics: PhysicsConfig,
    rng: StdRng,
}

impl World {
    /// Create an empty world with default configuration
    pub fn new() -> Self {
        Self::with_config(&SimConfig::default())
    }

    /// Create an empty world from a configuration
    ///
    /// The initial parameter levels are clamped to their ranges. Without a
    /// seed the random source is seeded from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if the config fails [`SimConfig::validate`]. Use
    /// [`try_with_config`](Self::try_with_config) for configs built from
    /// user input.
    pub fn with_config(config: &SimConfig) -> Self {
        match Self::try_with_config(config) {
            Ok(world) => world,
            Err(err) => panic!("Invalid simulation config: {}", err),
        }
    }

    /// Create an empty world from a configuration after validating it
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`SimConfig::validate`].
    pub fn try_with_config(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.world.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(World {
            live: Vec::new(),
            pending: Vec::new(),
            params: SimulationParams::new(
                config.world.time_scale,
                config.world.gravity_scale,
                config.world.restitution,
            ),
            setting: Setting::default(),
            highlighted: None,
            next_body_id: 0,
            tick_count: 0,
            body_config: config.body.clone(),
            physics: config.physics.clone(),
            rng,
        })
    }

    /// Queue a body with a random radius at the given position
    ///
    /// The body joins the live collection at the start of the next tick.
    pub fn enqueue_body(&mut self, x: f64, y: f64, color: Color) -> BodyId {
        let id = self.allocate_id();
        let body = Body::spawn(id, Position::new(x, y), color, &self.body_config, &mut self.rng);
        self.push_pending(body)
    }

    /// Queue a body with a random radius and a random color
    pub fn enqueue_random_body(&mut self, x: f64, y: f64) -> BodyId {
        let color = Color::random(&mut self.rng);
        self.enqueue_body(x, y, color)
    }

    /// Queue a body with an explicit radius
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not positive and finite.
    pub fn enqueue_body_with_radius(&mut self, x: f64, y: f64, radius: f64, color: Color) -> BodyId {
        let id = self.allocate_id();
        let body = Body::new(id, Position::new(x, y), radius, color, self.body_config.mass_model);
        self.push_pending(body)
    }

    /// Queue a body built by the caller from a freshly allocated id
    ///
    /// Useful for scenarios that need initial velocities.
    ///
    /// # Panics
    ///
    /// Panics if the returned body does not carry the allocated id.
    pub fn enqueue_with<F>(&mut self, build: F) -> BodyId
    where
        F: FnOnce(BodyId) -> Body,
    {
        let id = self.allocate_id();
        let body = build(id);
        assert_eq!(body.id(), id, "Body must use the allocated id");
        self.push_pending(body)
    }

    fn allocate_id(&mut self) -> BodyId {
        let id = BodyId::new(self.next_body_id);
        self.next_body_id += 1;
        id
    }

    fn push_pending(&mut self, body: Body) -> BodyId {
        let id = body.id();
        log::debug!(
            "{} orb created: {} {}",
            self.next_body_id,
            id,
            body.to_string().replace('\n', " ")
        );
        self.pending.push(body);
        id
    }

    /// Move every pending body into the live collection
    ///
    /// Returns the number of bodies that became live. Called by
    /// [`tick`](Self::tick); exposed for callers that drive the step
    /// themselves.
    pub fn flush_pending(&mut self) -> usize {
        let count = self.pending.len();
        self.live.append(&mut self.pending);
        count
    }

    /// Advance the simulation by one frame
    ///
    /// Flushes the pending queue, then integrates every live body with the
    /// frame delta `dt` (seconds) scaled by the current parameters. A
    /// negative or non-finite `dt` skips the integration but still flushes.
    pub fn tick(&mut self, dt: f64) -> StepStats {
        self.flush_pending();
        self.tick_count += 1;

        if !(dt >= 0.0 && dt.is_finite()) {
            log::warn!("Skipping integration for invalid frame delta {}", dt);
            return StepStats::default();
        }

        let ctx = StepContext::new(dt, &self.params, &self.physics);
        integrate_all(&mut self.live, &ctx)
    }

    /// Live bodies in collection order
    pub fn bodies(&self) -> &[Body] {
        &self.live
    }

    /// Read-only views of the live bodies for rendering
    pub fn live_bodies(&self) -> impl Iterator<Item = BodyView<'_>> + '_ {
        let highlighted = self.highlighted;
        self.live
            .iter()
            .map(move |body| BodyView::new(body, Some(body.id()) == highlighted))
    }

    /// Look up a live body
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.live.iter().find(|body| body.id() == id)
    }

    /// Number of live bodies
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of bodies waiting for the next tick
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of bodies ever created in this world
    pub fn created_count(&self) -> u64 {
        self.next_body_id
    }

    /// Number of ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Remove every live body
    ///
    /// Pending bodies are kept and still join at the next tick. The
    /// highlight slot is emptied. Returns the number of removed bodies.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.live.len();
        self.live.clear();
        self.highlighted = None;
        log::info!("Cleared {} orbs", removed);
        removed
    }

    /// Current parameter levels
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Physics profile this world runs with
    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Shift the time-scale exponent, clamped to [-4, 9]
    pub fn adjust_time_scale(&mut self, delta: i32) -> i32 {
        self.params.adjust_time_scale(delta)
    }

    /// Shift the gravity-scale exponent, clamped to [-4, 5]
    pub fn adjust_gravity_scale(&mut self, delta: i32) -> i32 {
        self.params.adjust_gravity_scale(delta)
    }

    /// Shift the restitution level, clamped to [0, 5]
    pub fn adjust_restitution(&mut self, delta: i32) -> i32 {
        self.params.adjust_restitution(delta)
    }

    /// Current UI selection
    pub fn setting(&self) -> Setting {
        self.setting
    }

    /// Change the UI selection
    pub fn select(&mut self, setting: Setting) {
        self.setting = setting;
    }

    /// Status line describing the current selection
    pub fn status_line(&self) -> String {
        self.setting.status(&self.params)
    }

    /// Route an up/down step to the parameter the selection names
    ///
    /// Returns the new level, or `None` when the selection has no level.
    pub fn adjust_selected(&mut self, delta: i32) -> Option<i32> {
        match self.setting {
            Setting::Speed => Some(self.adjust_time_scale(delta)),
            Setting::Gravity => Some(self.adjust_gravity_scale(delta)),
            Setting::Elasticity => Some(self.adjust_restitution(delta)),
            Setting::Unselected | Setting::View | Setting::Create => None,
        }
    }

    /// Set or clear the highlight slot
    ///
    /// `Some(id)` of a live body replaces any previous selection; `None`
    /// clears it. An id that is not live leaves the slot unchanged and
    /// returns `false`.
    pub fn highlight(&mut self, id: Option<BodyId>) -> bool {
        match id {
            Some(id) if self.body(id).is_none() => false,
            _ => {
                self.highlighted = id;
                true
            }
        }
    }

    /// Id in the highlight slot
    pub fn highlighted(&self) -> Option<BodyId> {
        self.highlighted
    }

    /// The highlighted live body, if any
    pub fn highlighted_body(&self) -> Option<&Body> {
        self.highlighted.and_then(|id| self.body(id))
    }

    /// First live body whose hit region contains the point
    pub fn hit_test(&self, x: f64, y: f64) -> Option<BodyId> {
        self.live
            .iter()
            .find(|body| body.hit_region_contains(x, y))
            .map(Body::id)
    }

    /// Highlight the body under the point, if there is one
    ///
    /// A miss keeps the current selection.
    pub fn select_at(&mut self, x: f64, y: f64) -> Option<BodyId> {
        let hit = self.hit_test(x, y);
        if hit.is_some() {
            self.highlight(hit);
        }
        hit
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
