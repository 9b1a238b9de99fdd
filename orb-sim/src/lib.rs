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
//! # Orb Sim
//!
//! The core of an interactive 2D N-body gravity simulator. Circular bodies
//! ("orbs") attract each other, drift under their accumulated velocity and
//! bounce off each other with impulse-based collision response.
//!
//! ## Features
//!
//! - **Pairwise Gravity**: O(n²) Newtonian attraction with an overlap clamp
//! - **Collision Response**: Tunable restitution plus positional correction
//! - **Runtime Parameters**: Time, gravity and elasticity levels as powers of ten
//! - **Tick Boundary**: New bodies join the simulation at the next tick only
//! - **Simulation Thread**: Optional fixed-cadence loop over a shared world
//! - **Configuration**: TOML profiles for body generation and physics
//!
//! Windowing, painting and input devices are left to the embedding
//! application. It feeds positions and key presses in and reads
//! [`World::live_bodies`] back out.
//!
//! ## Example
//!
//! ```rust
//! use orb_sim::World;
//! use orb_sim::body::Color;
//!
//! let mut world = World::new();
//! world.enqueue_body_with_radius(0.0, 0.0, 20.0, Color::rgb(255, 0, 0));
//! world.enqueue_body_with_radius(100.0, 0.0, 20.0, Color::rgb(0, 0, 255));
//!
//! world.adjust_gravity_scale(5);
//! world.tick(1.0 / 60.0);
//!
//! for view in world.live_bodies() {
//!     let pos = view.position();
//!     println!("{} at ({:.1}, {:.1})", view.id(), pos.x(), pos.y());
//! }
//! ```

#![warn(missing_docs)]

/// Bodies and their planar state
pub mod body;

/// Configuration profiles
pub mod config;

/// Error types
pub mod error;

/// Gravity, collisions and integration
pub mod physics;

/// Simulation thread and frame pacing
pub mod runner;

/// The simulation world
pub mod world;

pub use body::{Body, BodyId, BodyView};
pub use config::SimConfig;
pub use error::{ConfigError, RunnerError};
pub use world::{Setting, SimulationParams, World};
