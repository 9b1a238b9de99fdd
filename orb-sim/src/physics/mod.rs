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
//! Gravity, collision response and the integration step
//!
//! One tick advances every live body with semi-implicit Euler: the velocity
//! picks up the pull of each neighbor, then the position moves with the
//! updated velocity.
//!
//! # Integration order
//!
//! [`IntegrationOrder::PerTick`] moves a body once per tick, after all
//! neighbors have contributed. [`IntegrationOrder::PerNeighbor`] moves it
//! after every single neighbor, which couples the effective step to the
//! number of bodies. The latter is kept for comparison runs against older
//! recordings.
//!
//! # Scaling
//!
//! The frame delta is multiplied by 10^time_scale and the gravitational
//! constant by 10^gravity_scale before the step runs. Both exponents come
//! from the world's [`SimulationParams`] and are bundled with the physics
//! profile into a [`StepContext`] once per tick.

pub mod collision;
pub mod gravity;
mod step;

pub use collision::{resolve_collision, Contact};
pub use gravity::{attraction, scaled_gravity, Attraction, GRAVITATIONAL_CONSTANT};
pub use step::{integrate_all, integrate_body, StepStats};

use crate::body::Body;
use crate::config::PhysicsConfig;
use crate::world::SimulationParams;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// When a body's position is integrated relative to the neighbor loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationOrder {
    /// Once per tick, after all neighbors contributed velocity
    #[default]
    PerTick,
    /// After every neighbor
    PerNeighbor,
}

/// Everything a body needs from its world for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepContext {
    /// Frame delta multiplied by 10^time_scale
    pub adjusted_dt: f64,
    /// Gravitational constant multiplied by 10^gravity_scale
    pub gravity: f64,
    /// Coefficient of restitution in [0, 1]
    pub restitution: f64,
    /// Whether overlapping pairs are resolved
    pub collision_enabled: bool,
    /// Penetration depth that triggers positional correction
    pub correction_threshold: f64,
    /// Position integration order
    pub order: IntegrationOrder,
}

impl StepContext {
    /// Build the context for one tick from the raw frame delta
    pub fn new(dt: f64, params: &SimulationParams, physics: &PhysicsConfig) -> Self {
        StepContext {
            adjusted_dt: dt * 10f64.powi(params.time_scale()),
            gravity: scaled_gravity(physics.gravitational_constant, params.gravity_scale()),
            restitution: physics
                .fixed_restitution
                .unwrap_or_else(|| params.restitution_coefficient()),
            collision_enabled: physics.collision_enabled,
            correction_threshold: physics.correction_threshold,
            order: physics.integration_order,
        }
    }
}

/// Total linear momentum of a collection
pub fn total_momentum(bodies: &[Body]) -> (f64, f64) {
    #[cfg(feature = "parallel")]
    {
        bodies
            .par_iter()
            .map(Body::momentum)
            .reduce(|| (0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1))
    }

    #[cfg(not(feature = "parallel"))]
    {
        bodies
            .iter()
            .map(Body::momentum)
            .fold((0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1))
    }
}

/// Total kinetic energy of a collection
pub fn total_kinetic_energy(bodies: &[Body]) -> f64 {
    #[cfg(feature = "parallel")]
    {
        bodies.par_iter().map(Body::kinetic_energy).sum()
    }

    #[cfg(not(feature = "parallel"))]
    {
        bodies.iter().map(Body::kinetic_energy).sum()
    }
}

/// Mass-weighted center of a collection, `None` when it is empty
pub fn center_of_mass(bodies: &[Body]) -> Option<(f64, f64)> {
    let weigh = |body: &Body| {
        let pos = body.position();
        (body.mass(), body.mass() * pos.x(), body.mass() * pos.y())
    };
    let add = |a: (f64, f64, f64), b: (f64, f64, f64)| (a.0 + b.0, a.1 + b.1, a.2 + b.2);

    #[cfg(feature = "parallel")]
    let (total, mx, my) = bodies.par_iter().map(weigh).reduce(|| (0.0, 0.0, 0.0), add);

    #[cfg(not(feature = "parallel"))]
    let (total, mx, my) = bodies.iter().map(weigh).fold((0.0, 0.0, 0.0), add);

    if total > 0.0 {
        Some((mx / total, my / total))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyId, Color, MassModel, Position, Velocity};

    fn body(id: u64, x: f64, radius: f64, vx: f64) -> Body {
        Body::new(
            BodyId::new(id),
            Position::new(x, 0.0),
            radius,
            Color::default(),
            MassModel::Linear { factor: 1.0 },
        )
        .with_velocity(Velocity::new(vx, 0.0))
    }

    #[test]
    fn test_step_context_scaling() {
        let mut params = SimulationParams::default();
        params.adjust_time_scale(2);
        params.adjust_gravity_scale(-1);
        params.adjust_restitution(3);

        let ctx = StepContext::new(0.5, &params, &PhysicsConfig::default());
        assert!((ctx.adjusted_dt - 50.0).abs() < 1e-9);
        assert!((ctx.gravity - GRAVITATIONAL_CONSTANT / 10.0).abs() < 1e-20);
        assert!((ctx.restitution - 0.6).abs() < 1e-12);
        assert_eq!(ctx.order, IntegrationOrder::PerTick);
    }

    #[test]
    fn test_fixed_restitution_overrides_level() {
        let mut params = SimulationParams::default();
        params.adjust_restitution(5);
        let physics = PhysicsConfig {
            fixed_restitution: Some(0.8),
            ..PhysicsConfig::default()
        };

        let ctx = StepContext::new(1.0, &params, &physics);
        assert_eq!(ctx.restitution, 0.8);
    }

    #[test]
    fn test_total_momentum() {
        let bodies = vec![body(0, 0.0, 2.0, 3.0), body(1, 50.0, 3.0, -2.0)];
        assert_eq!(total_momentum(&bodies), (0.0, 0.0));
    }

    #[test]
    fn test_total_kinetic_energy() {
        let bodies = vec![body(0, 0.0, 2.0, 3.0), body(1, 50.0, 4.0, 1.0)];
        assert!((total_kinetic_energy(&bodies) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_center_of_mass() {
        let bodies = vec![body(0, 0.0, 1.0, 0.0), body(1, 30.0, 2.0, 0.0)];
        let (cx, cy) = center_of_mass(&bodies).unwrap();
        assert!((cx - 20.0).abs() < 1e-12);
        assert_eq!(cy, 0.0);
        assert_eq!(center_of_mass(&[]), None);
    }
}
