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
//! Simulated bodies ("orbs")
//!
//! A [`Body`] is a circular mass point. Its radius is fixed when it is
//! created and its mass is derived from that radius once, through the
//! configured [`MassModel`]. Only the physics step mutates position and
//! velocity afterwards.
//!
//! Bodies keep no reference to the world that owns them. Everything the
//! integration step needs from the world is handed over per tick in a
//! [`StepContext`](crate::physics::StepContext).

mod components;
mod id;

pub use components::{Color, Position, Velocity};
pub use id::BodyId;

use crate::config::BodyConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Default density for [`MassModel::Density`]
pub const DEFAULT_DENSITY: f64 = 22.59;

/// Default factor for [`MassModel::Linear`] (mass = radius × 10²²)
pub const DEFAULT_LINEAR_MASS_FACTOR: f64 = 1e22;

/// Fraction of the diameter by which the square hit region is shifted
/// up and left of the body center
pub const HIT_OFFSET_FRACTION: f64 = 0.35;

/// How a body's mass is derived from its radius
///
/// Both models are pure functions of the radius, so two bodies of equal
/// radius under the same model always have equal mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MassModel {
    /// Solid sphere of uniform density: m = ρ · (4/3)π · r³
    Density {
        /// Density in kg per cubic pixel
        density: f64,
    },
    /// Mass proportional to radius: m = r · factor
    Linear {
        /// Kilograms per pixel of radius
        factor: f64,
    },
}

impl MassModel {
    /// Compute the mass for the given radius
    pub fn mass_for_radius(&self, radius: f64) -> f64 {
        match *self {
            MassModel::Density { density } => density * (4.0 / 3.0) * PI * radius.powi(3),
            MassModel::Linear { factor } => radius * factor,
        }
    }

    /// Check that the model parameter is positive and finite
    pub fn is_valid(&self) -> bool {
        let value = match *self {
            MassModel::Density { density } => density,
            MassModel::Linear { factor } => factor,
        };
        value > 0.0 && value.is_finite()
    }
}

impl Default for MassModel {
    fn default() -> Self {
        MassModel::Density {
            density: DEFAULT_DENSITY,
        }
    }
}

/// A circular body taking part in the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    position: Position,
    velocity: Velocity,
    radius: f64,
    mass: f64,
    color: Color,
}

impl Body {
    /// Create a body at rest with an explicit radius
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not positive and finite, or if the mass model
    /// yields a mass that is not positive and finite.
    pub fn new(id: BodyId, position: Position, radius: f64, color: Color, mass_model: MassModel) -> Self {
        assert!(
            radius > 0.0 && radius.is_finite(),
            "Radius must be positive and finite"
        );
        let mass = mass_model.mass_for_radius(radius);
        assert!(mass > 0.0 && mass.is_finite(), "Mass must be positive and finite");

        Body {
            id,
            position,
            velocity: Velocity::zero(),
            radius,
            mass,
            color,
        }
    }

    /// Create a body at rest with a radius drawn from the configured range
    pub fn spawn<R: Rng + ?Sized>(
        id: BodyId,
        position: Position,
        color: Color,
        config: &BodyConfig,
        rng: &mut R,
    ) -> Self {
        let radius = rng.gen_range(config.radius_min..config.radius_max);
        Body::new(id, position, radius, color, config.mass_model)
    }

    /// Give the body an initial velocity
    ///
    /// Meant for scenario setup before the body is handed to a world.
    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    /// Get the body id
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Get the current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Get the current velocity
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Get the radius in pixels
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Get the diameter in pixels
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Get the mass in kilograms
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Get the display color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Momentum vector (m·v)
    pub fn momentum(&self) -> (f64, f64) {
        (self.mass * self.velocity.dx(), self.mass * self.velocity.dy())
    }

    /// Kinetic energy (½·m·v²)
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude().powi(2)
    }

    /// Check that position and velocity are finite
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.velocity.is_valid()
    }

    /// Check whether a point falls inside this body's hit region
    ///
    /// The region is a square with the side of the diameter whose top-left
    /// corner sits at `center - 0.35 · diameter`. It is not centered on the
    /// body and it is not a circle. Edges are exclusive.
    pub fn hit_region_contains(&self, x: f64, y: f64) -> bool {
        let diameter = self.diameter();
        let x_min = self.position.x() - HIT_OFFSET_FRACTION * diameter;
        let y_min = self.position.y() - HIT_OFFSET_FRACTION * diameter;
        let x_max = x_min + diameter;
        let y_max = y_min + diameter;

        x > x_min && x < x_max && y > y_min && y < y_max
    }

    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        self.position.translate(dx, dy);
    }

    pub(crate) fn accelerate(&mut self, ddx: f64, ddy: f64) {
        self.velocity.add(ddx, ddy);
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}|{:.2})\nMass: {:.3e} [kg]\nRadius: {:.2} [px]",
            self.position.x(),
            self.position.y(),
            self.mass,
            self.radius
        )
    }
}

/// Read-only view of a live body handed to renderers
#[derive(Debug, Clone, Copy)]
pub struct BodyView<'a> {
    body: &'a Body,
    highlighted: bool,
}

impl<'a> BodyView<'a> {
    pub(crate) fn new(body: &'a Body, highlighted: bool) -> Self {
        BodyView { body, highlighted }
    }

    /// The underlying body
    pub fn body(&self) -> &'a Body {
        self.body
    }

    /// Whether this body holds the world's highlight slot
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Get the body id
    pub fn id(&self) -> BodyId {
        self.body.id()
    }

    /// Get the current position
    pub fn position(&self) -> Position {
        self.body.position()
    }

    /// Get the current velocity
    pub fn velocity(&self) -> Velocity {
        self.body.velocity()
    }

    /// Get the radius in pixels
    pub fn radius(&self) -> f64 {
        self.body.radius()
    }

    /// Get the mass in kilograms
    pub fn mass(&self) -> f64 {
        self.body.mass()
    }

    /// Get the display color
    pub fn color(&self) -> Color {
        self.body.color()
    }
}
