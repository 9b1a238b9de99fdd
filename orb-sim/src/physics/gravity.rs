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
//! Pairwise gravitational attraction
//!
//! Each body is pulled toward every other body with
//!
//! **a = G' · m_other / r²**
//!
//! where G' is the gravitational constant scaled by the world's gravity
//! exponent. Only the other body's mass appears: the step accelerates one
//! body at a time and the other body gets its own turn later in the tick.
//!
//! # Overlap clamp
//!
//! Instead of a softening term, r² is clamped from below to the squared sum
//! of both radii. The direction is still the true offset divided by the
//! clamped distance, so inside an overlap the pull shrinks linearly toward
//! zero and coincident centers feel no pull at all. The unclamped distance
//! is kept alongside so the caller can still detect the overlap.

use crate::body::Body;

/// Standard gravitational constant in SI units (m³/(kg⋅s²))
///
/// CODATA 2018 recommended value: 6.67430(15) × 10⁻¹¹ m³/(kg⋅s²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Gravitational constant multiplied by 10^`exponent`
pub fn scaled_gravity(base: f64, exponent: i32) -> f64 {
    base * 10f64.powi(exponent)
}

/// Result of evaluating the pull of one body on another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    /// Acceleration along x
    pub ax: f64,
    /// Acceleration along y
    pub ay: f64,
    /// True center distance, without the overlap clamp
    pub distance: f64,
    /// Sum of both radii
    pub contact_distance: f64,
}

impl Attraction {
    /// Whether the two bodies overlap
    pub fn is_overlapping(&self) -> bool {
        self.distance < self.contact_distance
    }

    /// Magnitude of the acceleration
    pub fn magnitude(&self) -> f64 {
        (self.ax * self.ax + self.ay * self.ay).sqrt()
    }
}

/// Acceleration of `body` caused by `other`
///
/// `gravity` is the already scaled constant. The result is finite for any
/// finite input with positive radii, including coincident centers.
pub fn attraction(body: &Body, other: &Body, gravity: f64) -> Attraction {
    let (dx, dy) = body.position().displacement_to(&other.position());
    let contact_distance = body.radius() + other.radius();

    let true_distance_sq = dx * dx + dy * dy;
    let distance_sq = true_distance_sq.max(contact_distance * contact_distance);
    let clamped_distance = distance_sq.sqrt();

    let acceleration = gravity * other.mass() / distance_sq;

    Attraction {
        ax: dx / clamped_distance * acceleration,
        ay: dy / clamped_distance * acceleration,
        distance: true_distance_sq.sqrt(),
        contact_distance,
    }
}
