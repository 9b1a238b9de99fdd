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
//! Planar state components
//!
//! Position, velocity and color values carried by every body. Coordinates are
//! screen pixels with y growing downwards; the physics does not care about
//! the orientation as long as it is consistent.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 2D position in pixels
///
/// # Examples
///
/// ```
/// use orb_sim::body::Position;
///
/// let pos = Position::new(1.0, 2.0);
/// assert_eq!(pos.x(), 1.0);
/// assert!(pos.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Position at the origin
    pub fn zero() -> Self {
        Position::new(0.0, 0.0)
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Shift the position by the given offsets
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Displacement vector pointing from `self` to `other`
    pub fn displacement_to(&self, other: &Position) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }

    /// Check if both coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// 2D velocity in pixels per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    dx: f64,
    dy: f64,
}

impl Velocity {
    /// Create a new velocity
    pub fn new(dx: f64, dy: f64) -> Self {
        Velocity { dx, dy }
    }

    /// Velocity at rest
    pub fn zero() -> Self {
        Velocity::new(0.0, 0.0)
    }

    /// Get the x component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Add a velocity change
    pub fn add(&mut self, ddx: f64, ddy: f64) {
        self.dx += ddx;
        self.dy += ddy;
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    /// Speed (magnitude of the velocity vector)
    pub fn magnitude(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }

    /// Direction of travel as a unit vector, or `None` when at rest
    ///
    /// Renderers use this for the velocity overlay of the highlighted body.
    pub fn direction(&self) -> Option<(f64, f64)> {
        let speed = self.magnitude();
        if speed == 0.0 || !speed.is_finite() {
            None
        } else {
            Some((self.dx / speed, self.dy / speed))
        }
    }
}

/// Display color of a body
///
/// The simulation never reads it; it is carried for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Draw a uniformly random opaque color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Color::rgb(rng.gen(), rng.gen(), rng.gen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_position_displacement() {
        let a = Position::new(1.0, 1.0);
        let b = Position::new(4.0, 5.0);
        assert_eq!(a.displacement_to(&b), (3.0, 4.0));
    }

    #[test]
    fn test_position_validation() {
        assert!(Position::new(0.0, 0.0).is_valid());
        assert!(!Position::new(f64::NAN, 0.0).is_valid());
        assert!(!Position::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_velocity_magnitude() {
        let vel = Velocity::new(3.0, 4.0);
        assert_eq!(vel.magnitude(), 5.0);
    }

    #[test]
    fn test_velocity_direction() {
        assert_eq!(Velocity::zero().direction(), None);
        let (ux, uy) = Velocity::new(0.0, -2.0).direction().unwrap();
        assert_eq!(ux, 0.0);
        assert_eq!(uy, -1.0);
    }

    #[test]
    fn test_random_color_is_deterministic_per_seed() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        assert_eq!(Color::random(&mut a), Color::random(&mut b));
    }
}
