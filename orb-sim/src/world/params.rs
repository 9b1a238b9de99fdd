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
//! Runtime-tunable simulation parameters
//!
//! Three integer levels steer the simulation while it runs. Input handling
//! nudges them up and down; every adjustment is clamped to the level's range
//! and never reported as an error.

use std::fmt;
use std::ops::RangeInclusive;

/// Allowed time-scale exponents (dt × 10^exponent)
pub const TIME_SCALE_RANGE: RangeInclusive<i32> = -4..=9;

/// Allowed gravity-scale exponents (G × 10^exponent)
pub const GRAVITY_SCALE_RANGE: RangeInclusive<i32> = -4..=5;

/// Allowed restitution levels
pub const RESTITUTION_RANGE: RangeInclusive<i32> = 0..=5;

/// Restitution coefficient per level
pub const RESTITUTION_STEP: f64 = 0.2;

/// The three levels read by every body during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationParams {
    time_scale: i32,
    gravity_scale: i32,
    restitution: i32,
}

impl SimulationParams {
    /// Create parameters from absolute levels, clamping each one
    pub fn new(time_scale: i32, gravity_scale: i32, restitution: i32) -> Self {
        SimulationParams {
            time_scale: clamp_to(time_scale, &TIME_SCALE_RANGE),
            gravity_scale: clamp_to(gravity_scale, &GRAVITY_SCALE_RANGE),
            restitution: clamp_to(restitution, &RESTITUTION_RANGE),
        }
    }

    /// Current time-scale exponent
    pub fn time_scale(&self) -> i32 {
        self.time_scale
    }

    /// Current gravity-scale exponent
    pub fn gravity_scale(&self) -> i32 {
        self.gravity_scale
    }

    /// Current restitution level
    pub fn restitution(&self) -> i32 {
        self.restitution
    }

    /// Restitution level converted to a coefficient in [0, 1]
    pub fn restitution_coefficient(&self) -> f64 {
        self.restitution as f64 * RESTITUTION_STEP
    }

    /// Shift the time-scale exponent and return the clamped result
    pub fn adjust_time_scale(&mut self, delta: i32) -> i32 {
        self.time_scale = clamp_to(self.time_scale.saturating_add(delta), &TIME_SCALE_RANGE);
        self.time_scale
    }

    /// Shift the gravity-scale exponent and return the clamped result
    pub fn adjust_gravity_scale(&mut self, delta: i32) -> i32 {
        self.gravity_scale = clamp_to(self.gravity_scale.saturating_add(delta), &GRAVITY_SCALE_RANGE);
        self.gravity_scale
    }

    /// Shift the restitution level and return the clamped result
    pub fn adjust_restitution(&mut self, delta: i32) -> i32 {
        self.restitution = clamp_to(self.restitution.saturating_add(delta), &RESTITUTION_RANGE);
        self.restitution
    }
}

fn clamp_to(value: i32, range: &RangeInclusive<i32>) -> i32 {
    value.clamp(*range.start(), *range.end())
}

/// Which control the UI currently routes up/down input to
///
/// This is plain state for the external UI. The simulation itself only
/// consults it in [`World::adjust_selected`](crate::world::World::adjust_selected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Setting {
    /// Nothing selected
    #[default]
    Unselected,
    /// Time-scale exponent
    Speed,
    /// Gravity-scale exponent
    Gravity,
    /// Click a body to inspect it
    View,
    /// Click to create a body
    Create,
    /// Restitution level
    Elasticity,
}

impl Setting {
    /// Status line for this selection given the current parameters
    pub fn status(&self, params: &SimulationParams) -> String {
        match self {
            Setting::Speed => format!("Speed: {}", params.time_scale()),
            Setting::Gravity => format!("Gravity: {}", params.gravity_scale()),
            Setting::View => "Viewing mode: click an orb for details".to_string(),
            Setting::Create => "Left click to create an orb".to_string(),
            Setting::Elasticity => format!("Elasticity: {:.1}", params.restitution_coefficient()),
            Setting::Unselected => "No setting selected".to_string(),
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Setting::Unselected => "UNSELECTED",
            Setting::Speed => "SPEED",
            Setting::Gravity => "GRAVITY",
            Setting::View => "VIEW",
            Setting::Create => "CREATE",
            Setting::Elasticity => "ELASTICITY",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_zero() {
        let params = SimulationParams::default();
        assert_eq!(params.time_scale(), 0);
        assert_eq!(params.gravity_scale(), 0);
        assert_eq!(params.restitution(), 0);
        assert_eq!(params.restitution_coefficient(), 0.0);
    }

    #[test]
    fn test_time_scale_pins_at_bounds() {
        let mut params = SimulationParams::default();
        for _ in 0..20 {
            params.adjust_time_scale(1);
        }
        assert_eq!(params.time_scale(), 9);
        for _ in 0..20 {
            params.adjust_time_scale(-1);
        }
        assert_eq!(params.time_scale(), -4);
    }

    #[test]
    fn test_gravity_scale_pins_at_bounds() {
        let mut params = SimulationParams::default();
        assert_eq!(params.adjust_gravity_scale(100), 5);
        assert_eq!(params.adjust_gravity_scale(-100), -4);
    }

    #[test]
    fn test_restitution_pins_at_bounds() {
        let mut params = SimulationParams::default();
        assert_eq!(params.adjust_restitution(-1), 0);
        assert_eq!(params.adjust_restitution(i32::MAX), 5);
        assert!((params.restitution_coefficient() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_new_clamps_levels() {
        let params = SimulationParams::new(50, -50, 7);
        assert_eq!(params, SimulationParams::new(9, -4, 5));
    }

    #[test]
    fn test_setting_status_text() {
        let params = SimulationParams::new(3, -2, 4);
        assert_eq!(Setting::Speed.status(&params), "Speed: 3");
        assert_eq!(Setting::Gravity.status(&params), "Gravity: -2");
        assert_eq!(Setting::Elasticity.status(&params), "Elasticity: 0.8");
        assert_eq!(Setting::default().to_string(), "UNSELECTED");
    }
}
