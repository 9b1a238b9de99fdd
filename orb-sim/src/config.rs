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
//! Simulation configuration
//!
//! [`SimConfig`] groups every tunable that is fixed for the lifetime of a
//! world: how bodies are generated, which physics profile runs, the starting
//! parameter levels and the cadence of the simulation thread. Every section
//! is `#[serde(default)]`, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! [body]
//! radius_min = 20.0
//! radius_max = 200.0
//!
//! [body.mass_model]
//! kind = "linear"
//! factor = 1e22
//!
//! [physics]
//! integration_order = "per_neighbor"
//! fixed_restitution = 0.8
//!
//! [world]
//! seed = 12345
//! gravity_scale = 3
//! ```
//!
//! The runtime parameters (time scale, gravity scale, restitution) keep
//! changing after start-up; the values here only seed them.

use crate::body::MassModel;
use crate::error::ConfigError;
use crate::physics::{IntegrationOrder, GRAVITATIONAL_CONSTANT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default lower bound of the spawn radius range (inclusive, pixels)
pub const DEFAULT_RADIUS_MIN: f64 = 24.0;

/// Default upper bound of the spawn radius range (exclusive, pixels)
pub const DEFAULT_RADIUS_MAX: f64 = 180.0;

/// Penetration depth below which positional correction is skipped
pub const DEFAULT_CORRECTION_THRESHOLD: f64 = 0.1;

/// Default sleep between two ticks of the simulation thread (~60 Hz)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;

/// Complete configuration for a world and its runner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Body generation
    pub body: BodyConfig,
    /// Physics profile
    pub physics: PhysicsConfig,
    /// Starting parameter levels and RNG seed
    pub world: WorldConfig,
    /// Simulation thread cadence
    pub runner: RunnerConfig,
}

/// How new bodies are generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Smallest radius a spawned body can get (inclusive)
    pub radius_min: f64,
    /// Upper radius bound (exclusive)
    pub radius_max: f64,
    /// Radius to mass conversion
    pub mass_model: MassModel,
}

impl Default for BodyConfig {
    fn default() -> Self {
        BodyConfig {
            radius_min: DEFAULT_RADIUS_MIN,
            radius_max: DEFAULT_RADIUS_MAX,
            mass_model: MassModel::default(),
        }
    }
}

/// Physics profile of the integration step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Base gravitational constant before the gravity-scale exponent
    pub gravitational_constant: f64,
    /// Whether overlapping bodies get collision response
    pub collision_enabled: bool,
    /// Pin the coefficient of restitution instead of following the
    /// world's restitution level
    pub fixed_restitution: Option<f64>,
    /// Penetration depth that triggers positional correction
    pub correction_threshold: f64,
    /// When positions are integrated relative to the neighbor loop
    pub integration_order: IntegrationOrder,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            collision_enabled: true,
            fixed_restitution: None,
            correction_threshold: DEFAULT_CORRECTION_THRESHOLD,
            integration_order: IntegrationOrder::default(),
        }
    }
}

/// Starting state of the world
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for radius and color draws; entropy when absent
    pub seed: Option<u64>,
    /// Initial time-scale exponent (clamped to its range)
    pub time_scale: i32,
    /// Initial gravity-scale exponent (clamped to its range)
    pub gravity_scale: i32,
    /// Initial restitution level (clamped to its range)
    pub restitution: i32,
}

/// Cadence of the simulation thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Sleep between ticks in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl SimConfig {
    /// Read and validate a TOML config file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for values outside their range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded simulation config from {:?}", path);
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the config as TOML
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] for values TOML cannot hold, such
    /// as a seed above `i64::MAX`.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let body = &self.body;
        if !(body.radius_min > 0.0 && body.radius_min.is_finite()) {
            return Err(invalid("body.radius_min", "must be positive and finite"));
        }
        if !(body.radius_max > body.radius_min && body.radius_max.is_finite()) {
            return Err(invalid(
                "body.radius_max",
                format!("must be finite and greater than radius_min ({})", body.radius_min),
            ));
        }
        if !body.mass_model.is_valid() {
            return Err(invalid("body.mass_model", "parameter must be positive and finite"));
        }
        // Mass grows with the radius, so the bounds cover the whole range
        let smallest = body.mass_model.mass_for_radius(body.radius_min);
        if !(smallest > 0.0 && smallest.is_finite()) {
            return Err(invalid(
                "body.radius_min",
                format!("gives mass {} under the mass model", smallest),
            ));
        }
        let largest = body.mass_model.mass_for_radius(body.radius_max);
        if !largest.is_finite() {
            return Err(invalid(
                "body.radius_max",
                format!("gives mass {} under the mass model", largest),
            ));
        }

        let physics = &self.physics;
        let g = physics.gravitational_constant;
        if !(g >= 0.0 && g.is_finite()) {
            return Err(invalid(
                "physics.gravitational_constant",
                "must be non-negative and finite",
            ));
        }
        if let Some(e) = physics.fixed_restitution {
            if !(0.0..=1.0).contains(&e) {
                return Err(invalid(
                    "physics.fixed_restitution",
                    format!("{} is outside [0, 1]", e),
                ));
            }
        }
        let threshold = physics.correction_threshold;
        if !(threshold >= 0.0 && threshold.is_finite()) {
            return Err(invalid(
                "physics.correction_threshold",
                "must be non-negative and finite",
            ));
        }

        if self.runner.tick_interval_ms == 0 {
            return Err(invalid("runner.tick_interval_ms", "must be at least 1"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.body.radius_min, 24.0);
        assert_eq!(config.body.radius_max, 180.0);
        assert!(config.physics.collision_enabled);
        assert_eq!(config.physics.integration_order, IntegrationOrder::PerTick);
        assert_eq!(config.runner.tick_interval_ms, 16);
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let text = r#"
            [body]
            radius_min = 20.0
            radius_max = 200.0

            [body.mass_model]
            kind = "linear"
            factor = 1e22

            [physics]
            integration_order = "per_neighbor"
            fixed_restitution = 0.8

            [world]
            seed = 99
            gravity_scale = 3
        "#;
        let config = SimConfig::from_toml_str(text).unwrap();
        assert_eq!(config.body.radius_min, 20.0);
        assert_eq!(config.body.mass_model, MassModel::Linear { factor: 1e22 });
        assert_eq!(config.physics.integration_order, IntegrationOrder::PerNeighbor);
        assert_eq!(config.physics.fixed_restitution, Some(0.8));
        assert!(config.physics.collision_enabled);
        assert_eq!(config.world.seed, Some(99));
        assert_eq!(config.world.gravity_scale, 3);
        assert_eq!(config.world.time_scale, 0);
    }

    #[test]
    fn test_defaults_survive_toml_roundtrip() {
        let mut config = SimConfig::default();
        config.world.seed = Some(5);
        let text = config.to_toml_string().unwrap();
        let parsed = SimConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_inverted_radius_range() {
        let err = SimConfig::from_toml_str("[body]\nradius_min = 50.0\nradius_max = 10.0\n").unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "body.radius_max"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rejects_restitution_above_one() {
        let err = SimConfig::from_toml_str("[physics]\nfixed_restitution = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("physics.fixed_restitution"));
    }

    #[test]
    fn test_rejects_negative_density() {
        let text = "[body.mass_model]\nkind = \"density\"\ndensity = -1.0\n";
        let err = SimConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "body.mass_model", .. }));
    }

    #[test]
    fn test_rejects_zero_tick_interval() {
        let err = SimConfig::from_toml_str("[runner]\ntick_interval_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "runner.tick_interval_ms", .. }));
    }

    #[test]
    fn test_rejects_radius_range_with_overflowing_mass() {
        let err = SimConfig::from_toml_str("[body]\nradius_min = 1e101\nradius_max = 1e120\n").unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "body.radius_max"),
            other => panic!("unexpected error: {}", other),
        }

        let err = SimConfig::from_toml_str("[body]\nradius_min = 1e110\nradius_max = 1e120\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "body.radius_min", .. }));
    }

    #[test]
    fn test_rejects_radius_range_with_vanishing_mass() {
        let err = SimConfig::from_toml_str("[body]\nradius_min = 1e-310\nradius_max = 2e-310\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "body.radius_min", .. }));
    }

    #[test]
    fn test_linear_model_accepts_wide_range() {
        let text = "[body]\nradius_min = 1e-100\nradius_max = 1e100\n\n[body.mass_model]\nkind = \"linear\"\nfactor = 1e22\n";
        assert!(SimConfig::from_toml_str(text).is_ok());
    }

    #[test]
    fn test_seed_outside_toml_range_fails_to_serialize() {
        let mut config = SimConfig::default();
        config.world.seed = Some(u64::MAX);
        let err = config.to_toml_string().unwrap_err();
        assert!(matches!(err, ConfigError::Serialize(_)));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = SimConfig::from_toml_str("[body\nradius_min = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::load("/nonexistent/orb-sim.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
