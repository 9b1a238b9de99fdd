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
//! Error types for the fallible edges of the crate
//!
//! The simulation step itself cannot fail. Errors only come from loading
//! configuration and from driving the step on a background thread.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or validate a [`SimConfig`](crate::config::SimConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config holds a value TOML cannot represent
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value parsed but is outside its allowed range
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending key
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Failure while running the simulation loop on its own thread
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Another thread panicked while holding the world lock
    #[error("world lock poisoned")]
    LockPoisoned,
    /// The OS refused to start the simulation thread
    #[error("failed to spawn simulation thread: {0}")]
    Spawn(#[from] std::io::Error),
    /// The simulation thread panicked
    #[error("simulation thread panicked")]
    Panicked,
}
