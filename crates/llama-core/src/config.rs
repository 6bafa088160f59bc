//! Configuration System
//!
//! Loads run settings from tuning.toml. Every section and field is optional.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::components::world::Habitat;
use crate::error::ConfigError;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub habitat: HabitatConfig,
    pub storage: StorageConfig,
    pub autopilot: AutopilotConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Wall-clock period of one tick when pacing in real time
    pub tick_ms: u64,
    pub default_ticks: u64,
    /// Llamas seeded into an empty or reset habitat
    pub founders: usize,
    /// Ticks between autosaves, 0 to save only at exit
    pub autosave_interval: u64,
    /// Ticks between progress lines, 0 to disable
    pub progress_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 800,
            default_ticks: 200,
            founders: 3,
            autosave_interval: 10,
            progress_interval: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HabitatConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for HabitatConfig {
    fn default() -> Self {
        let habitat = Habitat::default();
        Self {
            width: habitat.width,
            height: habitat.height,
        }
    }
}

impl HabitatConfig {
    pub fn habitat(&self) -> Habitat {
        Habitat::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "llamasim-state.json".to_string(),
        }
    }
}

/// Headless stand-in for a keeper. Intervals are in ticks, 0 disables.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    pub breed_interval: u64,
    pub snack_interval: u64,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from `path`, or use defaults if it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!(%err, "using default tuning");
            Self::default()
        })
    }
}
