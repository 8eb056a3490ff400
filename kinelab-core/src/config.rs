//! Lab configuration
//!
//! A lab file is TOML with three optional tables:
//!
//! ```toml
//! [parameters]
//! initial_velocity = 0.0
//! acceleration = 2.0
//!
//! [engine]
//! track_half_range = 100.0
//! boundary_margin = 5.0
//! timestamp_unit = "milliseconds"
//!
//! [scene]
//! moving_threshold = 0.1
//! min_rotation_period = 0.1
//! ```
//!
//! Missing keys fall back to their defaults.

use crate::error::ConfigError;
use crate::kinematics::SimulationParameters;
use crate::scene::SceneStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unit of the timestamps handed to `tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampUnit {
    #[default]
    Seconds,
    Milliseconds,
}

impl TimestampUnit {
    /// Convert a timestamp difference to seconds
    pub fn to_seconds(self, delta: f64) -> f64 {
        match self {
            TimestampUnit::Seconds => delta,
            TimestampUnit::Milliseconds => delta / 1000.0,
        }
    }
}

/// Track and timing settings for the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Half length of the visible track (m); the origin sits in the middle.
    pub track_half_range: f64,
    /// Extra distance past the track end before the run halts (m).
    pub boundary_margin: f64,
    pub timestamp_unit: TimestampUnit,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            track_half_range: 100.0,
            boundary_margin: 5.0,
            timestamp_unit: TimestampUnit::Seconds,
        }
    }
}

impl EngineConfig {
    /// Distance from the origin at which a run halts
    pub fn limit(&self) -> f64 {
        self.track_half_range + self.boundary_margin
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.track_half_range.is_finite() || self.track_half_range <= 0.0 {
            return Err(ConfigError::invalid(
                "engine.track_half_range",
                format!("must be a positive number, got {}", self.track_half_range),
            ));
        }
        if !self.boundary_margin.is_finite() || self.boundary_margin < 0.0 {
            return Err(ConfigError::invalid(
                "engine.boundary_margin",
                format!("must be zero or positive, got {}", self.boundary_margin),
            ));
        }
        Ok(())
    }
}

/// Everything a lab session is configured with
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub parameters: SimulationParameters,
    pub engine: EngineConfig,
    pub scene: SceneStyle,
}

impl LabConfig {
    /// Read and validate a lab file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded lab config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.parameters.initial_velocity.is_finite() {
            return Err(ConfigError::invalid(
                "parameters.initial_velocity",
                "must be finite",
            ));
        }
        if !self.parameters.acceleration.is_finite() {
            return Err(ConfigError::invalid("parameters.acceleration", "must be finite"));
        }
        self.engine.validate()?;
        self.scene.validate()
    }
}
