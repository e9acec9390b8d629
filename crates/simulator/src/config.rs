//! Match configuration
//!
//! Supports JSON configuration for the match shape (phase boundaries) and the
//! loop's progress guard. Every field has a default, so `{}` is a valid config.

use crate::error::ConfigError;
use crate::status::Phase;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Match shape and loop limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Total match length in seconds
    #[serde(default = "default_total_duration")]
    pub total_duration: f64,

    /// Length of the autonomous period in seconds
    #[serde(default = "default_auton_duration")]
    pub auton_duration: f64,

    /// Time at which endgame begins, in seconds
    #[serde(default = "default_endgame_start")]
    pub endgame_start: f64,

    /// Maximum actions per phase before the run is declared stalled.
    /// `None` disables the cap.
    #[serde(default = "default_max_actions_per_phase")]
    pub max_actions_per_phase: Option<u64>,
}

fn default_total_duration() -> f64 {
    150.0
}

fn default_auton_duration() -> f64 {
    30.0
}

fn default_endgame_start() -> f64 {
    120.0
}

fn default_max_actions_per_phase() -> Option<u64> {
    Some(100_000)
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            total_duration: default_total_duration(),
            auton_duration: default_auton_duration(),
            endgame_start: default_endgame_start(),
            max_actions_per_phase: default_max_actions_per_phase(),
        }
    }
}

impl MatchConfig {
    /// Create a config with explicit phase boundaries and the default action cap
    pub fn new(total_duration: f64, auton_duration: f64, endgame_start: f64) -> Self {
        Self {
            total_duration,
            auton_duration,
            endgame_start,
            max_actions_per_phase: default_max_actions_per_phase(),
        }
    }

    /// Override the per-phase action cap
    pub fn with_max_actions_per_phase(mut self, max: Option<u64>) -> Self {
        self.max_actions_per_phase = max;
        self
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the phase boundaries describe a well-formed match
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("total_duration", self.total_duration),
            ("auton_duration", self.auton_duration),
            ("endgame_start", self.endgame_start),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }

        if self.auton_duration <= 0.0 {
            return Err(ConfigError::Invalid(
                "auton_duration must be positive".to_string(),
            ));
        }
        if self.endgame_start < self.auton_duration {
            return Err(ConfigError::Invalid(format!(
                "endgame_start ({}) precedes the end of auton ({})",
                self.endgame_start, self.auton_duration
            )));
        }
        if self.total_duration < self.endgame_start {
            return Err(ConfigError::Invalid(format!(
                "total_duration ({}) precedes endgame_start ({})",
                self.total_duration, self.endgame_start
            )));
        }
        if self.max_actions_per_phase == Some(0) {
            return Err(ConfigError::Invalid(
                "max_actions_per_phase must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Phase the match is in at time `t`
    pub fn phase_at(&self, t: f64) -> Phase {
        if t < self.auton_duration {
            Phase::Auton
        } else if t < self.endgame_start {
            Phase::Teleop
        } else {
            Phase::Endgame
        }
    }

    /// Length of the teleoperated period (auton end to match end)
    pub fn teleop_duration(&self) -> f64 {
        self.total_duration - self.auton_duration
    }
}
