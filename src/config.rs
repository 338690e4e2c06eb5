//! Simulation settings loaded from TOML.

use crate::core::{PostureState, TransitionHistory};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Timer, stimulus and retention settings for a simulation run.
///
/// Every field has a default, so an empty file is a valid config.
///
/// # Example
///
/// ```rust
/// use posture::config::SimulationConfig;
///
/// let config = SimulationConfig::from_toml_str("seed = 7\nlog_capacity = 5").unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.log_capacity, 5);
/// assert_eq!(config.tick_interval_ms, 3000);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Milliseconds between stimulus ticks
    pub tick_interval_ms: u64,
    /// Chance that a tick produces an attack
    pub attack_probability: f64,
    /// Seed for the stimulus generator; entropy when absent
    pub seed: Option<u64>,
    /// Attack log rows kept, newest first
    pub log_capacity: usize,
    /// Accepted transitions kept in driver history
    pub history_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 3000,
            attack_probability: 0.3,
            seed: None,
            log_capacity: 15,
            history_capacity: TransitionHistory::<PostureState>::DEFAULT_CAPACITY,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded simulation config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.attack_probability) {
            return Err(ConfigError::Invalid {
                field: "attack_probability",
                reason: format!("{} is outside [0, 1]", self.attack_probability),
            });
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "log_capacity",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "history_capacity",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(3));
    }

    #[test]
    fn probability_out_of_range_is_rejected() {
        let err = SimulationConfig::from_toml_str("attack_probability = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "attack_probability",
                ..
            }
        ));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = SimulationConfig::from_toml_str("tick_interval_ms = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "tick_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn unknown_fields_fail_to_parse() {
        let err = SimulationConfig::from_toml_str("volume = 11").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimulationConfig::load(Path::new("/nonexistent/posture.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/posture.toml"));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = SimulationConfig {
            seed: Some(99),
            ..SimulationConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), config);
    }
}
