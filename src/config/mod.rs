//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::analysis::DEFAULT_WINDOWS;
use crate::calculate::poisson::DEFAULT_CARD_THRESHOLDS;
use crate::calculate::quality::DEFAULT_MIN_OBSERVED_MATCHES;
use crate::calculate::threshold::DEFAULT_THRESHOLDS;
use crate::calculate::validate_thresholds;
use crate::models::{MatchOrder, Perspective, StatFamily};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Window and threshold defaults for `analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Window sizes, e.g. [5, 10]
    #[serde(default = "default_windows")]
    pub windows: Vec<usize>,

    /// Over/under thresholds for the analyzed family
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<f64>,

    #[serde(default)]
    pub family: StatFamily,

    #[serde(default)]
    pub perspective: Perspective,

    #[serde(default)]
    pub order: MatchOrder,

    /// Observations needed before a field derived from records counts as available
    #[serde(default = "default_min_observed_matches")]
    pub min_observed_matches: usize,
}

fn default_windows() -> Vec<usize> {
    DEFAULT_WINDOWS.to_vec()
}

fn default_thresholds() -> Vec<f64> {
    DEFAULT_THRESHOLDS.to_vec()
}

fn default_min_observed_matches() -> usize {
    DEFAULT_MIN_OBSERVED_MATCHES
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            windows: default_windows(),
            thresholds: default_thresholds(),
            family: StatFamily::default(),
            perspective: Perspective::default(),
            order: MatchOrder::default(),
            min_observed_matches: default_min_observed_matches(),
        }
    }
}

/// Thresholds the Poisson estimator reports over-rates for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default = "default_card_thresholds")]
    pub card_thresholds: Vec<f64>,

    #[serde(default = "default_thresholds")]
    pub corner_thresholds: Vec<f64>,
}

fn default_card_thresholds() -> Vec<f64> {
    DEFAULT_CARD_THRESHOLDS.to_vec()
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            card_thresholds: default_card_thresholds(),
            corner_thresholds: default_thresholds(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub estimator: EstimatorConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            analysis: AnalysisConfig::default(),
            estimator: EstimatorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.windows.is_empty() {
            return Err(ConfigError::ValidationError(
                "At least one window size is required".to_string(),
            ));
        }

        if self.analysis.windows.contains(&0) {
            return Err(ConfigError::ValidationError(
                "Window sizes must be greater than 0".to_string(),
            ));
        }

        for thresholds in [
            &self.analysis.thresholds,
            &self.estimator.card_thresholds,
            &self.estimator.corner_thresholds,
        ] {
            validate_thresholds(thresholds)
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        Ok(())
    }
}
