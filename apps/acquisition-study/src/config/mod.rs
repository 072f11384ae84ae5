//! Configuration module for the acquisition study.
//!
//! Loads the study configuration from YAML with environment variable
//! interpolation, then validates it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use acquisition_study::config::{StudyConfig, load_config};
//!
//! // Load from default path (study.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("configs/europe.yaml"))?;
//!
//! println!("Top-N: {}", config.analysis.top_count);
//! ```

mod analysis;
mod observability;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use analysis::AnalysisConfig;
pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};

pub use crate::parallel::ParallelConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Analysis parameters consumed by the core pipeline.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Work distribution configuration.
    #[serde(default)]
    pub parallel: ParallelConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "study.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<StudyConfig, ConfigError> {
    let path = path.unwrap_or("study.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<StudyConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: StudyConfig = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Constant pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let mut result = input.to_string();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    for cap in re.captures_iter(input) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let Some(var_match) = cap.get(1) else {
            continue;
        };
        let full_match = full_match.as_str();
        let var_name = var_match.as_str();
        let default_value = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        };

        result = result.replace(full_match, &value);
    }

    result
}

/// Validate configuration values.
fn validate_config(config: &StudyConfig) -> Result<(), ConfigError> {
    if config.analysis.top_count == 0 {
        return Err(ConfigError::ValidationError(
            "analysis.top_count must be positive".to_string(),
        ));
    }

    if config.analysis.min_market_cap.is_sign_negative() {
        return Err(ConfigError::ValidationError(
            "analysis.min_market_cap must not be negative".to_string(),
        ));
    }

    Ok(())
}
