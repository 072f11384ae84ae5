//! Tracing Setup
//!
//! Installs a `tracing-subscriber` fmt subscriber for the study binary.
//!
//! # Configuration
//!
//! - `RUST_LOG`: takes precedence over the configured level when set
//! - `observability.logging.level`: fallback level (default: `info`)
//! - `observability.logging.format`: `pretty` or `json`
//!
//! # Usage
//!
//! ```rust,ignore
//! use acquisition_study::telemetry::init_tracing;
//!
//! fn main() {
//!     init_tracing(&config.observability.logging);
//!     // ... application code
//! }
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Build the environment filter, preferring `RUST_LOG` over the configured level.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the global tracing subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.with_target(false).try_init(),
    };

    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let config = LoggingConfig::default();

        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
