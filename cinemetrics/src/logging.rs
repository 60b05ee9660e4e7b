//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level. With a log file configured,
//! events go to stderr and are appended to the file without ANSI colors.

use std::fs::OpenOptions;
use std::sync::Mutex;

use cinemetrics_common::config::LoggingConfig;
use cinemetrics_common::{Error, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter from `RUST_LOG`, falling back to the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_layer = match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Internal(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_filter_uses_configured_level() {
        std::env::remove_var("RUST_LOG");
        let config = LoggingConfig {
            level: "warn".to_string(),
            file: None,
        };
        assert_eq!(env_filter(&config).to_string(), "warn");
    }

    #[test]
    #[serial]
    fn test_rust_log_overrides_config() {
        std::env::set_var("RUST_LOG", "cinemetrics=trace");
        let filter = env_filter(&LoggingConfig::default());
        std::env::remove_var("RUST_LOG");
        assert_eq!(filter.to_string(), "cinemetrics=trace");
    }
}
