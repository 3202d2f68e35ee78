//! Shared CLI utilities for configuration and logging

use pipit_core::config::RuntimeConfig;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter; overrides the configured level.
pub const LOG_ENV: &str = "PIPIT_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },
}

/// Load a [`RuntimeConfig`] from a RON file. Missing fields take their
/// defaults.
pub fn load_config(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    parse_config(&text).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

/// The configuration for this run: defaults when no file was given, else
/// the named file, which must exist and parse.
pub fn resolve_config(path: Option<&Path>) -> Result<RuntimeConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(RuntimeConfig::default()),
    }
}

pub fn parse_config(text: &str) -> Result<RuntimeConfig, ron::error::SpannedError> {
    ron::from_str(text)
}

/// Log filter from `PIPIT_LOG` when set and valid, else the configured level.
pub fn log_filter(config: &RuntimeConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global subscriber. Logs go to stderr so they never mix with
/// builtin output.
pub fn init_logging(config: &RuntimeConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(config))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
