//! Tracing subscriber setup

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, registry};

use crate::config::LoggingConfig;

/// Environment variable overriding the configured filter (`RUST_LOG` syntax)
pub const LOG_ENV_VAR: &str = "CUBEGL_LOG";

/// Targets that are too chatty at info level
const QUIET_TARGETS: [&str; 3] = ["wgpu_core=warn", "wgpu_hal=warn", "naga=warn"];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level {level:?}")]
    InvalidLevel { level: String },

    #[error("global subscriber already set: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Parses the configured level
pub fn level_filter(config: &LoggingConfig) -> Result<LevelFilter, LoggingError> {
    config
        .level
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::InvalidLevel {
            level: config.level.clone(),
        })
}

/// Builds the filter from `CUBEGL_LOG` or the configured level, capping GPU internals at warn
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(level_filter(config)?.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    for directive in QUIET_TARGETS {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    Ok(filter)
}

/// Installs the global subscriber and routes panics through tracing
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let stdout_log = tracing_subscriber::fmt::layer()
        .with_ansi(config.ansi)
        .with_filter(env_filter(config)?);

    registry().with(stdout_log).try_init()?;

    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    Ok(())
}
