//! Configuration and logging failures surface as startup errors

use std::fs;

use cube_gl::BootstrapError;
use cube_gl::config::{AppConfig, LoggingConfig};
use cube_gl::logging::{self, LoggingError};

#[test]
fn test_malformed_profile_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("broken.toml"),
        "[platform]\nos_name = \"Windows 11\"\n\n[window]\nwidth = \"wide\"\n",
    )
    .unwrap();

    let err: BootstrapError =
        AppConfig::load_with_env(dir.path(), "broken", Some(config::Map::new()))
            .unwrap_err()
            .into();

    assert!(matches!(err, BootstrapError::Config(_)));
    assert!(err.to_string().starts_with("failed to load configuration"));
}

#[test]
fn test_invalid_log_level_is_a_logging_error() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ansi: false,
    };

    // Rejected before any subscriber is installed
    let err = logging::init(&config).unwrap_err();
    assert!(matches!(err, LoggingError::InvalidLevel { .. }));

    let err: BootstrapError = err.into();
    assert!(matches!(err, BootstrapError::Logging(_)));
    assert_eq!(
        err.to_string(),
        "failed to initialize logging: invalid log level \"chatty\""
    );
}
