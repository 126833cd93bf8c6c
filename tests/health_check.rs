//! Integration tests for the startup diagnostics

use cube_gl::config::AppConfig;
use cube_gl::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_default_checks_are_healthy() {
    colored::control::set_override(false);
    let report = health::run_all_checks();

    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
        eprintln!("{}", health::format_details(&report));
    }

    // The graphics check depends on the machine; everything else must not fail
    for entry in &report.entries {
        if entry.name != GraphicsBackendCheck::new().name() {
            assert!(
                entry.result.status.is_ok(),
                "{} failed: {}",
                entry.name,
                entry.result.message
            );
        }
    }
    assert_eq!(report.total(), 5);
}

#[test]
fn test_platform_check() {
    let result = PlatformCheck::new().check();
    assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
}

#[test]
fn test_shipped_profiles_pass_config_check() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
    let result = ConfigCheck::new()
        .in_dir(dir)
        .with_env_vars(config::Map::new())
        .check();
    assert_eq!(result.status, CheckStatus::Pass, "{:?}", result.details);
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();
    assert!(result.status.is_ok(), "{}", result.message);
    assert!(!result.details.is_empty());
}

#[test]
fn test_system_info_check() {
    let result = SystemInfoCheck::new().check();
    assert!(result.status.is_ok(), "{}", result.message);
}

#[test]
fn test_os_override_reaches_platform_check() {
    let mut config = AppConfig::default();
    config.platform.os_name = Some("Solaris".to_string());

    let report = HealthCheckRunner::new()
        .add_check(PlatformCheck::with_os_name("Solaris"))
        .run();
    assert_eq!(report.exit_code(), 1);

    let report = health::default_runner(&config).run();
    let platform = report.get("Platform").unwrap();
    assert_eq!(platform.status, CheckStatus::Fail);
    assert_eq!(platform.message, "unsupported operating system: Solaris");
    assert!(!report.is_healthy());
}

#[test]
fn test_report_renders_every_check() {
    colored::control::set_override(false);
    let report = HealthCheckRunner::new()
        .add_check(PlatformCheck::new())
        .add_check(BuildInfoCheck::new())
        .run();

    let output = health::format_report(&report);
    assert!(output.contains("Platform"));
    assert!(output.contains("Build Info"));
    assert!(output.contains("2 checks"));
}
