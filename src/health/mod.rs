//! Startup diagnostics
//!
//! Each [`SystemCheck`] inspects one precondition of the bootstrap (host
//! platform, configuration, GPU availability) without opening a window.
//!
//! ```no_run
//! use cube_gl::health::{self, HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(PlatformCheck::new())
//!     .add_check(ConfigCheck::new())
//!     .run();
//!
//! health::print_report(&report);
//! std::process::exit(report.exit_code());
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_details, format_report, print_report};
pub use runner::{CheckEntry, HealthCheckReport, HealthCheckRunner};

use crate::config::AppConfig;

/// Default checks, with the platform override from `config` applied
pub fn default_runner(config: &AppConfig) -> HealthCheckRunner {
    let platform_check = match &config.platform.os_name {
        Some(os_name) => checks::PlatformCheck::with_os_name(os_name.clone()),
        None => checks::PlatformCheck::new(),
    };

    HealthCheckRunner::new()
        .add_check(platform_check)
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SystemInfoCheck::new())
        .add_check(checks::GraphicsBackendCheck::new())
}

/// Runs the default checks against the built-in configuration
pub fn run_all_checks() -> HealthCheckReport {
    default_runner(&AppConfig::default()).run()
}
