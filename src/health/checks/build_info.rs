//! Build metadata check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Reports the metadata embedded by `build.rs`
#[derive(Debug, Default)]
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Build metadata (git, rustc, target)")
    }

    fn check(&self) -> CheckResult {
        let details = build_info::detailed_info()
            .lines()
            .map(str::to_string)
            .collect();

        // Builds from a source tarball have no git metadata
        if build_info::GIT_SHA == "unknown" {
            CheckResult::warn(format!(
                "{} (no git metadata)",
                build_info::version_string()
            ))
            .with_details(details)
        } else {
            CheckResult::pass(build_info::version_string()).with_details(details)
        }
    }
}
