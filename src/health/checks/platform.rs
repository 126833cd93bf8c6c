//! Host platform check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};
use crate::platform::Platform;

/// Resolves the host platform and compares it to the bundle chosen at build time
#[derive(Debug, Default)]
pub struct PlatformCheck {
    os_name: Option<String>,
}

impl PlatformCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks an explicit OS name instead of the detected one
    pub fn with_os_name(os_name: impl Into<String>) -> Self {
        Self {
            os_name: Some(os_name.into()),
        }
    }
}

impl SystemCheck for PlatformCheck {
    fn name(&self) -> &'static str {
        "Platform"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Host OS maps to a supported native bundle")
    }

    fn check(&self) -> CheckResult {
        let platform = match Platform::resolve(self.os_name.as_deref()) {
            Ok(platform) => platform,
            Err(e) => return CheckResult::fail(e.to_string()),
        };

        let details = vec![
            format!("OS name: {}", self.os_name.as_deref().unwrap_or(std::env::consts::OS)),
            format!("Runtime bundle: {}", platform.native_bundle()),
            format!("Build bundle: {}", build_info::NATIVE_BUNDLE),
            format!("Preferred backends: {:?}", platform.preferred_backends()),
        ];

        if platform.native_bundle() == build_info::NATIVE_BUNDLE {
            CheckResult::pass(format!("{platform} ({})", platform.native_bundle()))
                .with_details(details)
        } else {
            CheckResult::warn(format!(
                "{platform} does not match the build target bundle {}",
                build_info::NATIVE_BUNDLE
            ))
            .with_details(details)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::CheckStatus;

    #[test]
    fn test_detected_platform_passes() {
        let result = PlatformCheck::new().check();
        assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
    }

    #[test]
    fn test_unknown_os_fails_with_name() {
        let result = PlatformCheck::with_os_name("FreeBSD").check();
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.message, "unsupported operating system: FreeBSD");
    }

    #[test]
    fn test_foreign_platform_warns() {
        let foreign = Platform::ALL
            .into_iter()
            .find(|p| p.native_bundle() != build_info::NATIVE_BUNDLE)
            .unwrap();
        let result = PlatformCheck::with_os_name(foreign.name()).check();
        assert_eq!(result.status, CheckStatus::Warn);
    }
}
