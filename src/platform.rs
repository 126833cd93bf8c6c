//! Host platform detection and native bundle selection
//!
//! The host operating system is identified by name and matched against a
//! closed set of patterns. Each supported platform owns exactly one native
//! bundle and a set of preferred GPU backends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Case-insensitive OS-name substrings, checked in order
const OS_PATTERNS: [(&str, Platform); 3] = [
    ("linux", Platform::Linux),
    ("mac", Platform::MacOs),
    ("windows", Platform::Windows),
];

/// Error raised when host identification does not resolve to a platform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The OS name matched none of the known patterns
    #[error("unsupported operating system: {os_name}")]
    Unsupported {
        /// The OS name exactly as it was reported
        os_name: String,
    },
}

/// Supported host platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// All supported platforms
    pub const ALL: [Platform; 3] = [Platform::Linux, Platform::MacOs, Platform::Windows];

    /// Resolves a platform from an OS name such as `"Mac OS X"` or `"Windows 11"`
    pub fn from_os_name(os_name: &str) -> Result<Self, PlatformError> {
        let lowered = os_name.to_lowercase();

        OS_PATTERNS
            .iter()
            .find(|(pattern, _)| lowered.contains(pattern))
            .map(|(_, platform)| *platform)
            .ok_or_else(|| PlatformError::Unsupported {
                os_name: os_name.to_string(),
            })
    }

    /// Detects the platform this process runs on
    pub fn detect() -> Result<Self, PlatformError> {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Resolves the platform, preferring an explicit OS name over detection
    pub fn resolve(os_name_override: Option<&str>) -> Result<Self, PlatformError> {
        match os_name_override {
            Some(os_name) => Self::from_os_name(os_name),
            None => Self::detect(),
        }
    }

    /// Identifier of the native library bundle for this platform
    pub fn native_bundle(self) -> &'static str {
        match self {
            Platform::Linux => "natives-linux",
            Platform::MacOs => "natives-macos",
            Platform::Windows => "natives-windows",
        }
    }

    /// Short lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
        }
    }

    /// GPU backends to try first on this platform
    ///
    /// GL stays in the set wherever the platform ships a usable driver, so an
    /// OpenGL context remains reachable when no modern API is available.
    pub fn preferred_backends(self) -> wgpu::Backends {
        match self {
            Platform::Linux => wgpu::Backends::VULKAN | wgpu::Backends::GL,
            Platform::MacOs => wgpu::Backends::METAL,
            Platform::Windows => {
                wgpu::Backends::DX12 | wgpu::Backends::VULKAN | wgpu::Backends::GL
            }
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_os_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_os_names_map_to_bundles() {
        let cases = [
            ("Linux", "natives-linux"),
            ("Mac OS X", "natives-macos"),
            ("Windows 11", "natives-windows"),
        ];

        for (os_name, bundle) in cases {
            let platform = Platform::from_os_name(os_name).unwrap();
            assert_eq!(platform.native_bundle(), bundle, "os name {os_name:?}");
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(Platform::from_os_name("LINUX").unwrap(), Platform::Linux);
        assert_eq!(Platform::from_os_name("macos").unwrap(), Platform::MacOs);
        assert_eq!(Platform::from_os_name("MacOS").unwrap(), Platform::MacOs);
        assert_eq!(
            Platform::from_os_name("wInDoWs Server 2022").unwrap(),
            Platform::Windows
        );
    }

    #[test]
    fn test_rust_target_os_names() {
        assert_eq!(Platform::from_os_name("linux").unwrap(), Platform::Linux);
        assert_eq!(Platform::from_os_name("macos").unwrap(), Platform::MacOs);
        assert_eq!(Platform::from_os_name("windows").unwrap(), Platform::Windows);
    }

    #[test]
    fn test_unsupported_os_keeps_original_name() {
        let err = Platform::from_os_name("FreeBSD").unwrap_err();
        assert_eq!(
            err,
            PlatformError::Unsupported {
                os_name: "FreeBSD".to_string()
            }
        );
        assert!(err.to_string().contains("FreeBSD"));
    }

    #[test]
    fn test_empty_os_name_is_unsupported() {
        assert!(Platform::from_os_name("").is_err());
        assert!(Platform::from_os_name("   ").is_err());
    }

    #[test]
    fn test_resolve_prefers_override() {
        assert_eq!(Platform::resolve(Some("Windows 10")).unwrap(), Platform::Windows);
        assert!(Platform::resolve(Some("Haiku")).is_err());
    }

    #[test]
    fn test_detect_on_supported_host() {
        // Builds only succeed on supported targets
        let platform = Platform::detect().unwrap();
        assert_eq!(platform.native_bundle(), env!("CUBEGL_NATIVE_BUNDLE"));
    }

    #[test]
    fn test_from_str_and_display() {
        let platform: Platform = "Mac OS X".parse().unwrap();
        assert_eq!(platform.to_string(), "macos");
        assert!("Solaris".parse::<Platform>().is_err());
    }

    #[test]
    fn test_every_platform_prefers_some_backend() {
        for platform in Platform::ALL {
            assert!(!platform.preferred_backends().is_empty());
        }
    }
}
