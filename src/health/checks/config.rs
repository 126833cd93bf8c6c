//! Configuration check

use std::path::PathBuf;

use config::{ConfigError, Map};

use crate::config::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::platform::Platform;

/// Loads each profile and validates the values the bootstrapper depends on
#[derive(Debug)]
pub struct ConfigCheck {
    profiles: Vec<String>,
    dir: Option<PathBuf>,
    vars: Option<Map<String, String>>,
}

impl ConfigCheck {
    pub fn new() -> Self {
        Self::with_profiles(["debug", "release"])
    }

    pub fn with_profiles<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profiles: profiles.into_iter().map(Into::into).collect(),
            dir: None,
            vars: None,
        }
    }

    /// Reads profiles from `dir` instead of the usual search path
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Reads overrides from `vars` instead of the process environment
    pub fn with_env_vars(mut self, vars: Map<String, String>) -> Self {
        self.vars = Some(vars);
        self
    }

    fn load(&self, profile: &str) -> Result<AppConfig, ConfigError> {
        let dir = self.dir.clone().unwrap_or_else(AppConfig::config_dir);
        AppConfig::load_with_env(&dir, profile, self.vars.clone())
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// Problems that would make startup fail or misbehave
fn validate(config: &AppConfig) -> Vec<String> {
    let mut problems = Vec::new();

    if config.window.width <= 0.0 || config.window.height <= 0.0 {
        problems.push(format!(
            "window size {}x{} is not positive",
            config.window.width, config.window.height
        ));
    }
    if config.camera.near <= 0.0 || config.camera.far <= config.camera.near {
        problems.push(format!(
            "camera clip range {}..{} is invalid",
            config.camera.near, config.camera.far
        ));
    }
    if config.frame.max_delta_secs <= 0.0 {
        problems.push("frame.max_delta_secs must be positive".to_string());
    }
    if let Some(icon) = &config.window.icon
        && !icon.exists()
    {
        problems.push(format!("icon {} does not exist", icon.display()));
    }
    if let Some(os_name) = &config.platform.os_name
        && let Err(e) = Platform::from_os_name(os_name)
    {
        problems.push(e.to_string());
    }

    problems
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Profiles load from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failures = 0;

        for profile in &self.profiles {
            match self.load(profile) {
                Ok(config) => {
                    let problems = validate(&config);
                    if problems.is_empty() {
                        details.push(format!(
                            "{profile}: ok ({}x{}, vsync {})",
                            config.window.width, config.window.height, config.window.vsync
                        ));
                    } else {
                        failures += 1;
                        details.push(format!("{profile}: {}", problems.join("; ")));
                    }
                }
                Err(e) => {
                    failures += 1;
                    details.push(format!("{profile}: {e}"));
                }
            }
        }

        if failures > 0 {
            CheckResult::fail(format!(
                "{failures} of {} profiles invalid",
                self.profiles.len()
            ))
            .with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles valid", self.profiles.len()))
                .with_details(details)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::CheckStatus;
    use std::fs;

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigCheck::with_profiles(["a", "b"])
            .in_dir(dir.path())
            .with_env_vars(Map::new())
            .check();
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.message, "2 profiles valid");
    }

    #[test]
    fn test_bad_values_fail() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("broken.toml"),
            "[camera]\nnear = 10.0\nfar = 1.0\n\n[platform]\nos_name = \"Plan 9\"\n",
        )
        .unwrap();

        let result = ConfigCheck::with_profiles(["broken"])
            .in_dir(dir.path())
            .with_env_vars(Map::new())
            .check();
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.details[0].contains("clip range"));
        assert!(result.details[0].contains("unsupported operating system: Plan 9"));
    }

    #[test]
    fn test_unparseable_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.toml"), "[window]\nwidth = \"wide\"\n").unwrap();

        let result = ConfigCheck::with_profiles(["bad"])
            .in_dir(dir.path())
            .with_env_vars(Map::new())
            .check();
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn test_environment_override_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let mut vars = Map::new();
        vars.insert("CUBEGL_WINDOW__WIDTH".to_string(), "0".to_string());

        let result = ConfigCheck::with_profiles(["debug"])
            .in_dir(dir.path())
            .with_env_vars(vars)
            .check();
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.details[0].contains("not positive"));
    }
}
