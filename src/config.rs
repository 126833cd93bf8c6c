//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, Map};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides (e.g. `CUBEGL_WINDOW__WIDTH=1280`)
pub const ENV_PREFIX: &str = "CUBEGL";

/// Environment variable selecting the configuration profile
pub const PROFILE_ENV_VAR: &str = "CUBEGL_PROFILE";

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: f64,
    /// Window height in logical pixels
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
    /// Whether to enable vsync
    pub vsync: bool,
    /// Optional path to an image used as the window icon
    pub icon: Option<PathBuf>,
    /// Append frame rate and camera position to the title
    pub show_stats_in_title: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "CubeGl".to_string(),
            width: 800.0,
            height: 800.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
            vsync: true,
            icon: None,
            show_stats_in_title: false,
        }
    }
}

/// Which GPU backends the context may be created on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendPreference {
    /// The platform's preferred backends
    #[default]
    Auto,
    /// OpenGL only
    Gl,
    /// Every backend wgpu was built with
    All,
}

/// GPU adapter power preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerPreference {
    #[default]
    LowPower,
    HighPerformance,
}

impl From<PowerPreference> for wgpu::PowerPreference {
    fn from(preference: PowerPreference) -> Self {
        match preference {
            PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
            PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
        }
    }
}

/// Rendering context configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    pub backend: BackendPreference,
    pub power_preference: PowerPreference,
    /// RGBA color the frame is cleared to
    pub clear_color: [f64; 4],
    /// Allocate and clear a depth buffer alongside the surface
    pub depth_buffer: bool,
    pub max_frame_latency: u32,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            backend: BackendPreference::Auto,
            power_preference: PowerPreference::LowPower,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            depth_buffer: true,
            max_frame_latency: 2,
        }
    }
}

/// Frame pacing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frame rate cap; `None` leaves pacing to vsync
    pub target_fps: Option<u32>,
    /// Upper bound for a single frame delta, in seconds
    pub max_delta_secs: f32,
    /// How often frame statistics are refreshed, in seconds
    pub stats_interval_secs: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_fps: None,
            max_delta_secs: 0.25,
            stats_interval_secs: 1.0,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial world position
    pub position: [f32; 3],
    /// Translation speed in world units per second
    pub move_speed: f32,
    /// Rotation speed in degrees per second
    pub rotation_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            position: [0.0, 0.0, 3.0],
            move_speed: 5.0,
            rotation_speed: 80.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter (error, warn, info, debug, trace)
    pub level: String,
    /// Colored output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
        }
    }
}

/// Host platform configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Overrides host OS identification
    pub os_name: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    pub window: WindowConfig,
    pub graphics: GraphicsConfig,
    pub frame: FrameConfig,
    pub camera: CameraConfig,
    pub logging: LoggingConfig,
    pub platform: PlatformConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            window: WindowConfig::default(),
            graphics: GraphicsConfig::default(),
            frame: FrameConfig::default(),
            camera: CameraConfig::default(),
            logging: LoggingConfig::default(),
            platform: PlatformConfig::default(),
        }
    }
}

/// `CUBEGL_` variables; nested fields use `__` (e.g. `CUBEGL_WINDOW__WIDTH`)
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Sources, lowest priority first:
    /// 1. Built-in defaults
    /// 2. config/{profile}.toml
    /// 3. Environment variables with prefix CUBEGL_ (e.g., CUBEGL_WINDOW__WIDTH=1920)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_dir(), profile)
    }

    /// Directory `load` reads profiles from
    pub fn config_dir() -> PathBuf {
        Self::find_config_dir().unwrap_or_else(|| PathBuf::from("config"))
    }

    /// Loads configuration for a profile from an explicit directory
    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(dir, profile, None)
    }

    /// Like [`AppConfig::load_from`], reading overrides from `vars` instead of
    /// the process environment when given
    pub fn load_with_env(
        dir: &Path,
        profile: &str,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let profile_path = dir.join(profile);

        let config = Config::builder()
            .add_source(File::from(profile_path.as_path()).required(false))
            .add_source(environment().source(vars))
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the CUBEGL_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var(PROFILE_ENV_VAR).unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }
}
