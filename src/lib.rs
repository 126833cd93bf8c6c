//! CubeGl
//!
//! Platform bootstrapper: resolves the host OS to a native bundle, opens a
//! window with a hardware-accelerated context and drives the frame loop
//! until the user closes it.

/// Windowing, rendering context, input and the main loop
pub mod app;

/// Build-time information (git SHA, target, native bundle)
pub mod build_info;

/// Free-look camera
pub mod camera;

/// Layered configuration (files and environment)
pub mod config;

pub mod error;

/// Startup diagnostics
pub mod health;

pub mod logging;

/// Host OS detection and native bundle selection
pub mod platform;

pub use app::App;
pub use config::AppConfig;
pub use error::BootstrapError;
pub use platform::Platform;
