//! Error types for startup and the main loop

use std::path::PathBuf;

use thiserror::Error;

use crate::app::lifecycle::LifecycleError;
use crate::logging::LoggingError;
use crate::platform::PlatformError;

/// Error that can happen while creating the rendering context
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to create async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("surface creation failure: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter found: {0}")]
    AdapterRequest(#[from] wgpu::RequestAdapterError),

    #[error("device creation failure: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("surface is not supported by adapter {adapter}")]
    UnsupportedSurface { adapter: String },
}

/// Error that can happen while loading the window icon
#[derive(Debug, Error)]
pub enum IconError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("invalid icon data: {0}")]
    Invalid(#[from] winit::window::BadIcon),
}

/// Fatal errors that abort the bootstrap
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    UnsupportedPlatform(#[from] PlatformError),

    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),

    #[error("event loop failure: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    #[error("failed to load window icon {path}: {source}")]
    Icon {
        path: PathBuf,
        #[source]
        source: IconError,
    },

    #[error("graphics context creation failure: {0}")]
    Context(#[from] ContextError),

    #[error("render failure: {0}")]
    Render(#[from] wgpu::SurfaceError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
