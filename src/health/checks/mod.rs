//! Built-in checks

mod build_info;
mod config;
mod graphics_backend;
mod platform;
mod system_info;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use graphics_backend::GraphicsBackendCheck;
pub use platform::PlatformCheck;
pub use system_info::SystemInfoCheck;
