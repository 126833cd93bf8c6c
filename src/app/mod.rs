//! Windowing, rendering context and the main loop

pub mod controls;
pub mod frame;
pub mod graphics;
pub mod input;
pub mod lifecycle;
mod runner;
pub mod window;

pub use graphics::GraphicsContext;
pub use lifecycle::{Lifecycle, LifecycleState, LoopControl, ShutdownReason};
pub use runner::App;
pub use window::window_attributes_from_config;
