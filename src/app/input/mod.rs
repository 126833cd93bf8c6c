//! Keyboard input handling
//!
//! ```text
//! Raw Input (winit) → InputCollector → InputState → CameraController
//! ```
//!
//! The collector is fed every window event; once per frame the loop reads
//! the state and then calls `advance_frame` so `JustPressed`/`JustReleased`
//! edges are visible for exactly one frame.

mod collector;
mod state;

pub use collector::InputCollector;
pub use state::{ButtonState, InputState, KeyboardState, Modifiers};
