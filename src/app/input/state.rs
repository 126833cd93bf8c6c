//! Raw input state

use std::collections::HashMap;

use winit::keyboard::KeyCode;

/// Raw input state snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
}

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }
}

/// Keyboard input state
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Keys seen since startup; released keys settle to `Released`
    pub keys: HashMap<KeyCode, ButtonState>,
    pub modifiers: Modifiers,
}

impl KeyboardState {
    /// State of a key (`Released` if never seen)
    pub fn key(&self, key: KeyCode) -> ButtonState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.key(key).is_down()
    }

    pub fn is_just_pressed(&self, key: KeyCode) -> bool {
        self.key(key).is_just_pressed()
    }

    /// Records a press; repeats of a held key are not edges
    pub fn press(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        if !state.is_down() {
            *state = ButtonState::JustPressed;
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        if state.is_down() {
            *state = ButtonState::JustReleased;
        }
    }

    /// Releases every held key (e.g. when focus is lost)
    pub fn release_all(&mut self) {
        for state in self.keys.values_mut() {
            if state.is_down() {
                *state = ButtonState::JustReleased;
            }
        }
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all key states for next frame
    pub fn advance_frame(&mut self) {
        for state in self.keyboard.keys.values_mut() {
            *state = state.advance();
        }
    }
}
