//! Keyboard camera controls
//!
//! | Keys | Action |
//! |---|---|
//! | W / S | forward / back |
//! | A / D | left / right |
//! | Space / Left Shift | up / down |
//! | Q / E | turn left / right |

use winit::keyboard::KeyCode;

use super::input::KeyboardState;
use crate::camera::FlyCamera;
use crate::config::CameraConfig;

/// Applies held keys to a camera, scaled by frame time
#[derive(Debug, Clone)]
pub struct CameraController {
    /// World units per second
    move_speed: f32,
    /// Degrees per second
    rotation_speed: f32,
}

impl CameraController {
    pub fn new(move_speed: f32, rotation_speed: f32) -> Self {
        Self {
            move_speed,
            rotation_speed,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.move_speed, config.rotation_speed)
    }

    /// Moves and turns `camera` according to the keys held this frame
    ///
    /// Returns true if the camera changed.
    pub fn apply(&self, keyboard: &KeyboardState, delta: f32, camera: &mut FlyCamera) -> bool {
        let axis = |positive: KeyCode, negative: KeyCode| -> f32 {
            let mut value = 0.0;
            if keyboard.is_down(positive) {
                value += 1.0;
            }
            if keyboard.is_down(negative) {
                value -= 1.0;
            }
            value
        };

        let step = self.move_speed * delta;
        let forward = axis(KeyCode::KeyW, KeyCode::KeyS) * step;
        let right = axis(KeyCode::KeyD, KeyCode::KeyA) * step;
        let up = axis(KeyCode::Space, KeyCode::ShiftLeft) * step;
        let yaw = axis(KeyCode::KeyE, KeyCode::KeyQ) * self.rotation_speed * delta;

        // Movement uses the orientation from the start of the frame
        if forward != 0.0 || right != 0.0 || up != 0.0 {
            camera.translate(right, up, forward);
        }
        if yaw != 0.0 {
            camera.rotate(yaw, 0.0, true);
        }

        yaw != 0.0 || forward != 0.0 || right != 0.0 || up != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn setup() -> (CameraController, FlyCamera) {
        let config = CameraConfig::default();
        (
            CameraController::from_config(&config),
            FlyCamera::from_config(&config, 800, 800),
        )
    }

    #[test]
    fn test_idle_keyboard_leaves_camera_alone() {
        let (controller, mut camera) = setup();
        let keyboard = KeyboardState::default();
        assert!(!controller.apply(&keyboard, 0.016, &mut camera));
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_w_moves_forward_at_move_speed() {
        let (controller, mut camera) = setup();
        let mut keyboard = KeyboardState::default();
        keyboard.press(KeyCode::KeyW);

        assert!(controller.apply(&keyboard, 0.5, &mut camera));
        // 5 units/s for half a second along -Z
        assert!(
            camera
                .position()
                .abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-5)
        );
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let (controller, mut camera) = setup();
        let mut keyboard = KeyboardState::default();
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::KeyD);
        keyboard.press(KeyCode::Space);
        keyboard.press(KeyCode::ShiftLeft);

        assert!(!controller.apply(&keyboard, 1.0, &mut camera));
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_q_turns_left_at_rotation_speed() {
        let (controller, mut camera) = setup();
        let mut keyboard = KeyboardState::default();
        keyboard.press(KeyCode::KeyQ);

        controller.apply(&keyboard, 0.25, &mut camera);
        assert!((camera.yaw() - (-90.0 - 20.0)).abs() < 1e-4);
    }

    #[test]
    fn test_released_key_stops_movement() {
        let (controller, mut camera) = setup();
        let mut keyboard = KeyboardState::default();
        keyboard.press(KeyCode::Space);
        keyboard.release(KeyCode::Space);

        assert!(!controller.apply(&keyboard, 1.0, &mut camera));
    }

    #[test]
    fn test_moves_before_turning() {
        let (controller, mut camera) = setup();
        let mut keyboard = KeyboardState::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyE);

        // A quarter turn in one step; the move still goes along -Z
        let controller = CameraController::new(controller.move_speed, 360.0);
        assert!(controller.apply(&keyboard, 0.25, &mut camera));
        assert!(
            camera
                .position()
                .abs_diff_eq(Vec3::new(0.0, 0.0, 1.75), 1e-5)
        );
        assert!((camera.yaw() - 0.0).abs() < 1e-4);
        assert!(camera.front().abs_diff_eq(Vec3::X, 1e-5));
    }
}
