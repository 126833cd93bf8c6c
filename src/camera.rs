//! Free-look camera producing view and projection matrices
//!
//! Orientation is kept as yaw/pitch in degrees. Yaw -90° looks down -Z, so
//! the default camera at (0, 0, 3) faces the origin.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Pitch is clamped to this many degrees either side of the horizon
pub const PITCH_LIMIT: f32 = 89.0;

const DEFAULT_YAW: f32 = -90.0;

/// First-person camera with perspective projection
#[derive(Debug, Clone)]
pub struct FlyCamera {
    position: Vec3,
    front: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    fov_y: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl FlyCamera {
    /// Creates a camera; `fov_y` is in radians
    pub fn new(position: Vec3, fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: 0.0,
            fov_y,
            aspect_ratio,
            near,
            far,
        };
        camera.update_vectors();
        camera
    }

    /// Creates a camera from configuration for a viewport of the given size
    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = Self::new(
            Vec3::from_array(config.position),
            config.fov_degrees.to_radians(),
            1.0,
            config.near,
            config.far,
        );
        camera.set_viewport(width, height);
        camera
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
    }

    /// Adds yaw and pitch offsets in degrees
    pub fn rotate(&mut self, yaw_offset: f32, pitch_offset: f32, constrain_pitch: bool) {
        self.yaw += yaw_offset;
        self.pitch += pitch_offset;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Moves along the camera's right and front vectors and the world up axis
    pub fn translate(&mut self, right: f32, up: f32, forward: f32) {
        self.position += self.front * forward + self.right * right + self.world_up * up;
    }

    /// Updates the aspect ratio; a zero-height viewport (minimized) is ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.world_up)
    }

    /// Perspective projection with a 0..1 depth range
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}
