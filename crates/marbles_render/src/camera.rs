//! Perspective camera
//!
//! The camera keeps a position plus yaw/pitch angles. Yaw 0 looks down -Z,
//! positive yaw turns left, positive pitch looks up.

use glam::{Mat4, Vec2, Vec3};
use marbles_core::Ray;
use marbles_input::CameraControl;

/// Pitch limit just short of straight up/down, keeps the view basis well defined
const PITCH_LIMIT: f32 = 1.5;

/// Default starting position
pub const DEFAULT_POSITION: Vec3 = Vec3::new(5.0, 5.0, 10.0);
/// Default vertical field of view in degrees
pub const DEFAULT_FOV: f32 = 75.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 1000.0;

/// Perspective camera used for rendering and picking
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport width over height
    pub aspect: f32,

    // Pose restored by `reset`
    start_position: Vec3,
    start_yaw: f32,
    start_pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at(DEFAULT_POSITION, Vec3::ZERO)
    }
}

impl Camera {
    /// Create a camera at `position` facing `target`
    ///
    /// The pose becomes the one restored by [`Camera::reset`].
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let (yaw, pitch) = yaw_pitch_towards(target - position);
        Self {
            position,
            yaw,
            pitch,
            fov: DEFAULT_FOV,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            aspect: 16.0 / 9.0,
            start_position: position,
            start_yaw: yaw,
            start_pitch: pitch,
        }
    }

    /// Builder: set projection parameters
    pub fn with_projection(mut self, fov: f32, near: f32, far: f32) -> Self {
        self.fov = fov;
        self.near = near;
        self.far = far;
        self
    }

    /// Builder: set the aspect ratio
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.set_aspect(aspect);
        self
    }

    /// Recompute the aspect ratio from a viewport size
    ///
    /// Zero-sized viewports (minimized windows) keep the previous aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Return to the starting pose
    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.yaw = self.start_yaw;
        self.pitch = self.start_pitch;
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    /// Unit vector to the right of the view direction, always horizontal
    pub fn right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cy, 0.0, -sy)
    }

    /// Unit vector up relative to the view direction
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Projection with wgpu's 0..1 depth range
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the camera through a point in normalized device coordinates
    ///
    /// `ndc` is in [-1, 1] on both axes with +y up. The center of the screen
    /// gives a ray along [`Camera::forward`].
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let tan_half = (self.fov.to_radians() / 2.0).tan();
        let direction = self.forward()
            + self.right() * (ndc.x * tan_half * self.aspect)
            + self.up() * (ndc.y * tan_half);
        Ray::new(self.position, direction)
    }
}

/// Yaw and pitch that point the view along `direction`
fn yaw_pitch_towards(direction: Vec3) -> (f32, f32) {
    let dir = direction.normalize_or(Vec3::NEG_Z);
    let yaw = (-dir.x).atan2(-dir.z);
    let pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
    (yaw, pitch)
}

impl CameraControl for Camera {
    fn move_local(&mut self, forward: f32, right: f32) {
        self.position += self.forward() * forward + self.right() * right;
    }

    fn move_y(&mut self, delta: f32) {
        self.position.y += delta;
    }

    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}
