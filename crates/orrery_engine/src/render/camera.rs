//! # Orbit Camera
//!
//! A camera parameterized by an orbit target, a distance from it (radius) and
//! two angles (yaw, pitch) instead of a free-flight position.
//!
//! ## Invariants
//! - The eye position is never set directly. It is re-derived from
//!   `{target, radius, yaw, pitch}` whenever one of them changes.
//! - The basis is re-orthonormalized (front, then right, then up) on the same
//!   occasions.
//! - Pitch is kept inside [-89°, 89°] by [`Camera::rotate`] so that `front`
//!   never becomes parallel to the world-up vector.

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Default yaw in degrees; with the default radius the eye sits on +z
pub const DEFAULT_YAW: f32 = 90.0;
/// Default distance from target to eye
pub const DEFAULT_RADIUS: f32 = 30.0;
/// Default pitch in degrees
pub const DEFAULT_PITCH: f32 = 0.0;
/// Default pan speed (world units per input unit)
pub const DEFAULT_SPEED: f32 = 0.005;
/// Default rotation sensitivity (degrees per input unit)
pub const DEFAULT_SENSITIVITY: f32 = 0.01;
/// Default zoom, used as vertical field of view in degrees
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch limit in degrees
pub const PITCH_LIMIT: f32 = 89.0;
/// Smallest zoom value
pub const MIN_ZOOM: f32 = 1.0;
/// Largest zoom value
pub const MAX_ZOOM: f32 = 45.0;

/// Orbit camera
///
/// # Coordinate System
/// Right-handed, Y-up. The offset from target to eye is
/// `radius · (cos yaw · cos pitch, sin pitch, sin yaw · cos pitch)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,
    zoom: f32,

    target: Vec3,
    radius: f32,

    movement_speed: f32,
    mouse_sensitivity: f32,
}

impl Camera {
    /// Create an orbit camera around `target`
    ///
    /// # Arguments
    /// * `target` - Orbit centre in world space
    /// * `radius` - Distance from target to eye
    /// * `yaw` - Horizontal angle in degrees
    /// * `pitch` - Vertical angle in degrees (not clamped here)
    pub fn new(target: Vec3, radius: f32, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position: Vec3::zeros(),
            front: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::zeros(),
            up: Vec3::zeros(),
            world_up: Vec3::y(),
            yaw,
            pitch,
            zoom: DEFAULT_ZOOM,
            target,
            radius,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
        };
        camera.update_vectors();
        camera
    }

    /// Build a camera from configuration
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.target, config.radius, config.yaw, config.pitch);
        camera.movement_speed = config.movement_speed;
        camera.mouse_sensitivity = config.mouse_sensitivity;
        camera.zoom = config.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        camera
    }

    /// Builder pattern: use a different world-up vector
    pub fn with_world_up(mut self, world_up: Vec3) -> Self {
        self.world_up = world_up.normalize();
        self.update_vectors();
        self
    }

    /// Builder pattern: set pan speed and rotation sensitivity
    pub fn with_input_scale(mut self, movement_speed: f32, mouse_sensitivity: f32) -> Self {
        self.movement_speed = movement_speed;
        self.mouse_sensitivity = mouse_sensitivity;
        self
    }

    /// Re-derive the eye position and basis from target, radius, yaw and pitch
    ///
    /// Pitch is not clamped here; at exactly ±90° the right vector degenerates.
    pub fn update_vectors(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);
        let offset = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.position = self.target + offset * self.radius;

        self.front = (self.target - self.position).normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }

    /// Right-handed look-at matrix from position, target and up
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Move the orbit target in the camera plane
    ///
    /// The eye follows the target, so the orbit distance is unchanged.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let right = self.front.cross(&self.up).normalize();
        let velocity = (right * delta_x + self.up.normalize() * delta_y) * self.movement_speed;
        self.target += velocity;
        self.update_vectors();
    }

    /// Orbit around the target
    ///
    /// Offsets are scaled by the mouse sensitivity and added to yaw and pitch.
    /// With `clamp_pitch` the pitch stays in [-89°, 89°].
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32, clamp_pitch: bool) {
        self.yaw += delta_x * self.mouse_sensitivity;
        self.pitch += delta_y * self.mouse_sensitivity;

        if clamp_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Narrow or widen the field of view; the result stays in [1, 45]
    pub fn zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom - delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Move the orbit centre to `target`
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update_vectors();
    }

    /// Change the orbit distance
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.update_vectors();
    }

    /// Set yaw and pitch directly (degrees), clamping pitch
    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Eye position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit vector from the eye towards the target
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// World-up reference vector
    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Zoom value, used as vertical field of view in degrees
    pub fn zoom_level(&self) -> f32 {
        self.zoom
    }

    /// Orbit centre
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Orbit distance
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Pan speed
    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    /// Rotation sensitivity
    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
