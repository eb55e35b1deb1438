//! Transform component
//!
//! Position, Euler rotation and scale of a scene object. The model matrix is
//! derived on demand and never cached, so scripts can mutate the fields freely.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transformation of a scene object
///
/// `rotation` holds Euler angles in degrees. They are applied X first, then Y,
/// then Z, giving `model = T · Rz · Ry · Rx · S`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// Euler angles in degrees (x, y, z)
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set Euler rotation in degrees
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Rotation part of the model matrix, `Rz · Ry · Rx`
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_z(utils::deg_to_rad(self.rotation.z))
            * Mat4::rotation_y(utils::deg_to_rad(self.rotation.y))
            * Mat4::rotation_x(utils::deg_to_rad(self.rotation.x))
    }

    /// Model matrix `T · Rz · Ry · Rx · S`
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation_matrix()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}
