//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of matrix constructors the
//! scene layer needs. Rendering math is `f32`; celestial physics runs in SI
//! units and uses the `f64` aliases.

pub use nalgebra::{Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Double precision 3D vector used for physical (SI) quantities
pub type DVec3 = Vector3<f64>;

/// Double precision 4x4 matrix
pub type DMat4 = Matrix4<f64>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert a physical position to scene units, narrowing to `f32`
    pub fn scale_to_scene(value: &super::DVec3, scale: f64) -> super::Vec3 {
        super::Vec3::new(
            (value.x * scale) as f32,
            (value.y * scale) as f32,
            (value.z * scale) as f32,
        )
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis (radians)
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis (radians)
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis (radians)
    fn rotation_z(angle: f32) -> Mat4;

    /// Create an OpenGL-style perspective projection (depth mapped to [-1, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Copy of this matrix with the translation column zeroed
    fn without_translation(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }

    fn without_translation(&self) -> Mat4 {
        let mut result = *self;
        result[(0, 3)] = 0.0;
        result[(1, 3)] = 0.0;
        result[(2, 3)] = 0.0;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_y_quarter_turn() {
        let rotated = Mat4::rotation_y(constants::PI / 2.0).transform_vector(&Vec3::x());
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_maps_target_onto_negative_z() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros(), Vec3::y());
        let target_in_view = view.transform_point(&Point3::origin());
        assert_relative_eq!(target_in_view.coords, Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-6);
    }

    #[test]
    fn test_without_translation_keeps_rotation() {
        let matrix = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0)) * Mat4::rotation_z(0.3);
        let stripped = matrix.without_translation();
        assert_relative_eq!(stripped.column(3).xyz(), Vec3::zeros());
        assert_relative_eq!(
            stripped.fixed_view::<3, 3>(0, 0).into_owned(),
            matrix.fixed_view::<3, 3>(0, 0).into_owned()
        );
    }
}
