//! General-purpose behavior scripts
//!
//! Small behaviors that are not tied to celestial physics: spinning,
//! bobbing, circling, following with the camera and drawing a skybox.

mod camera_follow;
mod orbit_mover;
mod oscillator;
mod rotator;
mod skybox;

pub use camera_follow::CameraFollowScript;
pub use orbit_mover::OrbitMoverScript;
pub use oscillator::OscillatorScript;
pub use rotator::RotatorScript;
pub use skybox::SkyboxScript;

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// Index into a vector
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along the axis
    pub fn unit(self) -> Vec3 {
        let mut v = Vec3::zeros();
        v[self.index()] = 1.0;
        v
    }
}
