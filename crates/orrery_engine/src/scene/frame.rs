//! Per-frame shared data

use crate::ecs::ObjectId;
use crate::foundation::math::{DVec3, Mat4, Vec3};

/// Physical state a script exposes to the rest of the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Position in metres
    pub position: DVec3,
    /// Radius in metres
    pub radius: f64,
    /// Radiated power in watts, for stars
    pub luminosity: Option<f64>,
}

/// A body as it was when the frame began
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    /// Owning object
    pub object: ObjectId,
    /// Transform position of the owning object, in scene units
    pub scene_position: Vec3,
    /// Physical state
    pub state: BodyState,
}

/// Data fixed for the duration of one frame
///
/// Cross-object reads go through the body snapshot taken before any script
/// runs, so every object sees the same state of its neighbours regardless of
/// registration order. The price is one frame of lag.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameContext {
    /// Clock frame counter
    pub frame: u64,
    /// Projection for this frame
    pub projection: Mat4,
    /// Viewport aspect ratio used for the projection
    pub aspect_ratio: f32,
    bodies: Vec<BodySnapshot>,
}

impl FrameContext {
    /// Create a frame context
    pub fn new(frame: u64, projection: Mat4, aspect_ratio: f32, bodies: Vec<BodySnapshot>) -> Self {
        Self {
            frame,
            projection,
            aspect_ratio,
            bodies,
        }
    }

    /// Snapshot of the body owned by `object`
    pub fn body(&self, object: ObjectId) -> Option<&BodySnapshot> {
        self.bodies.iter().find(|b| b.object == object)
    }

    /// All body snapshots in registration order
    pub fn bodies(&self) -> &[BodySnapshot] {
        &self.bodies
    }
}

/// What one call to `Scene::update` did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Clock frame counter
    pub frame: u64,
    /// Objects whose scripts ran
    pub objects_updated: usize,
    /// Meshes drawn
    pub draws_issued: usize,
    /// Draws skipped because a resource was not ready
    pub draws_skipped: usize,
}
