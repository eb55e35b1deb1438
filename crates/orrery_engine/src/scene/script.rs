//! Behavior scripts
//!
//! A script is attached to exactly one [`SceneObject`](super::SceneObject)
//! and owned by it. Scripts never hold references back to their object or
//! scene; everything they may touch arrives in a [`ScriptContext`] for the
//! duration of one call.

use std::any::Any;

use super::frame::{BodyState, FrameContext, FrameStats};
use super::SceneResult;
use crate::ecs::{ObjectId, TransformComponent};
use crate::foundation::time::Clock;
use crate::render::{Camera, DrawOutcome, GraphicsDevice, ShaderHandle};

/// Borrowed view of the world handed to a script call
pub struct ScriptContext<'a> {
    /// Id of the owning object
    pub object: ObjectId,
    /// Transform of the owning object
    pub transform: &'a mut TransformComponent,
    /// Shader of the owning object, if it has one
    pub shader: Option<ShaderHandle>,
    /// The scene camera
    pub camera: &'a mut Camera,
    /// Frame clock, already ticked for this frame
    pub clock: &'a Clock,
    /// Projection and body snapshot for this frame
    pub frame: &'a FrameContext,
    /// Graphics backend
    pub device: &'a mut dyn GraphicsDevice,
    pub(crate) stats: &'a mut FrameStats,
}

impl ScriptContext<'_> {
    /// Count a draw issued (or skipped) by the script itself
    pub fn record_draw(&mut self, outcome: DrawOutcome) {
        match outcome {
            DrawOutcome::Drawn => self.stats.draws_issued += 1,
            DrawOutcome::Skipped => self.stats.draws_skipped += 1,
        }
    }

    /// Clock delta for this frame
    pub fn delta(&self) -> f64 {
        self.clock.delta()
    }
}

/// Capability interface for per-object behaviors
///
/// `start` runs once before the first frame, `update` once per frame. Both
/// default to doing nothing.
pub trait BehaviorScript: Any {
    /// Name used in logs
    fn name(&self) -> &str;

    /// One-time setup
    fn start(&mut self, _ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        Ok(())
    }

    /// Per-frame step
    fn update(&mut self, _ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        Ok(())
    }

    /// Physical state published into the next frame's body snapshot
    fn body_state(&self) -> Option<BodyState> {
        None
    }

    /// Get as Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Get as mutable Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
