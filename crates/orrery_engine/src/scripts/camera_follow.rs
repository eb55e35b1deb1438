//! Keeps the orbit camera centred on an object

use std::any::Any;

use crate::foundation::math::Vec3;
use crate::scene::{BehaviorScript, SceneResult, ScriptContext};

/// Moves the camera target to the owning object's position every frame
///
/// Attach it after the scripts that move the object so the camera sees the
/// position of the current frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraFollowScript {
    offset: Vec3,
}

impl CameraFollowScript {
    /// Follow the object itself
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow a point displaced from the object
    pub fn with_offset(offset: Vec3) -> Self {
        Self { offset }
    }
}

impl BehaviorScript for CameraFollowScript {
    fn name(&self) -> &str {
        "camera_follow"
    }

    fn start(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        ctx.camera.set_target(ctx.transform.position + self.offset);
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        ctx.camera.set_target(ctx.transform.position + self.offset);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
