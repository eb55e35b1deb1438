//! Constant spin about one axis

use std::any::Any;

use super::Axis;
use crate::scene::{BehaviorScript, SceneResult, ScriptContext};

/// Adds `step_degrees × delta` to one rotation axis every frame
#[derive(Debug, Clone, PartialEq)]
pub struct RotatorScript {
    axis: Axis,
    step_degrees: f32,
}

impl RotatorScript {
    /// Spin about `axis` by `step_degrees` per ideal frame
    pub fn new(axis: Axis, step_degrees: f32) -> Self {
        Self { axis, step_degrees }
    }

    /// Axis being rotated
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Default for RotatorScript {
    fn default() -> Self {
        Self::new(Axis::Y, 1.0)
    }
}

impl BehaviorScript for RotatorScript {
    fn name(&self) -> &str {
        "rotator"
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        let step = self.step_degrees * ctx.delta() as f32;
        let angle = &mut ctx.transform.rotation[self.axis.index()];
        *angle = (*angle + step).rem_euclid(360.0);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneObject;
    use crate::scripts::test_support::Harness;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotates_by_step_per_frame() {
        let mut harness = Harness::new(SceneObject::new("cube").with_script(RotatorScript::default()));
        for _ in 0..10 {
            harness.step();
        }
        let rotation = harness.object().transform().rotation;
        assert_relative_eq!(rotation.y, 10.0, epsilon = 1e-3);
        assert_relative_eq!(rotation.x, 0.0);
        assert_relative_eq!(rotation.z, 0.0);
    }

    #[test]
    fn test_angle_wraps_at_full_turn() {
        let mut harness =
            Harness::new(SceneObject::new("cube").with_script(RotatorScript::new(Axis::Z, 100.0)));
        for _ in 0..4 {
            harness.step();
        }
        assert_relative_eq!(harness.object().transform().rotation.z, 40.0, epsilon = 1e-3);
    }
}
