//! Circular motion around a fixed point

use std::any::Any;

use crate::celestial::mechanics;
use crate::foundation::math::Vec3;
use crate::scene::{BehaviorScript, SceneResult, ScriptContext};

/// Moves its object on a circle in the x-z plane around `centre`
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitMoverScript {
    centre: Vec3,
    radius: f32,
    angular_velocity: f64,
    angle: f64,
}

impl OrbitMoverScript {
    /// Circle of `radius` scene units, `angular_velocity` radians per ideal frame
    pub fn new(centre: Vec3, radius: f32, angular_velocity: f64) -> Self {
        Self {
            centre,
            radius,
            angular_velocity,
            angle: 0.0,
        }
    }

    /// Builder pattern: start at a given angle (radians)
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Current angle in radians, kept in [0, 2π)
    pub fn angle(&self) -> f64 {
        self.angle
    }

    fn place(&mut self, ctx: &mut ScriptContext<'_>, dt: f64) {
        let (angle, offset) =
            mechanics::orbital_position(f64::from(self.radius), self.angular_velocity, self.angle, dt);
        self.angle = angle.rem_euclid(std::f64::consts::TAU);
        ctx.transform.position = self.centre + offset.cast::<f32>();
    }
}

impl BehaviorScript for OrbitMoverScript {
    fn name(&self) -> &str {
        "orbit_mover"
    }

    fn start(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        self.place(ctx, 0.0);
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        let dt = ctx.delta();
        self.place(ctx, dt);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
