//! Sinusoidal displacement along one axis

use std::any::Any;

use super::Axis;
use crate::foundation::math::Vec3;
use crate::scene::{BehaviorScript, SceneResult, ScriptContext};

/// Sets one position component to `sin(phase) · amplitude`
///
/// The phase starts at zero and advances by `phase_step × delta` per frame.
/// The other two components are left as they are.
#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorScript {
    axis: Axis,
    amplitude: f32,
    phase_step: f32,
    phase: f32,
    start_position: Option<Vec3>,
}

impl OscillatorScript {
    /// Oscillate along `axis` between `-amplitude` and `amplitude`
    pub fn new(axis: Axis, amplitude: f32, phase_step: f32) -> Self {
        Self {
            axis,
            amplitude,
            phase_step,
            phase: 0.0,
            start_position: None,
        }
    }

    /// Bob up and down: y axis, amplitude 2, 0.03 rad per frame
    pub fn up_down() -> Self {
        Self::new(Axis::Y, 2.0, 0.03)
    }

    /// Move towards and away from the camera: z axis, 0.01 rad per frame
    pub fn zoom_in_out(amplitude: f32) -> Self {
        Self::new(Axis::Z, amplitude, 0.01)
    }

    /// Builder pattern: move the object here when the scene starts
    pub fn starting_at(mut self, position: Vec3) -> Self {
        self.start_position = Some(position);
        self
    }

    /// Current phase in radians
    pub fn phase(&self) -> f32 {
        self.phase
    }
}

impl BehaviorScript for OscillatorScript {
    fn name(&self) -> &str {
        "oscillator"
    }

    fn start(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        if let Some(position) = self.start_position {
            ctx.transform.position = position;
        }
        self.phase = 0.0;
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        ctx.transform.position[self.axis.index()] = self.phase.sin() * self.amplitude;
        self.phase += self.phase_step * ctx.delta() as f32;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
