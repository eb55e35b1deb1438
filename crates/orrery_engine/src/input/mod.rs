//! Mouse input mapped onto the orbit camera
//!
//! Windowing lives outside the engine. The host forwards raw mouse events as
//! [`InputEvent`]s and [`CameraInput`] turns them into camera operations:
//!
//! - left drag rotates around the target
//! - right drag pans the target
//! - each wheel notch zooms by one step
//!
//! Screen y grows downwards, so vertical movement is inverted.

use crate::render::Camera;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Raw mouse event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button went down
    ButtonPressed(MouseButton),
    /// A button went up
    ButtonReleased(MouseButton),
    /// Relative pointer motion in screen pixels
    MouseMoved {
        /// Horizontal movement, positive to the right
        dx: f32,
        /// Vertical movement, positive downwards
        dy: f32,
    },
    /// Wheel scrolled; negative values scroll up
    Wheel {
        /// Scroll amount in any unit, only the sign is used
        delta_y: f32,
    },
}

/// Tracks the dragging button and applies events to a camera
#[derive(Debug, Clone, Default)]
pub struct CameraInput {
    active_button: Option<MouseButton>,
}

impl CameraInput {
    /// Create with no button held
    pub fn new() -> Self {
        Self::default()
    }

    /// Button currently dragging, if any
    pub fn active_button(&self) -> Option<MouseButton> {
        self.active_button
    }

    /// Apply one event to `camera`
    pub fn handle(&mut self, camera: &mut Camera, event: InputEvent) {
        match event {
            InputEvent::ButtonPressed(button) => self.active_button = Some(button),
            InputEvent::ButtonReleased(button) => {
                if self.active_button == Some(button) {
                    self.active_button = None;
                }
            }
            InputEvent::MouseMoved { dx, dy } => match self.active_button {
                Some(MouseButton::Left) => camera.rotate(dx, -dy, true),
                Some(MouseButton::Right) => camera.pan(dx, -dy),
                Some(MouseButton::Middle) | None => {}
            },
            InputEvent::Wheel { delta_y } => {
                let step = if delta_y <= 0.0 { 1.0 } else { -1.0 };
                camera.zoom(step);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(Vec3::zeros(), 10.0, 0.0, 0.0).with_input_scale(1.0, 1.0)
    }

    #[test]
    fn test_left_drag_rotates_with_inverted_y() {
        let mut input = CameraInput::new();
        let mut camera = camera();
        input.handle(&mut camera, InputEvent::ButtonPressed(MouseButton::Left));
        input.handle(&mut camera, InputEvent::MouseMoved { dx: 5.0, dy: 3.0 });
        assert_relative_eq!(camera.yaw(), 5.0);
        assert_relative_eq!(camera.pitch(), -3.0);
        assert_eq!(camera.target(), Vec3::zeros());
    }

    #[test]
    fn test_right_drag_pans() {
        let mut input = CameraInput::new();
        let mut camera = camera();
        input.handle(&mut camera, InputEvent::ButtonPressed(MouseButton::Right));
        input.handle(&mut camera, InputEvent::MouseMoved { dx: 2.0, dy: 0.0 });
        assert!(camera.target().norm() > 0.0);
        assert_relative_eq!(camera.yaw(), 0.0);
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut input = CameraInput::new();
        let mut camera = camera();
        let before = camera.clone();
        input.handle(&mut camera, InputEvent::MouseMoved { dx: 50.0, dy: 50.0 });
        input.handle(&mut camera, InputEvent::ButtonPressed(MouseButton::Middle));
        input.handle(&mut camera, InputEvent::MouseMoved { dx: 50.0, dy: 50.0 });
        assert_eq!(camera, before);
    }

    #[test]
    fn test_release_of_other_button_keeps_drag() {
        let mut input = CameraInput::new();
        let mut camera = camera();
        input.handle(&mut camera, InputEvent::ButtonPressed(MouseButton::Left));
        input.handle(&mut camera, InputEvent::ButtonReleased(MouseButton::Right));
        assert_eq!(input.active_button(), Some(MouseButton::Left));
        input.handle(&mut camera, InputEvent::ButtonReleased(MouseButton::Left));
        assert_eq!(input.active_button(), None);
    }

    #[test]
    fn test_wheel_steps_zoom_by_one() {
        let mut input = CameraInput::new();
        let mut camera = camera();
        input.handle(&mut camera, InputEvent::Wheel { delta_y: -120.0 });
        assert_relative_eq!(camera.zoom_level(), 44.0);
        input.handle(&mut camera, InputEvent::Wheel { delta_y: 120.0 });
        input.handle(&mut camera, InputEvent::Wheel { delta_y: 3.0 });
        // Zoom is already at its maximum.
        assert_relative_eq!(camera.zoom_level(), 45.0);
    }
}
