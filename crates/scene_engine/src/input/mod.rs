//! Input collaborator interface
//!
//! The scene core never polls the window itself. The application hands it an
//! [`InputSource`] every frame; picking reads the mouse through it.

use serde::{Deserialize, Serialize};

/// Mouse buttons the core can react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
    /// Wheel button
    Middle,
}

/// Per-frame state of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Not pressed
    #[default]
    Idle,
    /// Went down this frame
    Down,
    /// Held since an earlier frame
    Held,
    /// Released this frame
    Up,
}

/// Input collaborator consumed by the scene manager
pub trait InputSource {
    /// Current state of a mouse button
    fn mouse_button_state(&self, button: MouseButton) -> ButtonState;

    /// Mouse position in screen pixels (origin top-left, Y grows downward)
    fn mouse_position(&self) -> (f32, f32);
}

/// Input source that never reports any activity
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn mouse_button_state(&self, _button: MouseButton) -> ButtonState {
        ButtonState::Idle
    }

    fn mouse_position(&self) -> (f32, f32) {
        (0.0, 0.0)
    }
}

/// Snapshot of mouse input for one frame
///
/// Useful for replaying scripted input and for tests.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Screen-space X position (pixels)
    pub screen_x: f32,
    /// Screen-space Y position (pixels)
    pub screen_y: f32,
    /// Left button state
    pub left: ButtonState,
    /// Right button state
    pub right: ButtonState,
    /// Middle button state
    pub middle: ButtonState,
}

impl MouseState {
    /// Mouse at a position with no buttons pressed
    pub fn at(screen_x: f32, screen_y: f32) -> Self {
        Self {
            screen_x,
            screen_y,
            ..Default::default()
        }
    }

    /// Builder: mark a button as pressed this frame
    pub fn with_press(mut self, button: MouseButton) -> Self {
        match button {
            MouseButton::Left => self.left = ButtonState::Down,
            MouseButton::Right => self.right = ButtonState::Down,
            MouseButton::Middle => self.middle = ButtonState::Down,
        }
        self
    }
}

impl InputSource for MouseState {
    fn mouse_button_state(&self, button: MouseButton) -> ButtonState {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }

    fn mouse_position(&self) -> (f32, f32) {
        (self.screen_x, self.screen_y)
    }
}

/// Convert screen coordinates to Normalized Device Coordinates (NDC)
///
/// NDC range: [-1, 1] where X grows right and Y grows up, so the screen Y
/// axis (which grows downward) is flipped.
pub fn screen_to_ndc(screen_x: f32, screen_y: f32, viewport_width: f32, viewport_height: f32) -> (f32, f32) {
    let ndc_x = screen_x * 2.0 / viewport_width - 1.0;
    let ndc_y = 1.0 - screen_y * 2.0 / viewport_height;
    (ndc_x, ndc_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_ndc_center() {
        let (ndc_x, ndc_y) = screen_to_ndc(960.0, 540.0, 1920.0, 1080.0);
        assert!(ndc_x.abs() < 0.001);
        assert!(ndc_y.abs() < 0.001);
    }

    #[test]
    fn test_screen_to_ndc_corners() {
        let (ndc_x, ndc_y) = screen_to_ndc(0.0, 0.0, 1920.0, 1080.0);
        assert!((ndc_x + 1.0).abs() < 0.001); // Left edge
        assert!((ndc_y - 1.0).abs() < 0.001); // Top edge maps to +Y

        let (ndc_x, ndc_y) = screen_to_ndc(1920.0, 1080.0, 1920.0, 1080.0);
        assert!((ndc_x - 1.0).abs() < 0.001);
        assert!((ndc_y + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_mouse_state_press() {
        let mouse = MouseState::at(10.0, 20.0).with_press(MouseButton::Right);
        assert_eq!(mouse.mouse_button_state(MouseButton::Right), ButtonState::Down);
        assert_eq!(mouse.mouse_button_state(MouseButton::Left), ButtonState::Idle);
        assert_eq!(mouse.mouse_position(), (10.0, 20.0));
    }
}
