//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like Select, Throw, Exit.
//! Camera movement keys (WASD, QE) are NOT mapped here - they go directly to CameraController.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by input (not camera movement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Pick the marble under the pointer, or drop the held one (left click)
    Select,
    /// Throw the held marble along the view direction (Space)
    Throw,
    /// Replace the oldest thrown marble at its spawn point (Enter)
    Respawn,
    /// Reset camera to starting position (R key)
    ResetCamera,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Toggle mouse-look smoothing (G key)
    ToggleSmoothing,
    /// Exit application (Escape)
    Exit,
}

/// Maps raw input events to semantic actions
///
/// Movement keys (WASD, QE) are NOT mapped here - they go directly
/// to the CameraController. This mapper handles action keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for action keys, `None` for movement keys and releases
    pub fn map_keyboard(key: KeyCode, state: ElementState, repeat: bool) -> Option<InputAction> {
        // Only handle fresh key presses, not releases or auto-repeat
        if state != ElementState::Pressed || repeat {
            return None;
        }

        match key {
            KeyCode::Space => Some(InputAction::Throw),
            KeyCode::Enter | KeyCode::NumpadEnter => Some(InputAction::Respawn),
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyG => Some(InputAction::ToggleSmoothing),
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None, // Movement keys handled by controller
        }
    }

    /// Map mouse button to an action
    ///
    /// Returns `Some(Select)` for a left button press. Select fires on press
    /// rather than on a full click so picking and dropping respond without
    /// waiting for the release; the release itself maps to nothing.
    pub fn map_mouse_button(button: MouseButton, state: ElementState) -> Option<InputAction> {
        if button == MouseButton::Left && state == ElementState::Pressed {
            Some(InputAction::Select)
        } else {
            None
        }
    }
}
