//! Window events delivered to the scene.
//!
//! The scene does not pump a window itself. The host translates whatever
//! its windowing layer reports into [`WindowEvent`] values and hands them to
//! [`Scene::event`](crate::scene::tree::Scene::event), which forwards them
//! depth-first to widgets and components.

use serde::{Deserialize, Serialize};

/// Physical mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// One input or window notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WindowEvent {
    /// Pointer moved to window coordinates `(x, y)`.
    MouseMoved { x: f32, y: f32 },
    MouseButtonPressed { button: MouseButton },
    MouseButtonReleased { button: MouseButton },
    /// Keyboard key went down. `code` is the host's key code.
    KeyPressed { code: i32 },
    KeyReleased { code: i32 },
    /// The window was resized. The scene root takes the new size.
    Resized { width: f32, height: f32 },
}

impl WindowEvent {
    pub fn is_mouse(&self) -> bool {
        matches!(
            self,
            WindowEvent::MouseMoved { .. }
                | WindowEvent::MouseButtonPressed { .. }
                | WindowEvent::MouseButtonReleased { .. }
        )
    }
}
