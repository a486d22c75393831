use crate::event::{KeyAction, KeyEvent};
use tetraview_common::Key;

/// A high-level action the scene understands.
///
/// The scene consumes actions, never raw input events, so any host (winit,
/// a script, a test) drives it the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move or rotate the camera. `modifier` selects rotation.
    Camera { key: Key, modifier: bool },
    /// Input with no effect on the scene.
    Noop,
}

/// Map a raw key event to an action.
///
/// Presses and auto-repeats of the arrow keys drive the camera. The rotate
/// modifier counts only when shift is the sole modifier held.
pub fn map_key_event(event: &KeyEvent) -> Action {
    let action = if event.action == KeyAction::Release || !event.key.is_arrow() {
        Action::Noop
    } else {
        Action::Camera {
            key: event.key,
            modifier: event.modifiers.is_shift_only(),
        }
    };
    tracing::trace!(%event, ?action, "mapped key event");
    action
}
