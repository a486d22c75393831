//! Input mapping: raw key events in, explicit `Action` values out.
//!
//! # Invariants
//! - The scene consumes actions, never windowing-library events.
//! - Release events never produce an action.

pub mod action;
pub mod event;

pub use action::{Action, map_key_event};
pub use event::{KeyAction, KeyEvent, KeyParseError, Modifiers};
