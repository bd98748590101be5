//! Host-neutral input vocabulary
//!
//! The host framework translates its own key codes into these before handing
//! them to the mode state machine, one event at a time.

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Enter,
    Escape,
    Space,
    A,
    D,
    P,
    /// Any key the game ignores
    Other,
}

/// What happened to the key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Pressed,
    Released,
    /// Auto-repeat while held
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    pub const fn pressed(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Pressed,
        }
    }

    pub const fn released(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Released,
        }
    }

    #[inline]
    pub fn is_press(&self) -> bool {
        self.action == KeyAction::Pressed
    }
}

/// Mouse click in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub x: f64,
    pub y: f64,
}
