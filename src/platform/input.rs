//! Host key-name mapping
//!
//! Browsers report keys by `KeyboardEvent.key` strings; map those onto the
//! game's key set.

use crate::sim::{Key, KeyAction, KeyEvent};

/// Map a DOM `KeyboardEvent.key` value to a game key
pub fn key_from_web(key: &str) -> Key {
    match key {
        "ArrowLeft" | "Left" => Key::Left,
        "ArrowRight" | "Right" => Key::Right,
        "Enter" => Key::Enter,
        "Escape" | "Esc" => Key::Escape,
        " " | "Spacebar" => Key::Space,
        "a" | "A" => Key::A,
        "d" | "D" => Key::D,
        "p" | "P" => Key::P,
        _ => Key::Other,
    }
}

/// Build a key event from a DOM keydown/keyup
pub fn web_key_event(key: &str, is_down: bool, repeat: bool) -> KeyEvent {
    let action = match (is_down, repeat) {
        (true, true) => KeyAction::Repeat,
        (true, false) => KeyAction::Pressed,
        (false, _) => KeyAction::Released,
    };
    KeyEvent {
        key: key_from_web(key),
        action,
    }
}
