//! Screen state machine
//!
//! Key events arrive one at a time from the host and are fully applied before
//! the next. Each event is handled by the active mode only.

use glam::Vec2;

use super::input::{ClickEvent, Key, KeyAction, KeyEvent};
use super::state::{GameMode, GameState, MenuOption};

/// What the host should do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Shut the game down
    Exit,
}

/// Apply one key event to the game
pub fn handle_key(state: &mut GameState, event: KeyEvent) -> Flow {
    if event.key == Key::Escape && event.is_press() {
        log::info!("Escape pressed, exiting");
        return Flow::Exit;
    }

    match state.mode {
        GameMode::Menu | GameMode::Paused => {
            menu_screen(state, event, |state| state.set_mode(GameMode::Playing))
        }
        GameMode::GameOver | GameMode::Win => menu_screen(state, event, GameState::restart),
        GameMode::Playing => {
            playing_screen(state, event);
            Flow::Continue
        }
    }
}

/// Clicks carry no game meaning; they are only traced
pub fn handle_click(_state: &GameState, click: ClickEvent) {
    log::debug!("Click at ({}, {})", click.x, click.y);
}

/// Shared two-option menu: Left/Right release toggles, Enter confirms
fn menu_screen(state: &mut GameState, event: KeyEvent, on_play: impl FnOnce(&mut GameState)) -> Flow {
    match (event.key, event.action) {
        (Key::Left | Key::Right, KeyAction::Released) => {
            state.menu_option = state.menu_option.toggle();
            Flow::Continue
        }
        (Key::Enter, KeyAction::Pressed) => match state.menu_option {
            MenuOption::Exit => {
                log::info!("Exit chosen from {:?}", state.mode);
                Flow::Exit
            }
            MenuOption::Play => {
                on_play(state);
                Flow::Continue
            }
        },
        _ => Flow::Continue,
    }
}

fn playing_screen(state: &mut GameState, event: KeyEvent) {
    let speed = state.config.paddle_speed;
    match (event.key, event.action) {
        (Key::P, KeyAction::Pressed) => state.set_mode(GameMode::Paused),
        (Key::A, KeyAction::Pressed) => state.paddle.set_velocity(Vec2::new(-speed, 0.0)),
        (Key::D, KeyAction::Pressed) => state.paddle.set_velocity(Vec2::new(speed, 0.0)),
        (Key::A | Key::D, KeyAction::Released) => state.paddle.set_velocity(Vec2::ZERO),
        (Key::Space, KeyAction::Pressed) => state.serve(),
        _ => {}
    }
}
