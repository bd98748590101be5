//! Per-frame simulation step
//!
//! Collisions are resolved against the positions from the previous frame,
//! then everything moves by one Euler step.

use super::collision::resolve_collisions;
use super::state::{GameEvent, GameMode, GameState};

/// Advance the game by `dt` seconds.
///
/// Only the playing screen moves; every other mode is frozen.
pub fn update(state: &mut GameState, dt: f32) {
    if state.mode != GameMode::Playing {
        return;
    }

    resolve_collisions(state);

    // Paddle: input-driven velocity, clamped to the field
    state.paddle.integrate(dt);
    let max_x = state.config.field_width - state.paddle.size().x;
    let paddle_pos = state.paddle.pos();
    state.paddle.sprite.pos.x = paddle_pos.x.clamp(0.0, max_x.max(0.0));

    // Ball: rides the paddle until served
    if state.served {
        state.ball.integrate(dt);
    } else {
        let rest = state.ball_rest_position();
        state.ball.set_pos(rest);
    }

    if state.lives == 0 {
        log::info!("Out of lives, final score {}", state.score);
        state.set_mode(GameMode::GameOver);
        return;
    }

    if state.visible_bricks() == 0 {
        log::info!("All bricks cleared, final score {}", state.score);
        state.set_mode(GameMode::Win);
        return;
    }

    update_gems(state, dt);
}

/// Released gems fall at a constant speed. Unless despawning is enabled they
/// keep falling past the field until collected.
fn update_gems(state: &mut GameState, dt: f32) {
    let fall = state.config.gem_fall_speed * dt;
    let field_h = state.config.field_height;
    let despawn = state.config.despawn_fallen_gems;

    for i in 0..state.gems.len() {
        if !state.gem_released(i) {
            continue;
        }
        let gem = &mut state.gems[i].entity;
        gem.sprite.pos.y += fall;

        if despawn && gem.visible && gem.bounds().top() >= field_h {
            gem.hide();
            log::debug!("Gem {} fell out of the field", i);
            state.events.push(GameEvent::GemLost { gem: i });
        }
    }
}
