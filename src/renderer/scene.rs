//! Per-frame draw pass
//!
//! Reads the game state and issues draw calls. Never moves anything.

use glam::Vec2;

use crate::platform::Backend;
use crate::sim::{GameMode, GameState, MenuOption};

const PLAYING_BANNER: &str = "IN GAME, PRESS P TO PAUSE OR Esc TO QUIT";

/// Draw the current screen
pub fn draw<B: Backend + ?Sized>(state: &GameState, backend: &mut B) {
    let w = state.config.field_width;
    let h = state.config.field_height;
    let center = Vec2::new(w / 2.0, h / 2.0);

    match state.mode {
        GameMode::Menu => {
            backend.draw_text("MAIN MENU", center);
            draw_menu_options(state, backend);
        }
        GameMode::Playing => {
            backend.draw_text(PLAYING_BANNER, center);
            backend.draw_text(&format!("LIVES: {}", state.lives), Vec2::new(10.0, h - 6.0));
            backend.draw_text(
                &format!("SCORE: {}", state.score),
                Vec2::new(w - 110.0, h - 6.0),
            );
            draw_field(state, backend);
        }
        GameMode::Paused => {
            backend.draw_text("PAUSE MENU", center);
            draw_menu_options(state, backend);
        }
        GameMode::GameOver => {
            backend.draw_text("GAME OVER", center);
            draw_menu_options(state, backend);
        }
        GameMode::Win => {
            backend.draw_text("YOU WIN", center);
            draw_menu_options(state, backend);
        }
    }
}

fn draw_field<B: Backend + ?Sized>(state: &GameState, backend: &mut B) {
    backend.draw_sprite(&state.paddle.sprite);

    // Gems sit under the bricks that hide them
    for gem in state.gems.iter().filter(|g| g.entity.visible) {
        backend.draw_sprite(&gem.entity.sprite);
    }

    for brick in state
        .bricks
        .iter()
        .flat_map(|row| row.bricks.iter())
        .filter(|b| b.visible)
    {
        backend.draw_sprite(&brick.sprite);
    }

    backend.draw_sprite(&state.ball.sprite);
}

fn draw_menu_options<B: Backend + ?Sized>(state: &GameState, backend: &mut B) {
    let w = state.config.field_width;
    let y = state.config.field_height * 0.8;

    let (play, exit) = match state.menu_option {
        MenuOption::Play => (">PLAY", "EXIT"),
        MenuOption::Exit => ("PLAY", ">EXIT"),
    };
    backend.draw_text(play, Vec2::new(w * 0.35, y));
    backend.draw_text(exit, Vec2::new(w * 0.55, y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::platform::HeadlessBackend;
    use crate::platform::headless::DrawCommand;
    use crate::renderer::atlas;
    use crate::sim::{BrickColor, Key, KeyEvent, handle_key};

    fn setup() -> (GameState, HeadlessBackend) {
        let mut backend = HeadlessBackend::new();
        let state = GameState::new(GameConfig::default(), &mut backend).unwrap();
        (state, backend)
    }

    #[test]
    fn test_main_menu() {
        let (state, mut backend) = setup();
        draw(&state, &mut backend);
        let texts: Vec<&str> = backend.texts().collect();
        assert_eq!(texts, vec!["MAIN MENU", ">PLAY", "EXIT"]);
        assert!(
            backend
                .commands
                .iter()
                .all(|c| matches!(c, DrawCommand::Text { .. }))
        );
    }

    #[test]
    fn test_cursor_marker_moves() {
        let (mut state, mut backend) = setup();
        handle_key(&mut state, KeyEvent::released(Key::Right));
        draw(&state, &mut backend);
        assert!(
            backend.commands.contains(&DrawCommand::Text {
                text: ">EXIT".to_string(),
                pos: Vec2::new(1280.0 * 0.55, 720.0 * 0.8),
            })
        );
        assert!(backend.texts().any(|t| t == "PLAY"));
    }

    #[test]
    fn test_playing_field() {
        let (mut state, mut backend) = setup();
        state.set_mode(GameMode::Playing);
        state.score = 12;
        state.brick_mut(BrickColor::Red, 0).visible = false;
        draw(&state, &mut backend);

        let texts: Vec<&str> = backend.texts().collect();
        assert_eq!(texts, vec![PLAYING_BANNER, "LIVES: 3", "SCORE: 12"]);
        assert!(backend.commands.contains(&DrawCommand::Text {
            text: "LIVES: 3".to_string(),
            pos: Vec2::new(10.0, 714.0),
        }));
        assert!(backend.commands.contains(&DrawCommand::Text {
            text: "SCORE: 12".to_string(),
            pos: Vec2::new(1170.0, 714.0),
        }));

        assert_eq!(backend.sprite_count(atlas::PADDLE), 1);
        assert_eq!(backend.sprite_count(atlas::BALL), 1);
        assert_eq!(backend.sprite_count(atlas::GEM), 4);
        assert_eq!(backend.sprite_count(BrickColor::Red.asset()), 19);
        assert_eq!(backend.sprite_count(BrickColor::Green.asset()), 20);
    }

    #[test]
    fn test_gems_drawn_before_bricks_and_ball_last() {
        let (mut state, mut backend) = setup();
        state.set_mode(GameMode::Playing);
        draw(&state, &mut backend);

        let sprites: Vec<&str> = backend
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { asset, .. } => Some(asset.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(sprites.first(), Some(&atlas::PADDLE));
        assert_eq!(sprites.last(), Some(&atlas::BALL));
        let last_gem = sprites.iter().rposition(|a| *a == atlas::GEM).unwrap();
        let first_brick = sprites
            .iter()
            .position(|a| a.ends_with("_rectangle"))
            .unwrap();
        assert!(last_gem < first_brick);
    }

    #[test]
    fn test_draw_does_not_move_entities() {
        let (mut state, mut backend) = setup();
        state.set_mode(GameMode::Playing);
        state.paddle.set_velocity(Vec2::new(450.0, 0.0));
        let before = (state.paddle.pos(), state.ball.pos(), state.gems[0].entity.pos());
        draw(&state, &mut backend);
        draw(&state, &mut backend);
        let after = (state.paddle.pos(), state.ball.pos(), state.gems[0].entity.pos());
        assert_eq!(before, after);
    }

    #[test]
    fn test_end_screens() {
        let (mut state, mut backend) = setup();
        for (mode, title) in [
            (GameMode::Paused, "PAUSE MENU"),
            (GameMode::GameOver, "GAME OVER"),
            (GameMode::Win, "YOU WIN"),
        ] {
            state.set_mode(mode);
            backend.clear();
            draw(&state, &mut backend);
            let texts: Vec<&str> = backend.texts().collect();
            assert_eq!(texts, vec![title, ">PLAY", "EXIT"]);
        }
    }
}
