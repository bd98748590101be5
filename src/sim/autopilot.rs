//! Idle/demo player
//!
//! Produces the same key events a person would, so the game runs through the
//! normal input path. Tracks the ball, and goes for falling gems when the ball
//! is heading away from the paddle.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::input::{Key, KeyEvent};
use super::state::{GameMode, GameState, MenuOption};

/// Paddle-centre distance inside which the autopilot stops steering
const DEAD_ZONE: f32 = 12.0;
/// Largest random aim offset (keeps rallies from looping)
const MAX_AIM_JITTER: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Steering key currently held down
    held: Option<Key>,
    aim_offset: f32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held: None,
            aim_offset: 0.0,
        }
    }

    /// Key events to feed the game this frame
    pub fn next_events(&mut self, state: &GameState) -> Vec<KeyEvent> {
        let mut events = Vec::new();

        match state.mode {
            GameMode::Menu | GameMode::Paused => {
                self.held = None;
                // Never confirm EXIT
                if state.menu_option == MenuOption::Exit {
                    events.push(KeyEvent::released(Key::Right));
                }
                events.push(KeyEvent::pressed(Key::Enter));
                return events;
            }
            GameMode::GameOver | GameMode::Win => {
                self.held = None;
                return events;
            }
            GameMode::Playing => {}
        }

        if !state.served {
            self.aim_offset = self.rng.random_range(-MAX_AIM_JITTER..=MAX_AIM_JITTER);
            events.push(KeyEvent::pressed(Key::Space));
        }

        let paddle_center = state.paddle.bounds().center().x;
        let target = self.target_x(state);

        let want = if target < paddle_center - DEAD_ZONE {
            Some(Key::A)
        } else if target > paddle_center + DEAD_ZONE {
            Some(Key::D)
        } else {
            None
        };

        if want != self.held {
            if let Some(old) = self.held {
                events.push(KeyEvent::released(old));
            }
            if let Some(new) = want {
                events.push(KeyEvent::pressed(new));
            }
            self.held = want;
        }

        events
    }

    fn target_x(&self, state: &GameState) -> f32 {
        let ball = state.ball.bounds();
        let paddle_top = state.paddle.bounds().top();
        let ball_rising = state.ball.velocity().y < 0.0;

        if ball_rising {
            // Closest falling gem still above the paddle
            let gem = state
                .gems
                .iter()
                .enumerate()
                .filter(|(i, g)| g.entity.visible && state.gem_released(*i))
                .map(|(_, g)| g.entity.bounds())
                .filter(|g| g.bottom() < paddle_top)
                .max_by(|a, b| a.top().total_cmp(&b.top()));
            if let Some(gem) = gem {
                return gem.center().x;
            }
        }

        ball.center().x + self.aim_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::platform::HeadlessBackend;
    use crate::sim::{Flow, handle_key, update};
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), &mut HeadlessBackend::new()).unwrap()
    }

    #[test]
    fn test_starts_game_and_serves() {
        let mut state = new_state();
        let mut pilot = Autopilot::new(7);

        for event in pilot.next_events(&state) {
            handle_key(&mut state, event);
        }
        assert_eq!(state.mode, GameMode::Playing);

        for event in pilot.next_events(&state) {
            handle_key(&mut state, event);
        }
        assert!(state.served);
    }

    #[test]
    fn test_menu_cursor_on_exit_resumes_instead() {
        for mode in [GameMode::Menu, GameMode::Paused] {
            let mut state = new_state();
            state.set_mode(mode);
            state.menu_option = MenuOption::Exit;
            let mut pilot = Autopilot::new(3);

            let flows: Vec<Flow> = pilot
                .next_events(&state)
                .into_iter()
                .map(|event| handle_key(&mut state, event))
                .collect();
            assert!(flows.iter().all(|f| *f == Flow::Continue));
            assert_eq!(state.mode, GameMode::Playing);
            assert_eq!(state.menu_option, MenuOption::Play);
        }
    }

    #[test]
    fn test_steers_toward_ball() {
        let mut state = new_state();
        state.set_mode(GameMode::Playing);
        state.serve();
        state.ball.set_velocity(Vec2::new(-300.0, 300.0));
        state.ball.set_pos(Vec2::new(100.0, 400.0));

        let mut pilot = Autopilot::new(1);
        let events = pilot.next_events(&state);
        assert_eq!(events, vec![KeyEvent::pressed(Key::A)]);

        // Holding already: nothing new
        assert!(pilot.next_events(&state).is_empty());

        state.ball.set_pos(Vec2::new(1100.0, 400.0));
        let events = pilot.next_events(&state);
        assert_eq!(
            events,
            vec![KeyEvent::released(Key::A), KeyEvent::pressed(Key::D)]
        );
    }

    #[test]
    fn test_idle_when_game_over() {
        let mut state = new_state();
        state.set_mode(GameMode::GameOver);
        let mut pilot = Autopilot::new(1);
        assert!(pilot.next_events(&state).is_empty());
    }

    #[test]
    fn test_same_seed_same_run() {
        fn run(seed: u64) -> (u32, u8) {
            let mut state = new_state();
            let mut pilot = Autopilot::new(seed);
            for _ in 0..600 {
                for event in pilot.next_events(&state) {
                    if handle_key(&mut state, event) == Flow::Exit {
                        break;
                    }
                }
                update(&mut state, 1.0 / 60.0);
            }
            (state.score, state.lives)
        }
        assert_eq!(run(42), run(42));
    }
}
