//! Collision detection and response
//!
//! Everything is an axis-aligned box. Responses are pure sign flips on the
//! ball's velocity: no restitution, no contact-point angles and no pushing the
//! ball back out of whatever it overlaps.

use super::entity::Rect;
use super::state::{GameEvent, GameMode, GameState};
use crate::consts::{BRICK_POINTS, GEM_POINTS};

/// Strict AABB overlap test. Boxes that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    b.left() < a.right() && b.right() > a.left() && b.top() < a.bottom() && b.bottom() > a.top()
}

/// Run one frame of collision checks, in order:
/// 1. side walls flip x
/// 2. ceiling flips y
/// 3. floor costs a life and puts the ball back on the paddle
/// 4. paddle flips y
/// 5. every overlapping visible brick flips y, scores and disappears,
///    releasing the gem it hides
/// 6. every overlapping visible gem scores and disappears
///
/// Brick hits are not limited to one per frame: a ball straddling two bricks
/// destroys both and its y velocity flips twice.
pub fn resolve_collisions(state: &mut GameState) {
    if state.mode != GameMode::Playing {
        return;
    }

    let field_w = state.config.field_width;
    let field_h = state.config.field_height;

    let ball = state.ball.bounds();
    if ball.left() <= 0.0 || ball.right() >= field_w {
        state.ball.velocity.x = -state.ball.velocity.x;
        state.events.push(GameEvent::WallBounce);
    }

    if ball.top() <= 0.0 {
        state.ball.velocity.y = -state.ball.velocity.y;
        state.events.push(GameEvent::CeilingBounce);
    }

    if ball.bottom() >= field_h {
        state.lives = state.lives.saturating_sub(1);
        log::info!("Ball lost, lives: {}", state.lives);
        state.events.push(GameEvent::BallLost {
            lives_left: state.lives,
        });
        state.reset_ball();
    }

    // The ball may have been reset above
    let ball = state.ball.bounds();
    let paddle = state.paddle.bounds();

    if overlaps(&paddle, &ball) {
        state.ball.velocity.y = -state.ball.velocity.y;
        state.events.push(GameEvent::PaddleBounce);
    }

    for row in &mut state.bricks {
        for (index, brick) in row.bricks.iter_mut().enumerate() {
            if brick.visible && overlaps(&ball, &brick.bounds()) {
                state.ball.velocity.y = -state.ball.velocity.y;
                state.score += BRICK_POINTS;
                brick.hide();
                log::debug!("Brick {:?}[{}] destroyed", row.color, index);
                state.events.push(GameEvent::BrickDestroyed {
                    color: row.color,
                    index,
                });
                if let Some(gem) = state.config.gem_for_brick(row.color, index) {
                    log::debug!("Gem {} released", gem);
                    state.events.push(GameEvent::GemReleased { gem });
                }
            }
        }
    }

    for (gem_index, gem) in state.gems.iter_mut().enumerate() {
        if gem.entity.visible && overlaps(&gem.entity.bounds(), &paddle) {
            state.score += GEM_POINTS;
            gem.entity.hide();
            log::debug!("Gem {} collected", gem_index);
            state.events.push(GameEvent::GemCollected { gem: gem_index });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::platform::HeadlessBackend;
    use crate::sim::BrickColor;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), &mut HeadlessBackend::new()).unwrap();
        state.set_mode(GameMode::Playing);
        state.drain_events();
        state
    }

    /// Hide every brick except one far from the test area (bottom-right)
    fn clear_field(state: &mut GameState) {
        for row in &mut state.bricks {
            for brick in &mut row.bricks {
                brick.visible = false;
            }
        }
        state.brick_mut(BrickColor::Red, 19).visible = true;
    }

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        let c = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&right, &a));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }
    }

    #[test]
    fn test_left_wall_flips_x_once() {
        let mut state = playing_state();
        clear_field(&mut state);
        state.served = true;
        state.ball.set_pos(Vec2::new(0.0, 300.0));
        state.ball.set_velocity(Vec2::new(-300.0, 300.0));

        resolve_collisions(&mut state);
        assert_eq!(state.ball.velocity(), Vec2::new(300.0, 300.0));
        assert_eq!(state.drain_events(), vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_right_wall_flips_x() {
        let mut state = playing_state();
        clear_field(&mut state);
        let ball_w = state.ball.size().x;
        state.ball.set_pos(Vec2::new(1280.0 - ball_w, 300.0));
        state.ball.set_velocity(Vec2::new(300.0, -300.0));

        resolve_collisions(&mut state);
        assert_eq!(state.ball.velocity(), Vec2::new(-300.0, -300.0));
    }

    #[test]
    fn test_ceiling_flips_y() {
        let mut state = playing_state();
        clear_field(&mut state);
        state.ball.set_pos(Vec2::new(600.0, 0.0));
        state.ball.set_velocity(Vec2::new(300.0, -300.0));

        resolve_collisions(&mut state);
        assert_eq!(state.ball.velocity(), Vec2::new(300.0, 300.0));
        assert_eq!(state.drain_events(), vec![GameEvent::CeilingBounce]);
    }

    #[test]
    fn test_floor_costs_life_and_rests_ball() {
        let mut state = playing_state();
        state.served = true;
        state.ball.set_pos(Vec2::new(100.0, 700.0));
        state.ball.set_velocity(Vec2::new(300.0, 300.0));

        resolve_collisions(&mut state);
        assert_eq!(state.lives, 2);
        assert!(!state.served);
        assert_eq!(state.ball.velocity(), Vec2::ZERO);
        assert_eq!(state.ball.pos(), state.ball_rest_position());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::BallLost { lives_left: 2 }]
        );
    }

    #[test]
    fn test_paddle_flips_y_regardless_of_contact_point() {
        let mut state = playing_state();
        let paddle = state.paddle.bounds();
        // Clip the paddle's far left corner
        state.ball.set_pos(Vec2::new(paddle.left() - 20.0, paddle.top() - 20.0));
        state.ball.set_velocity(Vec2::new(300.0, 300.0));

        resolve_collisions(&mut state);
        assert_eq!(state.ball.velocity(), Vec2::new(300.0, -300.0));
        assert_eq!(state.drain_events(), vec![GameEvent::PaddleBounce]);
    }

    #[test]
    fn test_resting_ball_does_not_touch_paddle() {
        let mut state = playing_state();
        resolve_collisions(&mut state);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_brick_hit_scores_and_hides() {
        let mut state = playing_state();
        // Inside Grey[5] only
        let brick = state.brick(BrickColor::Grey, 5).bounds();
        state.ball.set_pos(brick.pos + Vec2::new(21.0, 5.0));
        state.ball.set_velocity(Vec2::new(300.0, -300.0));

        resolve_collisions(&mut state);
        assert_eq!(state.score, 1);
        assert!(!state.brick(BrickColor::Grey, 5).visible);
        assert_eq!(state.ball.velocity(), Vec2::new(300.0, 300.0));
        assert_eq!(state.visible_bricks(), 99);
        assert_eq!(state.brick(BrickColor::Grey, 5).sprite.opacity, 0.0);
    }

    #[test]
    fn test_brick_hiding_a_gem_releases_it() {
        let mut state = playing_state();
        let brick = state.brick(BrickColor::Yellow, 11).bounds();
        state.ball.set_pos(brick.pos + Vec2::new(21.0, 5.0));
        state.ball.set_velocity(Vec2::new(300.0, -300.0));

        assert!(!state.gem_released(2));
        resolve_collisions(&mut state);
        assert!(state.gem_released(2));
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::BrickDestroyed {
                    color: BrickColor::Yellow,
                    index: 11
                },
                GameEvent::GemReleased { gem: 2 },
            ]
        );
    }

    #[test]
    fn test_hidden_brick_is_ignored() {
        let mut state = playing_state();
        let brick = state.brick(BrickColor::Grey, 5).bounds();
        state.brick_mut(BrickColor::Grey, 5).visible = false;
        state.ball.set_pos(brick.pos + Vec2::new(21.0, 5.0));
        state.ball.set_velocity(Vec2::new(300.0, -300.0));

        resolve_collisions(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.ball.velocity(), Vec2::new(300.0, -300.0));
    }

    #[test]
    fn test_straddling_two_bricks_hits_both() {
        let mut state = playing_state();
        // Across the seam between Yellow[3] and Yellow[4]
        let left = state.brick(BrickColor::Yellow, 3).bounds();
        state.ball.set_pos(Vec2::new(left.right() - 11.0, left.top() + 5.0));
        state.ball.set_velocity(Vec2::new(300.0, -300.0));

        resolve_collisions(&mut state);
        assert_eq!(state.score, 2);
        assert!(!state.brick(BrickColor::Yellow, 3).visible);
        assert!(!state.brick(BrickColor::Yellow, 4).visible);
        // Flipped twice
        assert_eq!(state.ball.velocity(), Vec2::new(300.0, -300.0));
    }

    #[test]
    fn test_gem_on_paddle_collected() {
        let mut state = playing_state();
        let paddle = state.paddle.bounds();
        state.gems[2].entity.set_pos(paddle.pos + Vec2::new(10.0, -10.0));

        resolve_collisions(&mut state);
        assert_eq!(state.score, 10);
        assert!(!state.gems[2].entity.visible);
        assert_eq!(state.gems[2].entity.sprite.opacity, 0.0);
        assert_eq!(state.drain_events(), vec![GameEvent::GemCollected { gem: 2 }]);

        // Already collected
        resolve_collisions(&mut state);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_no_collisions_outside_playing() {
        let mut state = playing_state();
        state.set_mode(GameMode::Paused);
        state.ball.set_pos(Vec2::new(0.0, 700.0));
        resolve_collisions(&mut state);
        assert_eq!(state.lives, 3);
    }
}
