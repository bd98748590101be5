//! Breakout - a paddle, a ball, five rows of bricks and a handful of gems
//!
//! Core modules:
//! - `sim`: Game-state core (entities, collisions, frame integration, modes)
//! - `renderer`: Sprite batching and the WebGPU quad pipeline
//! - `platform`: Host framework seams (visual creation, drawing, input, time)
//! - `config`: Data-driven game tuning and the gem/brick link table

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, GemLink};
pub use error::GameError;

/// Game configuration constants
pub mod consts {
    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Brick grid: five colour rows of twenty bricks each
    pub const BRICK_LAYERS: usize = 5;
    pub const BRICKS_PER_LAYER: usize = 20;

    /// Paddle defaults
    pub const PADDLE_SPEED: f32 = 450.0;
    /// Distance from the field bottom to the paddle's top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_SERVE_VELOCITY: (f32, f32) = (300.0, -300.0);
    /// Vertical gap between a resting ball and the paddle
    pub const BALL_REST_GAP: f32 = 1.0;

    /// Gems fall at this speed once their brick is gone
    pub const GEM_FALL_SPEED: f32 = 200.0;

    /// Scoring
    pub const BRICK_POINTS: u32 = 1;
    pub const GEM_POINTS: u32 = 10;

    pub const STARTING_LIVES: u8 = 3;

    /// Largest frame delta the host clock will hand to the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;
}
