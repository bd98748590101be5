//! Platform abstraction layer
//!
//! The game core never talks to a window, a GPU or the DOM directly. It
//! consumes the host framework through:
//! - `Backend`: visual creation and per-frame drawing
//! - `input`: host key names mapped onto `sim::Key`
//! - `time`: frame delta delivery

pub mod headless;
pub mod input;
pub mod time;

use glam::Vec2;

use crate::error::GameError;
use crate::sim::Sprite;

pub use headless::HeadlessBackend;
pub use time::FrameClock;

/// Host rendering/engine collaborator
pub trait Backend {
    /// Load `asset` and hand back a sprite sized to the texture.
    fn create_visual(&mut self, asset: &str) -> Result<Sprite, GameError>;

    /// Draw a sprite at its current position and opacity.
    fn draw_sprite(&mut self, sprite: &Sprite);

    /// Draw a line of text with its baseline origin at `pos`.
    fn draw_text(&mut self, text: &str, pos: Vec2);
}
