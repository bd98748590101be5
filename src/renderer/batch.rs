//! Sprite batching backend
//!
//! Collects one frame of draw calls as GPU-ready vertices plus text lines.
//! Text is handed to the host page rather than rasterised here.

use glam::Vec2;

use super::atlas;
use super::shapes;
use super::vertex::Vertex;
use crate::error::GameError;
use crate::platform::Backend;
use crate::sim::{Sprite, TextureId};

/// A line of text to overlay on the field
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub pos: Vec2,
}

#[derive(Debug, Default)]
pub struct SpriteBatch {
    pub vertices: Vec<Vertex>,
    pub text: Vec<TextLine>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.text.clear();
    }
}

impl Backend for SpriteBatch {
    fn create_visual(&mut self, asset: &str) -> Result<Sprite, GameError> {
        let info = atlas::lookup(asset)
            .ok_or_else(|| GameError::asset_load(atlas::asset_path(asset), "unknown texture"))?;
        let texture = TextureId(atlas::texture_index(asset).unwrap_or_default());
        Ok(Sprite::new(texture, asset, Vec2::new(info.width, info.height)))
    }

    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.vertices.extend_from_slice(&shapes::sprite_quad(sprite));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        self.text.push(TextLine {
            text: text.to_string(),
            pos,
        });
    }
}
