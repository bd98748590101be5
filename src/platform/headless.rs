//! Windowless backend
//!
//! Sizes sprites from the built-in atlas and records every draw call. Used by
//! the native demo runner and by tests.

use std::collections::HashSet;

use glam::Vec2;

use super::Backend;
use crate::error::GameError;
use crate::renderer::atlas;
use crate::sim::{Sprite, TextureId};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite { asset: String, pos: Vec2, opacity: f32 },
    Text { text: String, pos: Vec2 },
}

/// Backend that draws nothing and remembers what it was asked to draw
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    pub commands: Vec<DrawCommand>,
    /// Assets that fail to load even if the atlas knows them
    missing: HashSet<String>,
    pub visuals_created: usize,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make loading `asset` fail, as if the image file were absent
    pub fn with_missing(mut self, asset: &str) -> Self {
        self.missing.insert(asset.to_string());
        self
    }

    /// Forget recorded draw calls (call at the start of each frame)
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn sprite_count(&self, asset: &str) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { asset: a, .. } if a == asset))
            .count()
    }
}

impl Backend for HeadlessBackend {
    fn create_visual(&mut self, asset: &str) -> Result<Sprite, GameError> {
        if self.missing.contains(asset) {
            return Err(GameError::asset_load(
                atlas::asset_path(asset),
                "file not found",
            ));
        }
        let info = atlas::lookup(asset)
            .ok_or_else(|| GameError::asset_load(atlas::asset_path(asset), "unknown texture"))?;
        let texture = TextureId(atlas::texture_index(asset).unwrap_or_default());
        self.visuals_created += 1;
        Ok(Sprite::new(
            texture,
            asset,
            Vec2::new(info.width, info.height),
        ))
    }

    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.commands.push(DrawCommand::Sprite {
            asset: sprite.asset.clone(),
            pos: sprite.pos,
            opacity: sprite.opacity,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
        });
    }
}
