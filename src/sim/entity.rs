//! Sprite-backed game entities
//!
//! An entity pairs a visual handle with a velocity and a visibility flag.
//! Entities are never removed; hiding one takes it out of rendering and
//! collision checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::platform::Backend;

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Opaque handle to a texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Visual handle created by a [`Backend`]
///
/// The core reads and writes position, size and opacity; everything else
/// about how the sprite is drawn belongs to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: TextureId,
    /// Asset name the sprite was created from
    pub asset: String,
    pub pos: Vec2,
    pub size: Vec2,
    /// 0.0 (transparent) to 1.0 (opaque)
    pub opacity: f32,
}

impl Sprite {
    pub fn new(texture: TextureId, asset: impl Into<String>, size: Vec2) -> Self {
        Self {
            texture,
            asset: asset.into(),
            pos: Vec2::ZERO,
            size,
            opacity: 1.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A drawable, movable actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub sprite: Sprite,
    /// Units per second
    pub velocity: Vec2,
    /// Hidden entities are skipped by rendering and collision checks
    pub visible: bool,
}

impl Entity {
    /// Create the entity's visual from `asset` through the backend.
    ///
    /// An entity that starts hidden still gets its sprite, at zero opacity,
    /// so size queries against it keep working.
    pub fn initialize<B: Backend + ?Sized>(
        backend: &mut B,
        asset: &str,
        visible: bool,
    ) -> Result<Self, GameError> {
        let mut sprite = backend.create_visual(asset)?;
        if !visible {
            sprite.opacity = 0.0;
        }
        Ok(Self {
            sprite,
            velocity: Vec2::ZERO,
            visible,
        })
    }

    pub fn bounds(&self) -> Rect {
        self.sprite.bounds()
    }

    /// Take the entity out of play; its sprite drops to zero opacity
    pub fn hide(&mut self) {
        self.visible = false;
        self.sprite.opacity = 0.0;
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.sprite.opacity = 1.0;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn pos(&self) -> Vec2 {
        self.sprite.pos
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.sprite.pos = pos;
    }

    pub fn size(&self) -> Vec2 {
        self.sprite.size
    }

    /// Euler step
    pub fn integrate(&mut self, dt: f32) {
        self.sprite.pos += self.velocity * dt;
    }
}
