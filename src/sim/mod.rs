//! Game-state core
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform details:
//! - Entities are plain data (sprite handle, velocity, visibility)
//! - Input arrives as `KeyEvent`s, one at a time
//! - Time arrives as a delta in seconds
//! - Fixed-size entity collections, stable iteration order

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod input;
pub mod menu;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{overlaps, resolve_collisions};
pub use entity::{Entity, Rect, Sprite, TextureId};
pub use input::{ClickEvent, Key, KeyAction, KeyEvent};
pub use menu::{Flow, handle_click, handle_key};
pub use state::{BrickColor, BrickRow, GameEvent, GameMode, GameState, Gem, MenuOption};
pub use tick::update;
