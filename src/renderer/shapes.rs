//! Shape generation for 2D primitives

use super::atlas;
use super::vertex::{Vertex, colors};
use crate::sim::{Rect, Sprite};

/// Two triangles covering `rect`
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Flat-tinted quad for a sprite; alpha follows the sprite's opacity
pub fn sprite_quad(sprite: &Sprite) -> [Vertex; 6] {
    let mut color = atlas::lookup(&sprite.asset)
        .map(|a| a.color)
        .unwrap_or(colors::MISSING);
    color[3] *= sprite.opacity.clamp(0.0, 1.0);
    rect(&sprite.bounds(), color)
}
