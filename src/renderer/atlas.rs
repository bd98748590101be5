//! Built-in asset table
//!
//! Texture dimensions and flat tint colours for every image the game loads.
//! Backends without real image decoding size sprites from here.

/// Paddle texture
pub const PADDLE: &str = "paddleRed";
/// Ball texture
pub const BALL: &str = "ballBlue";
/// Gem texture (resized to the brick height at startup)
pub const GEM: &str = "element_blue_polygon";

pub const BRICK_GREEN: &str = "element_green_rectangle";
pub const BRICK_PURPLE: &str = "element_purple_rectangle";
pub const BRICK_YELLOW: &str = "element_yellow_rectangle";
pub const BRICK_GREY: &str = "element_grey_rectangle";
pub const BRICK_RED: &str = "element_red_rectangle";

/// Size and tint of one asset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetInfo {
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4],
}

const ASSETS: &[AssetInfo] = &[
    AssetInfo { name: PADDLE, width: 104.0, height: 24.0, color: [0.9, 0.25, 0.2, 1.0] },
    AssetInfo { name: BALL, width: 22.0, height: 22.0, color: [0.3, 0.6, 1.0, 1.0] },
    AssetInfo { name: GEM, width: 64.0, height: 64.0, color: [0.35, 0.75, 1.0, 1.0] },
    AssetInfo { name: BRICK_GREEN, width: 64.0, height: 32.0, color: [0.3, 0.8, 0.35, 1.0] },
    AssetInfo { name: BRICK_PURPLE, width: 64.0, height: 32.0, color: [0.6, 0.3, 0.8, 1.0] },
    AssetInfo { name: BRICK_YELLOW, width: 64.0, height: 32.0, color: [0.95, 0.85, 0.25, 1.0] },
    AssetInfo { name: BRICK_GREY, width: 64.0, height: 32.0, color: [0.6, 0.6, 0.65, 1.0] },
    AssetInfo { name: BRICK_RED, width: 64.0, height: 32.0, color: [0.85, 0.2, 0.2, 1.0] },
];

/// Look up an asset by name
pub fn lookup(name: &str) -> Option<&'static AssetInfo> {
    ASSETS.iter().find(|a| a.name == name)
}

/// Path the image is served from
pub fn asset_path(name: &str) -> String {
    format!("/data/images/{}.png", name)
}

/// Texture index for an asset (position in the table)
pub fn texture_index(name: &str) -> Option<u32> {
    ASSETS.iter().position(|a| a.name == name).map(|i| i as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bricks_tile_the_field() {
        let brick = lookup(BRICK_GREEN).unwrap();
        let row_width = brick.width * crate::consts::BRICKS_PER_LAYER as f32;
        assert_eq!(row_width, crate::consts::FIELD_WIDTH);
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("missing").is_none());
        assert_eq!(texture_index(PADDLE), Some(0));
        assert_eq!(asset_path(BALL), "/data/images/ballBlue.png");
    }
}
