//! Game tuning
//!
//! Loaded once at startup. Native builds read an optional JSON file named by
//! `BREAKOUT_CONFIG`; browser builds read an optional LocalStorage entry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::BrickColor;

/// Ties one gem to the brick that hides it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GemLink {
    /// Row of the covering brick
    pub layer: BrickColor,
    /// Index of the covering brick within its row
    pub brick: usize,
    /// Where the gem sits before it starts falling
    pub spawn: Vec2,
}

impl GemLink {
    pub const fn new(layer: BrickColor, brick: usize, x: f32, y: f32) -> Self {
        Self {
            layer,
            brick,
            spawn: Vec2::new(x, y),
        }
    }
}

/// Default gem placements: each sits behind one specific brick
pub fn default_gem_links() -> Vec<GemLink> {
    vec![
        GemLink::new(BrickColor::Purple, 2, 145.0, 30.0),
        GemLink::new(BrickColor::Red, 7, 465.0, 128.0),
        GemLink::new(BrickColor::Yellow, 11, 720.0, 64.0),
        GemLink::new(BrickColor::Green, 14, 912.0, 0.0),
    ]
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    /// Horizontal speed while A/D is held
    pub paddle_speed: f32,
    /// Distance from the field bottom to the paddle top
    pub paddle_bottom_offset: f32,

    // === Ball ===
    /// Velocity given to the ball when served
    pub serve_velocity: Vec2,

    // === Gems ===
    pub gem_fall_speed: f32,
    pub gems: Vec<GemLink>,
    /// Hide gems that fall past the bottom of the field instead of letting
    /// them fall forever
    pub despawn_fallen_gems: bool,

    // === Rules ===
    pub starting_lives: u8,

    // === Host ===
    /// Largest frame delta the frame clock passes on
    pub max_frame_dt: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_speed: PADDLE_SPEED,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,

            serve_velocity: Vec2::new(BALL_SERVE_VELOCITY.0, BALL_SERVE_VELOCITY.1),

            gem_fall_speed: GEM_FALL_SPEED,
            gems: default_gem_links(),
            despawn_fallen_gems: false,

            starting_lives: STARTING_LIVES,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configs that would describe an unplayable game
    pub fn validate(&self) -> Result<(), GameError> {
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(GameError::Config(format!(
                "field must have positive size, got {}x{}",
                self.field_width, self.field_height
            )));
        }
        if self.starting_lives == 0 {
            return Err(GameError::Config("starting_lives must be at least 1".into()));
        }
        if self.max_frame_dt <= 0.0 {
            return Err(GameError::Config("max_frame_dt must be positive".into()));
        }
        for (i, link) in self.gems.iter().enumerate() {
            if link.brick >= BRICKS_PER_LAYER {
                return Err(GameError::Config(format!(
                    "gem {} links to {:?} brick {}, rows only have {} bricks",
                    i, link.layer, link.brick, BRICKS_PER_LAYER
                )));
            }
            if self.gems[..i]
                .iter()
                .any(|other| other.layer == link.layer && other.brick == link.brick)
            {
                return Err(GameError::Config(format!(
                    "gem {} links to {:?} brick {} which already hides a gem",
                    i, link.layer, link.brick
                )));
            }
        }
        Ok(())
    }

    /// Gem index hidden behind the given brick, if any
    pub fn gem_for_brick(&self, layer: BrickColor, brick: usize) -> Option<usize> {
        self.gems
            .iter()
            .position(|g| g.layer == layer && g.brick == brick)
    }

    /// Environment variable naming the native config file
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_PATH: &'static str = "BREAKOUT_CONFIG";

    /// Load from the file named by `BREAKOUT_CONFIG`, or defaults if unset
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, GameError> {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default config");
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(&path).map_err(|e| GameError::ConfigRead {
            path: path.clone(),
            details: e.to_string(),
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path);
        Ok(config)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "breakout_config";

    /// Load from LocalStorage, or defaults if absent
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, GameError> {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok())
            .flatten();

        match stored {
            Some(json) => {
                let config = Self::from_json(&json)?;
                log::info!("Loaded config from LocalStorage");
                Ok(config)
            }
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.gems.len(), 4);
        assert_eq!(config.serve_velocity, Vec2::new(300.0, -300.0));
    }

    #[test]
    fn test_gem_for_brick() {
        let config = GameConfig::default();
        assert_eq!(config.gem_for_brick(BrickColor::Purple, 2), Some(0));
        assert_eq!(config.gem_for_brick(BrickColor::Red, 7), Some(1));
        assert_eq!(config.gem_for_brick(BrickColor::Yellow, 11), Some(2));
        assert_eq!(config.gem_for_brick(BrickColor::Green, 14), Some(3));
        assert_eq!(config.gem_for_brick(BrickColor::Green, 2), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "paddle_speed": 600.0 }"#).unwrap();
        assert_eq!(config.paddle_speed, 600.0);
        assert_eq!(config.starting_lives, STARTING_LIVES);
        assert_eq!(config.gems.len(), 4);
    }

    #[test]
    fn test_json_round_trip_keeps_links() {
        let mut config = GameConfig::default();
        config.gems = vec![GemLink::new(BrickColor::Grey, 0, 5.0, 96.0)];
        let parsed = GameConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed.gems, config.gems);
    }

    #[test]
    fn test_rejects_out_of_range_link() {
        let json = r#"{ "gems": [ { "layer": "Red", "brick": 20, "spawn": [0.0, 0.0] } ] }"#;
        let err = GameConfig::from_json(json).unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_rejects_duplicate_link() {
        let mut config = GameConfig::default();
        config.gems.push(GemLink::new(BrickColor::Purple, 2, 0.0, 0.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_lives() {
        let config = GameConfig {
            starting_lives: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = GameConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse(_)));
    }
}
