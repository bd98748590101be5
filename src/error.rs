//! Error types for game startup.

use thiserror::Error;

/// Errors that abort game initialisation.
///
/// Gameplay itself has no failure states; everything here happens before the
/// first frame.
#[derive(Debug, Error)]
pub enum GameError {
    /// A visual asset could not be loaded by the host framework.
    #[error("Failed to load asset '{asset}': {reason}")]
    AssetLoad { asset: String, reason: String },

    /// Configuration text was not valid JSON for `GameConfig`.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration parsed but describes an impossible game.
    #[error("Invalid config: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("Failed to read config '{path}': {details}")]
    ConfigRead { path: String, details: String },

    /// No usable GPU adapter, device or surface.
    #[error("Graphics init failed: {0}")]
    Graphics(String),

    /// The host page is missing something the game needs.
    #[error("Host error: {0}")]
    Host(String),
}

impl GameError {
    pub fn asset_load(asset: impl Into<String>, reason: impl Into<String>) -> Self {
        GameError::AssetLoad {
            asset: asset.into(),
            reason: reason.into(),
        }
    }
}
