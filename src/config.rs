//! Engine configuration

use crate::runtime::debug::{DEBUG_ENV, DebugConfig};
use crate::storage::progress::DEFAULT_SAVE_KEY;
use crate::town::actor::{DEFAULT_TILE_SIZE, DEFAULT_WALK_SPEED};
use anyhow::ensure;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the director does when no talking entry has its flags satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectorFallback {
    /// Play the first entry anyway
    #[default]
    PlayFirst,
    /// Refuse to start the interaction
    StayIdle,
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub selector_fallback: SelectorFallback,
    /// Tile edge in pixels
    pub tile_size: f32,
    /// Walking speed in pixels per millisecond
    pub walk_speed: f32,
    /// Characters revealed per frame in the text box
    pub text_speed: usize,
    /// Progress save slot
    pub save_key: String,
    pub debug: DebugConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            selector_fallback: SelectorFallback::default(),
            tile_size: DEFAULT_TILE_SIZE,
            walk_speed: DEFAULT_WALK_SPEED,
            text_speed: 2,
            save_key: DEFAULT_SAVE_KEY.to_string(),
            debug: DebugConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate()?;
        config.apply_env();
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Walks only finish with a positive speed over a positive tile size
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.walk_speed.is_finite() && self.walk_speed > 0.0,
            "walk_speed must be positive, got {}",
            self.walk_speed
        );
        ensure!(
            self.tile_size.is_finite() && self.tile_size > 0.0,
            "tile_size must be positive, got {}",
            self.tile_size
        );
        Ok(())
    }

    /// `BUDGETVILLE_DEBUG` forces debug logging on
    fn apply_env(&mut self) {
        if std::env::var(DEBUG_ENV).is_ok() {
            self.debug.enabled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config.selector_fallback, SelectorFallback::PlayFirst);
        assert_eq!(config.tile_size, 16.0);
        assert_eq!(config.save_key, "Budgetville_Save1");
    }

    #[test]
    fn fields_override_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{ "selector_fallback": "StayIdle", "text_speed": 5, "debug": { "enabled": true } }"#,
        )
        .unwrap();
        assert_eq!(config.selector_fallback, SelectorFallback::StayIdle);
        assert_eq!(config.text_speed, 5);
        assert!(config.debug.enabled);
    }

    #[test]
    fn rejects_stalling_walk_motion() {
        let err = EngineConfig::from_json_str(r#"{ "walk_speed": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("walk_speed"));

        assert!(EngineConfig::from_json_str(r#"{ "walk_speed": -0.5 }"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{ "tile_size": 0 }"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{ "walk_speed": 0.2 }"#).is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(EngineConfig::from_json_str("{ tile_size: }").is_err());
    }
}
