//! Static game configuration.
//!
//! Defaults match the classic tuning; any field can be overridden with a
//! `FORTUNE_`-prefixed environment variable (e.g. `FORTUNE_GAME_DURATION=60`).

use std::path::PathBuf;
use std::time::Duration;

use bevy_ecs::resource::Resource;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::constants::{self, size, viewport};
use crate::error::ConfigError;

/// Every tunable value of a round.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of a round, in seconds.
    pub game_duration: u32,
    pub item_spawn_interval_ms: u64,
    pub bomb_spawn_interval_ms: u64,
    /// Item fall speed in pixels per second. Bombs fall 1.5 times as fast.
    pub item_fall_speed: f32,
    /// Horizontal step of a single keyboard press, in pixels.
    pub player_speed: f32,
    pub score_multiplier: u32,
    pub player_size: f32,
    pub item_size: f32,
    pub bomb_size: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub player_bottom_margin: f32,
    pub frame_rate: u32,
    pub asset_root: PathBuf,
    /// Fixed seed for the spawners; random when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_duration: constants::GAME_DURATION_SECS,
            item_spawn_interval_ms: constants::ITEM_SPAWN_INTERVAL.as_millis() as u64,
            bomb_spawn_interval_ms: constants::BOMB_SPAWN_INTERVAL.as_millis() as u64,
            item_fall_speed: constants::ITEM_FALL_SPEED,
            player_speed: constants::PLAYER_SPEED,
            score_multiplier: constants::SCORE_PER_ITEM,
            player_size: size::PLAYER,
            item_size: size::ITEM,
            bomb_size: size::BOMB,
            viewport_width: viewport::WIDTH,
            viewport_height: viewport::HEIGHT,
            player_bottom_margin: viewport::PLAYER_BOTTOM_MARGIN,
            frame_rate: constants::FRAME_RATE,
            asset_root: PathBuf::from("assets"),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Layers `FORTUNE_*` environment variables over the defaults and validates the result.
    pub fn load() -> Result<Self, ConfigError> {
        let config: GameConfig = Figment::from(Serialized::defaults(GameConfig::default()))
            .merge(Env::prefixed("FORTUNE_"))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.game_duration == 0 {
            return Err(invalid("game_duration", "must be at least one second"));
        }
        if self.item_spawn_interval_ms == 0 {
            return Err(invalid("item_spawn_interval_ms", "must be non-zero"));
        }
        if self.bomb_spawn_interval_ms == 0 {
            return Err(invalid("bomb_spawn_interval_ms", "must be non-zero"));
        }
        if self.frame_rate == 0 {
            return Err(invalid("frame_rate", "must be non-zero"));
        }

        let positive = [
            ("item_fall_speed", self.item_fall_speed),
            ("player_speed", self.player_speed),
            ("player_size", self.player_size),
            ("item_size", self.item_size),
            ("bomb_size", self.bomb_size),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be a positive number, got {value}")));
            }
        }
        if !(self.player_bottom_margin.is_finite() && self.player_bottom_margin >= 0.0) {
            return Err(invalid("player_bottom_margin", "must not be negative"));
        }

        Ok(())
    }

    pub fn item_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.item_spawn_interval_ms)
    }

    pub fn bomb_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.bomb_spawn_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate
    }

    pub fn bomb_fall_speed(&self) -> f32 {
        self.item_fall_speed * constants::BOMB_SPEED_FACTOR
    }
}
