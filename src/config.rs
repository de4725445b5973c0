//! Game configuration
//!
//! One immutable structure handed to `GameSession` at construction. Loadable
//! from JSON; any field left out falls back to the `consts` defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::obstacle::ObstacleKind;
use crate::sim::SpawnError;

/// Errors raised while loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `GameConfig`
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its allowed range
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Obstacle type id with no definition
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

/// Complete tuning for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    pub player_lives: u32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed_x: f32,
    pub player_speed_y: f32,
    /// Lives lost per hit
    pub damage_amount: u32,
    pub damage_flash_duration: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub dash_speed_multiplier: f32,
    pub dash_opacity: u8,
    pub rotation_smoothing: f32,
    pub score_per_second: f32,

    // === Obstacles ===
    /// Obstacle type ids the spawner may pick from
    pub obstacle_types: Vec<u32>,
    pub obstacle_base_speed: f32,
    pub obstacle_max_speed: f32,
    pub obstacle_speed_growth: f32,
    pub obstacle_initial_count: u32,
    pub harmless_duration: f32,
    pub harmless_speed_factor: f32,
    pub speed_noise_min: f32,
    pub speed_noise_max: f32,
    pub max_rotation_rate: f32,

    // === Levels ===
    pub level_duration: f32,

    // === Power-ups ===
    pub powerup_interval: f32,
    pub powerup_lifetime: f32,
    pub powerup_size: f32,
    pub extra_score_bonus: u64,
    pub extra_life_bonus: u32,
    /// Remove power-ups once their lifetime runs out
    pub expire_power_ups: bool,

    // === Shots ===
    pub shots_enabled: bool,
    pub shot_speed: f32,
    pub shot_width: f32,
    pub shot_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_lives: PLAYER_LIVES,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed_x: PLAYER_SPEED_X,
            player_speed_y: PLAYER_SPEED_Y,
            damage_amount: PLAYER_DAMAGE,
            damage_flash_duration: DAMAGE_FLASH_DURATION,
            dash_duration: DASH_DURATION,
            dash_cooldown: DASH_COOLDOWN,
            dash_speed_multiplier: DASH_SPEED_MULTIPLIER,
            dash_opacity: DASH_OPACITY,
            rotation_smoothing: ROTATION_SMOOTHING,
            score_per_second: SCORE_PER_SECOND,

            obstacle_types: vec![1, 2],
            obstacle_base_speed: OBSTACLE_BASE_SPEED,
            obstacle_max_speed: OBSTACLE_MAX_SPEED,
            obstacle_speed_growth: OBSTACLE_SPEED_GROWTH,
            obstacle_initial_count: OBSTACLE_INITIAL_COUNT,
            harmless_duration: OBSTACLE_HARMLESS_DURATION,
            harmless_speed_factor: OBSTACLE_HARMLESS_FACTOR,
            speed_noise_min: OBSTACLE_NOISE_MIN,
            speed_noise_max: OBSTACLE_NOISE_MAX,
            max_rotation_rate: OBSTACLE_MAX_ROTATION_RATE,

            level_duration: LEVEL_DURATION,

            powerup_interval: POWERUP_INTERVAL,
            powerup_lifetime: POWERUP_LIFETIME,
            powerup_size: POWERUP_SIZE,
            extra_score_bonus: EXTRA_SCORE_BONUS,
            extra_life_bonus: EXTRA_LIFE_BONUS,
            expire_power_ups: false,

            shots_enabled: false,
            shot_speed: SHOT_SPEED,
            shot_width: SHOT_WIDTH,
            shot_height: SHOT_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config (missing fields use defaults)
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed_x", self.player_speed_x),
            ("player_speed_y", self.player_speed_y),
            ("damage_flash_duration", self.damage_flash_duration),
            ("dash_duration", self.dash_duration),
            ("dash_cooldown", self.dash_cooldown),
            ("dash_speed_multiplier", self.dash_speed_multiplier),
            ("rotation_smoothing", self.rotation_smoothing),
            ("score_per_second", self.score_per_second),
            ("obstacle_base_speed", self.obstacle_base_speed),
            ("obstacle_max_speed", self.obstacle_max_speed),
            ("obstacle_speed_growth", self.obstacle_speed_growth),
            ("harmless_duration", self.harmless_duration),
            ("harmless_speed_factor", self.harmless_speed_factor),
            ("speed_noise_min", self.speed_noise_min),
            ("speed_noise_max", self.speed_noise_max),
            ("max_rotation_rate", self.max_rotation_rate),
            ("level_duration", self.level_duration),
            ("powerup_interval", self.powerup_interval),
            ("powerup_lifetime", self.powerup_lifetime),
            ("powerup_size", self.powerup_size),
            ("shot_speed", self.shot_speed),
            ("shot_width", self.shot_width),
            ("shot_height", self.shot_height),
        ];
        // Also catches NaN, which the range comparisons below never see
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.obstacle_types.is_empty() {
            return Err(ConfigError::Invalid("obstacle_types is empty".into()));
        }
        if self.obstacle_max_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "obstacle_max_speed must be >= 0, got {}",
                self.obstacle_max_speed
            )));
        }
        if self.speed_noise_min > self.speed_noise_max {
            return Err(ConfigError::Invalid(format!(
                "speed noise range is inverted: [{}, {}]",
                self.speed_noise_min, self.speed_noise_max
            )));
        }
        if self.rotation_smoothing < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "rotation_smoothing must be >= 1, got {}",
                self.rotation_smoothing
            )));
        }
        self.obstacle_kinds()?;
        Ok(())
    }

    /// Resolve the configured obstacle type ids
    pub fn obstacle_kinds(&self) -> Result<Vec<ObstacleKind>, SpawnError> {
        self.obstacle_types
            .iter()
            .map(|&id| ObstacleKind::from_id(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.player_lives, PLAYER_LIVES);
        assert!(!config.shots_enabled);
        assert!(!config.expire_power_ups);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json_str(r#"{ "player_lives": 3, "level_duration": 20.0 }"#)
            .expect("valid config");
        assert_eq!(config.player_lives, 3);
        assert_eq!(config.level_duration, 20.0);
        assert_eq!(config.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_unknown_obstacle_type_rejected() {
        let err = GameConfig::from_json_str(r#"{ "obstacle_types": [1, 7] }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Spawn(SpawnError::UnknownObstacleType(7))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = GameConfig {
            screen_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = GameConfig {
            obstacle_types: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for json in [
            r#"{ "max_rotation_rate": 1e39 }"#,
            r#"{ "speed_noise_max": 1e39 }"#,
            r#"{ "screen_width": 1e39 }"#,
        ] {
            let err = GameConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{}: {:?}", json, err);
        }

        let config = GameConfig {
            speed_noise_min: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(crate::sim::GameSession::new(config, 1).is_err());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/nonexistent/meteor-dash.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
