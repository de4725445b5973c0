//! Meteor Dash - A 2D arcade dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, mode state machine)
//! - `config`: Immutable game configuration
//! - `input`: Key/analog state tracking into per-frame input
//! - `audio`: Fire-and-forget sound effect dispatch
//! - `renderer`: Backend-agnostic draw pass

pub mod audio;
pub mod config;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use sim::{GameMode, GameSession, TickInput, tick};

/// Default tuning values (used to build `GameConfig::default()`)
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_LIVES: u32 = 5;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 38.0;
    /// Units per second
    pub const PLAYER_SPEED_X: f32 = 300.0;
    pub const PLAYER_SPEED_Y: f32 = 300.0;
    pub const PLAYER_DAMAGE: u32 = 1;
    /// Time-survival score, points per second
    pub const SCORE_PER_SECOND: f32 = 10.0;
    /// Facing angle closes 1/N of the error every frame
    pub const ROTATION_SMOOTHING: f32 = 10.0;

    /// Dash
    pub const DASH_DURATION: f32 = 0.3;
    pub const DASH_COOLDOWN: f32 = 1.0;
    pub const DASH_SPEED_MULTIPLIER: f32 = 3.0;
    pub const DASH_OPACITY: u8 = 128;

    /// Damage flash (invulnerability window after a hit)
    pub const DAMAGE_FLASH_DURATION: f32 = 0.75;

    /// Obstacles
    pub const OBSTACLE_BASE_SPEED: f32 = 60.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 400.0;
    pub const OBSTACLE_SPEED_GROWTH: f32 = 1.5;
    pub const OBSTACLE_INITIAL_COUNT: u32 = 10;
    pub const OBSTACLE_HARMLESS_DURATION: f32 = 3.0;
    pub const OBSTACLE_HARMLESS_FACTOR: f32 = 0.3;
    pub const OBSTACLE_NOISE_MIN: f32 = 0.6;
    pub const OBSTACLE_NOISE_MAX: f32 = 1.5;
    /// Degrees per second, sampled in [-max, max]
    pub const OBSTACLE_MAX_ROTATION_RATE: f32 = 90.0;

    /// Levels
    pub const LEVEL_DURATION: f32 = 15.0;

    /// Power-ups
    pub const POWERUP_INTERVAL: f32 = 5.0;
    pub const POWERUP_LIFETIME: f32 = 5.0;
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const EXTRA_SCORE_BONUS: u64 = 200;
    pub const EXTRA_LIFE_BONUS: u32 = 1;

    /// Player shots
    pub const SHOT_SPEED: f32 = 240.0;
    pub const SHOT_WIDTH: f32 = 5.0;
    pub const SHOT_HEIGHT: f32 = 27.0;
}

/// Round an analog axis reading to a direction in {-1, 0, 1}
#[inline]
pub fn round_axis(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(-1.0, 1.0).round()
}

/// Clamp a float into the 0..=255 opacity range
#[inline]
pub fn to_opacity(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_axis_directions() {
        assert_eq!(round_axis(0.2), 0.0);
        assert_eq!(round_axis(0.7), 1.0);
        assert_eq!(round_axis(-0.9), -1.0);
        assert_eq!(round_axis(f32::NAN), 0.0);
    }

    #[test]
    fn test_to_opacity_clamps() {
        assert_eq!(to_opacity(-4.0), 0);
        assert_eq!(to_opacity(1000.0), 255);
        assert_eq!(to_opacity(f32::INFINITY), 255);
        assert_eq!(to_opacity(f32::NAN), 0);
    }

    proptest! {
        #[test]
        fn round_axis_stays_in_unit_set(v in -10.0f32..10.0) {
            let r = round_axis(v);
            prop_assert!(r == -1.0 || r == 0.0 || r == 1.0);
        }
    }
}
