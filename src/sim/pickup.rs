//! Power-ups the player can collect

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::player::Player;
use crate::config::GameConfig;
use crate::to_opacity;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraLife,
    ExtraScore,
}

impl PowerUpKind {
    /// Either kind with equal odds
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            PowerUpKind::ExtraLife
        } else {
            PowerUpKind::ExtraScore
        }
    }

    /// Apply this kind's effect to the player
    pub fn apply(&self, player: &mut Player, config: &GameConfig) {
        match self {
            PowerUpKind::ExtraLife => {
                player.lives = player.lives.saturating_add(config.extra_life_bonus);
            }
            PowerUpKind::ExtraScore => player.add_score(config.extra_score_bonus),
        }
    }
}

/// A collectible power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub body: Body,
    /// Seconds until fully faded
    pub alive_remaining: f32,
    /// Starting value of `alive_remaining`
    pub lifetime: f32,
    picked_up: bool,
    expired: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2, config: &GameConfig) -> Self {
        Self {
            id,
            kind,
            body: Body::new(pos, Vec2::splat(config.powerup_size)),
            alive_remaining: config.powerup_lifetime,
            lifetime: config.powerup_lifetime,
            picked_up: false,
            expired: false,
        }
    }

    /// Random kind at a random on-screen position
    pub fn spawn<R: Rng>(id: u32, config: &GameConfig, rng: &mut R) -> Self {
        let kind = PowerUpKind::random(rng);
        let pos = Vec2::new(
            rng.random_range(0.0..=config.screen_width),
            rng.random_range(0.0..=config.screen_height),
        );
        Self::new(id, kind, pos, config)
    }

    /// Apply the effect once. Returns `None` if already collected.
    pub fn pick_up(&mut self, player: &mut Player, config: &GameConfig) -> Option<PowerUpKind> {
        if self.picked_up {
            return None;
        }
        self.picked_up = true;
        self.kind.apply(player, config);
        Some(self.kind)
    }

    /// Linear fade over the second half of the lifetime
    fn fade_opacity(&self) -> u8 {
        let half = self.lifetime / 2.0;
        if self.alive_remaining > half {
            255
        } else if self.alive_remaining <= 0.0 || half <= 0.0 {
            0
        } else {
            to_opacity(255.0 * self.alive_remaining / half)
        }
    }
}

impl Entity for PowerUp {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32, config: &GameConfig) {
        self.alive_remaining = (self.alive_remaining - dt).max(0.0);
        self.body.opacity = self.fade_opacity();
        if config.expire_power_ups && self.alive_remaining <= 0.0 {
            self.expired = true;
        }
    }

    fn is_alive(&self) -> bool {
        !self.picked_up && !self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn powerup(kind: PowerUpKind, config: &GameConfig) -> PowerUp {
        PowerUp::new(1, kind, Vec2::new(100.0, 100.0), config)
    }

    #[test]
    fn test_extra_life_adds_one_life() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        let mut p = powerup(PowerUpKind::ExtraLife, &config);
        assert_eq!(p.pick_up(&mut player, &config), Some(PowerUpKind::ExtraLife));
        assert_eq!(player.lives, config.player_lives + 1);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_extra_score_applies_once() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        let mut p = powerup(PowerUpKind::ExtraScore, &config);
        p.pick_up(&mut player, &config);
        assert_eq!(p.pick_up(&mut player, &config), None);
        assert_eq!(player.score, 200);
    }

    #[test]
    fn test_full_opacity_for_first_half() {
        let config = GameConfig::default();
        let mut p = powerup(PowerUpKind::ExtraLife, &config);
        p.update(2.0, &config);
        assert_eq!(p.body.opacity, 255);
        // 1.25s of the 2.5s fade window left
        p.update(1.75, &config);
        assert_eq!(p.body.opacity, 127);
    }

    #[test]
    fn test_faded_powerup_stays_by_default() {
        let config = GameConfig::default();
        let mut p = powerup(PowerUpKind::ExtraScore, &config);
        p.update(10.0, &config);
        assert_eq!(p.alive_remaining, 0.0);
        assert_eq!(p.body.opacity, 0);
        assert!(p.is_alive());

        // Still collectible after fading out
        let mut player = Player::new(&config);
        assert!(p.pick_up(&mut player, &config).is_some());
    }

    #[test]
    fn test_expiry_when_enabled() {
        let config = GameConfig {
            expire_power_ups: true,
            ..Default::default()
        };
        let mut p = powerup(PowerUpKind::ExtraScore, &config);
        p.update(4.9, &config);
        assert!(p.is_alive());
        p.update(0.2, &config);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_zero_lifetime_is_transparent() {
        let config = GameConfig {
            powerup_lifetime: 0.0,
            ..Default::default()
        };
        let mut p = powerup(PowerUpKind::ExtraLife, &config);
        p.update(0.016, &config);
        assert_eq!(p.body.opacity, 0);
    }

    #[test]
    fn test_spawn_inside_screen() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut saw_life = false;
        let mut saw_score = false;
        for id in 0..64 {
            let p = PowerUp::spawn(id, &config, &mut rng);
            assert!((0.0..=config.screen_width).contains(&p.body.pos.x));
            assert!((0.0..=config.screen_height).contains(&p.body.pos.y));
            match p.kind {
                PowerUpKind::ExtraLife => saw_life = true,
                PowerUpKind::ExtraScore => saw_score = true,
            }
        }
        assert!(saw_life && saw_score);
    }

    proptest! {
        #[test]
        fn fade_is_monotonic(steps in proptest::collection::vec(0.0f32..0.5, 1..40)) {
            let config = GameConfig::default();
            let mut p = powerup(PowerUpKind::ExtraLife, &config);
            let mut last = p.body.opacity;
            for dt in steps {
                p.update(dt, &config);
                prop_assert!(p.body.opacity <= last);
                last = p.body.opacity;
            }
        }
    }
}
