//! The player's ship

use glam::Vec2;

use super::entity::{Body, Entity};
use crate::config::GameConfig;

/// The player's ship: lives, score, dash and damage-flash state
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub lives: u32,
    /// Never decreases during play
    pub score: u64,
    /// Fractional survival points not yet credited to `score`
    score_carry: f32,
    pub dashing: bool,
    /// Seconds left in the active dash
    pub dash_remaining: f32,
    /// Seconds before another dash is allowed
    pub dash_cooldown: f32,
    /// Seconds left in the post-hit flash (no further damage while > 0)
    pub flash_remaining: f32,
    /// Facing angle the rotation eases toward (degrees)
    pub desired_angle: f32,
}

impl Player {
    /// New ship centred on the playfield
    pub fn new(config: &GameConfig) -> Self {
        let start = Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0);
        Self {
            body: Body::new(start, Vec2::new(config.player_width, config.player_height)),
            lives: config.player_lives,
            score: 0,
            score_carry: 0.0,
            dashing: false,
            dash_remaining: 0.0,
            dash_cooldown: 0.0,
            flash_remaining: 0.0,
            desired_angle: 0.0,
        }
    }

    /// Desired velocity for the coming update
    pub fn set_intent(&mut self, dx: f32, dy: f32) {
        self.body.vel = Vec2::new(dx, dy);
    }

    /// Start a dash. Returns false if already dashing or cooling down.
    pub fn dash(&mut self, config: &GameConfig) -> bool {
        if self.dashing || self.dash_cooldown > 0.0 {
            return false;
        }
        self.dashing = true;
        self.dash_remaining = config.dash_duration;
        self.dash_cooldown = config.dash_cooldown;
        self.body.opacity = config.dash_opacity;
        true
    }

    /// Apply a hit. Returns false while the damage flash is still running.
    pub fn take_damage(&mut self, config: &GameConfig) -> bool {
        if self.is_flashing() {
            return false;
        }
        self.lives = self.lives.saturating_sub(config.damage_amount);
        self.flash_remaining = config.damage_flash_duration;
        true
    }

    #[inline]
    pub fn is_flashing(&self) -> bool {
        self.flash_remaining > 0.0
    }

    /// Credit bonus points
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Keep the ship inside the playfield. Only one edge is corrected per
    /// frame, in the order left, right, top, bottom.
    fn clamp_to_screen(&mut self, config: &GameConfig) {
        let max_x = config.screen_width - 1.0;
        let max_y = config.screen_height - 1.0;
        let body = &mut self.body;
        if body.left() < 0.0 {
            body.set_left(0.0);
        } else if body.right() > max_x {
            body.set_right(max_x);
        } else if body.top() > max_y {
            body.set_top(max_y);
        } else if body.bottom() < 0.0 {
            body.set_bottom(0.0);
        }
    }

    fn accumulate_score(&mut self, dt: f32, rate: f32) {
        if dt <= 0.0 || rate <= 0.0 {
            return;
        }
        self.score_carry += rate * dt;
        let whole = self.score_carry.floor();
        if whole >= 1.0 {
            self.score = self.score.saturating_add(whole as u64);
            self.score_carry -= whole;
        }
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32, config: &GameConfig) {
        // Dash timer, then cooldown (which only runs once the dash is over)
        if self.dashing {
            self.dash_remaining -= dt;
            if self.dash_remaining <= 0.0 {
                self.dashing = false;
                self.dash_remaining = 0.0;
                self.body.opacity = 255;
            }
        } else if self.dash_cooldown > 0.0 {
            self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);
        }

        if self.flash_remaining > 0.0 {
            self.flash_remaining = (self.flash_remaining - dt).max(0.0);
        }

        // Ease toward the desired facing
        self.body.rotation -= (self.body.rotation - self.desired_angle) / config.rotation_smoothing;

        let scale = if self.dashing {
            config.dash_speed_multiplier
        } else {
            1.0
        };
        self.body.advance(dt, scale);
        self.clamp_to_screen(config);

        self.accumulate_score(dt, config.score_per_second);
    }

    fn is_alive(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_new_player_centered() {
        let config = config();
        let player = Player::new(&config);
        assert_eq!(player.body.pos, Vec2::new(400.0, 400.0));
        assert_eq!(player.lives, config.player_lives);
        assert_eq!(player.score, 0);
        assert_eq!(player.body.opacity, 255);
    }

    #[test]
    fn test_dash_only_once_within_cooldown() {
        let config = config();
        let mut player = Player::new(&config);
        assert!(player.dash(&config));
        assert!(!player.dash(&config));
        assert_eq!(player.body.opacity, config.dash_opacity);

        // Dash ends, cooldown still pending
        for _ in 0..30 {
            player.update(DT, &config);
        }
        assert!(!player.dashing);
        assert!(player.dash_cooldown > 0.0);
        assert_eq!(player.body.opacity, 255);
        assert!(!player.dash(&config));
    }

    #[test]
    fn test_dash_duration_not_extended() {
        let config = config();
        let mut player = Player::new(&config);

        // Mash dash every frame for four seconds
        let mut activations = 0;
        let mut run = 0;
        let mut longest_run = 0;
        for _ in 0..240 {
            if player.dash(&config) {
                activations += 1;
            }
            if player.dashing {
                run += 1;
                longest_run = longest_run.max(run);
            } else {
                run = 0;
            }
            player.update(DT, &config);
        }
        assert!(longest_run as f32 * DT <= config.dash_duration + 2.0 * DT);
        // Each cycle is one dash plus the full cooldown
        let cycle = config.dash_duration + config.dash_cooldown;
        assert!(activations <= (4.0 / cycle).ceil() as usize);
        assert!(activations >= 2);
    }

    #[test]
    fn test_cooldown_runs_after_dash() {
        let config = config();
        let mut player = Player::new(&config);
        player.dash(&config);
        // 0.3s dash + 1.0s cooldown + a little slack
        let frames = ((config.dash_duration + config.dash_cooldown) / DT).ceil() as usize + 4;
        for _ in 0..frames {
            player.update(DT, &config);
        }
        assert_eq!(player.dash_cooldown, 0.0);
        assert!(player.dash(&config));
    }

    #[test]
    fn test_dash_triples_speed() {
        let config = config();
        let mut walker = Player::new(&config);
        let mut dasher = Player::new(&config);
        walker.set_intent(60.0, 0.0);
        dasher.set_intent(60.0, 0.0);
        dasher.dash(&config);

        walker.update(0.1, &config);
        dasher.update(0.1, &config);
        assert!((walker.body.pos.x - 406.0).abs() < 1e-3);
        assert!((dasher.body.pos.x - 418.0).abs() < 1e-3);
    }

    #[test]
    fn test_damage_once_per_flash() {
        let config = config();
        let mut player = Player::new(&config);
        assert!(player.take_damage(&config));
        assert!(!player.take_damage(&config));
        assert_eq!(player.lives, config.player_lives - 1);
        assert!(player.is_flashing());

        let frames = (config.damage_flash_duration / DT).ceil() as usize + 1;
        for _ in 0..frames {
            player.update(DT, &config);
        }
        assert!(!player.is_flashing());
        assert!(player.take_damage(&config));
        assert_eq!(player.lives, config.player_lives - 2);
    }

    #[test]
    fn test_lives_never_underflow() {
        let config = GameConfig {
            player_lives: 1,
            damage_amount: 3,
            ..Default::default()
        };
        let mut player = Player::new(&config);
        player.take_damage(&config);
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn test_rotation_eases_by_tenth() {
        let config = config();
        let mut player = Player::new(&config);
        player.desired_angle = -90.0;
        player.update(DT, &config);
        assert!((player.body.rotation - -9.0).abs() < 1e-4);
        player.update(DT, &config);
        assert!((player.body.rotation - -17.1).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_single_edge_per_frame() {
        let config = config();
        let mut player = Player::new(&config);
        // Past both the left and bottom edges: only left is corrected
        player.body.pos = Vec2::new(-50.0, -50.0);
        player.update(DT, &config);
        assert_eq!(player.body.left(), 0.0);
        assert!(player.body.bottom() < 0.0);
        // Next frame fixes the bottom
        player.update(DT, &config);
        assert_eq!(player.body.bottom(), 0.0);
    }

    #[test]
    fn test_clamp_right_and_top() {
        let config = config();
        let mut player = Player::new(&config);
        player.body.pos = Vec2::new(900.0, 400.0);
        player.update(DT, &config);
        assert_eq!(player.body.right(), config.screen_width - 1.0);

        player.body.pos = Vec2::new(400.0, 900.0);
        player.update(DT, &config);
        assert_eq!(player.body.top(), config.screen_height - 1.0);
    }

    #[test]
    fn test_score_accrues_with_time() {
        let config = config();
        let mut player = Player::new(&config);
        for _ in 0..60 {
            player.update(DT, &config);
        }
        // 10 points per second, allow for float carry
        assert!((9..=10).contains(&player.score));
        let before = player.score;
        for _ in 0..60 {
            player.update(DT, &config);
        }
        assert!(player.score >= before);
    }
}
