//! Player shots (only fired when `shots_enabled` is set)

use glam::Vec2;

use super::entity::{Body, Entity};
use crate::config::GameConfig;

/// A straight-up projectile
#[derive(Debug, Clone)]
pub struct PlayerShot {
    pub id: u32,
    pub body: Body,
    alive: bool,
}

impl PlayerShot {
    pub fn new(id: u32, pos: Vec2, config: &GameConfig) -> Self {
        let mut body = Body::new(pos, Vec2::new(config.shot_width, config.shot_height));
        body.vel = Vec2::new(0.0, config.shot_speed);
        Self {
            id,
            body,
            alive: true,
        }
    }
}

impl Entity for PlayerShot {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32, config: &GameConfig) {
        self.body.advance(dt, 1.0);
        if self.body.bottom() > config.screen_height {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
