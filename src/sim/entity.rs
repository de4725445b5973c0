//! Shared geometry and the entity capability trait
//!
//! Every moving thing on the playfield carries a `Body`: centre position,
//! velocity, rotation and opacity plus a fixed size for its bounding box.

use glam::Vec2;

use super::collision::Aabb;
use crate::config::GameConfig;

/// Positional/visual component composed into each entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Centre of the entity (y grows upward)
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    /// Rotation in degrees (0 = facing up)
    pub rotation: f32,
    /// 0 = invisible, 255 = opaque
    pub opacity: u8,
    /// Full width/height of the bounding box
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            opacity: 255,
            size,
        }
    }

    /// Axis-aligned bounding box around the centre
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x + self.size.x / 2.0;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x / 2.0;
    }

    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y - self.size.y / 2.0;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y + self.size.y / 2.0;
    }

    /// Advance position by `vel * scale * dt`, ignoring non-finite results
    pub fn advance(&mut self, dt: f32, scale: f32) {
        let next = self.pos + self.vel * scale * dt;
        if next.is_finite() {
            self.pos = next;
        }
    }
}

/// Capability the session polls over every entity variant
pub trait Entity {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Advance one frame
    fn update(&mut self, dt: f32, config: &GameConfig);

    /// False once the entity should be dropped from its collection
    fn is_alive(&self) -> bool;

    fn bounds(&self) -> Aabb {
        self.body().bounds()
    }
}
