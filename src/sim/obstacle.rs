//! Meteors to dodge
//!
//! Obstacles spawned on-screen start in a harmless grace window: they drift
//! at a fraction of their speed, fade in, and pass through the player.
//! Edge-spawned replacements are dangerous from the first frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{Body, Entity};
use crate::config::GameConfig;
use crate::to_opacity;

/// Spawner failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    #[error("Unknown obstacle type id: {0}")]
    UnknownObstacleType(u32),
}

const GREY_DIRECTIONS: [Vec2; 8] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, 1.0),
];

const BROWN_DIRECTIONS: [Vec2; 4] = [
    Vec2::new(2.0, 0.0),
    Vec2::new(-2.0, 0.0),
    Vec2::new(0.0, 2.0),
    Vec2::new(0.0, -2.0),
];

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Small grey meteor, eight headings
    Grey,
    /// Large brown meteor, axis-aligned at double pace
    Brown,
}

impl ObstacleKind {
    /// Look up a kind by its config id. Unknown ids are an error, never a default.
    pub fn from_id(id: u32) -> Result<Self, SpawnError> {
        match id {
            1 => Ok(ObstacleKind::Grey),
            2 => Ok(ObstacleKind::Brown),
            other => Err(SpawnError::UnknownObstacleType(other)),
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            ObstacleKind::Grey => 1,
            ObstacleKind::Brown => 2,
        }
    }

    /// Headings to pick from (scaled by obstacle speed)
    pub fn directions(&self) -> &'static [Vec2] {
        match self {
            ObstacleKind::Grey => &GREY_DIRECTIONS,
            ObstacleKind::Brown => &BROWN_DIRECTIONS,
        }
    }

    /// Min/max edge length in units
    pub fn size_range(&self) -> (f32, f32) {
        match self {
            ObstacleKind::Grey => (24.0, 64.0),
            ObstacleKind::Brown => (32.0, 80.0),
        }
    }
}

/// Where a new obstacle appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Anywhere on screen, starting harmless
    OnScreen,
    /// On one of the four screen edges, dangerous immediately
    Edge,
}

/// Screen edge an obstacle crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

/// A meteor
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// `body.vel` holds the full (dangerous) velocity
    pub body: Body,
    /// Seconds of grace left; > 0 means harmless
    pub harmless_remaining: f32,
    /// Degrees per second at full speed
    pub rotation_rate: f32,
    /// Per-instance magnitude multiplier, drawn once
    pub speed_noise: f32,
    alive: bool,
}

impl Obstacle {
    /// Spawn an obstacle of `kind` moving at roughly `speed`
    pub fn spawn<R: Rng>(
        id: u32,
        kind: ObstacleKind,
        speed: f32,
        placement: Placement,
        config: &GameConfig,
        rng: &mut R,
    ) -> Self {
        let directions = kind.directions();
        let direction = directions[rng.random_range(0..directions.len())];
        let speed_noise = rng.random_range(config.speed_noise_min..=config.speed_noise_max);

        let (min_size, max_size) = kind.size_range();
        let size = rng.random_range(min_size..=max_size);

        let (w, h) = (config.screen_width, config.screen_height);
        let pos = match placement {
            Placement::OnScreen => Vec2::new(rng.random_range(0.0..=w), rng.random_range(0.0..=h)),
            Placement::Edge => match rng.random_range(0..4) {
                0 => Vec2::new(0.0, rng.random_range(0.0..=h)),
                1 => Vec2::new(w, rng.random_range(0.0..=h)),
                2 => Vec2::new(rng.random_range(0.0..=w), 0.0),
                _ => Vec2::new(rng.random_range(0.0..=w), h),
            },
        };

        let max_rate = config.max_rotation_rate.abs();
        let rotation_rate = rng.random_range(-max_rate..=max_rate);

        let mut body = Body::new(pos, Vec2::splat(size));
        body.vel = direction * speed * speed_noise;
        body.rotation = rng.random_range(0.0..360.0);

        let mut obstacle = Self {
            id,
            kind,
            body,
            harmless_remaining: 0.0,
            rotation_rate,
            speed_noise,
            alive: true,
        };
        if placement == Placement::OnScreen && config.harmless_duration > 0.0 {
            obstacle.harmless_remaining = config.harmless_duration;
        }
        obstacle.refresh_opacity();
        obstacle
    }

    /// Spawn by config type id
    pub fn spawn_by_id<R: Rng>(
        id: u32,
        type_id: u32,
        speed: f32,
        placement: Placement,
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self, SpawnError> {
        let kind = ObstacleKind::from_id(type_id)?;
        Ok(Self::spawn(id, kind, speed, placement, config, rng))
    }

    #[inline]
    pub fn is_harmless(&self) -> bool {
        self.harmless_remaining > 0.0
    }

    /// Drop the grace window immediately (fully opaque, full speed)
    pub fn make_dangerous(&mut self) {
        self.harmless_remaining = 0.0;
        self.body.opacity = 255;
    }

    /// First screen edge the obstacle has fully crossed, if any
    pub fn exited_edge(&self, config: &GameConfig) -> Option<Edge> {
        let b = &self.body;
        if b.left() > config.screen_width {
            Some(Edge::Right)
        } else if b.right() < 0.0 {
            Some(Edge::Left)
        } else if b.bottom() > config.screen_height {
            Some(Edge::Top)
        } else if b.top() < 0.0 {
            Some(Edge::Bottom)
        } else {
            None
        }
    }

    /// Opacity spikes toward 255 as the grace window closes
    fn refresh_opacity(&mut self) {
        self.body.opacity = if self.is_harmless() {
            to_opacity((255.0 / self.harmless_remaining).min(255.0))
        } else {
            255
        };
    }
}

impl Entity for Obstacle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32, config: &GameConfig) {
        let factor = if self.is_harmless() {
            config.harmless_speed_factor
        } else {
            1.0
        };
        self.body.advance(dt, factor);
        self.body.rotation = (self.body.rotation + self.rotation_rate * factor * dt) % 360.0;

        if let Some(edge) = self.exited_edge(config) {
            log::trace!("Obstacle {} left through {:?} edge", self.id, edge);
            self.alive = false;
            return;
        }

        if self.harmless_remaining > 0.0 {
            self.harmless_remaining = (self.harmless_remaining - dt).max(0.0);
            self.refresh_opacity();
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
