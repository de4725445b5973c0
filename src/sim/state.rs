//! Game session state
//!
//! Owns the player, every entity collection, the mode and the level
//! bookkeeping. All randomness flows through one seeded RNG.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::Entity;
use super::mode::{GameMode, ModeEvent};
use super::obstacle::{Obstacle, ObstacleKind, Placement};
use super::pickup::{PowerUp, PowerUpKind};
use super::player::Player;
use super::shot::PlayerShot;
use crate::config::{ConfigError, GameConfig};

/// Something that happened during a tick, for audio/UI to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ModeChanged { from: GameMode, to: GameMode },
    LevelStarted { level: u32, target_obstacles: u32, obstacle_speed: f32 },
    PlayerHit { lives: u32 },
    PowerUpCollected { kind: PowerUpKind },
    Dashed,
    ShotFired,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) config: GameConfig,
    obstacle_kinds: Vec<ObstacleKind>,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub mode: GameMode,
    /// Current level (0 before the first game starts)
    pub level: u32,
    /// Seconds until the next level transition
    pub level_time_remaining: f32,
    /// Obstacle count the spawner keeps topped up
    pub target_obstacles: u32,
    /// Base obstacle speed for new spawns (never above the configured max)
    pub obstacle_speed: f32,
    /// Seconds until the next power-up spawns
    pub powerup_timer: f32,
    pub player: Player,
    /// Ordered by id
    pub obstacles: Vec<Obstacle>,
    /// Ordered by id
    pub shots: Vec<PlayerShot>,
    /// Ordered by id
    pub powerups: Vec<PowerUp>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Create a session in `Intro`. Fails on an invalid config.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected config: {}", e);
            return Err(e);
        }
        let obstacle_kinds = config.obstacle_kinds()?;

        Ok(Self {
            player: Player::new(&config),
            obstacle_kinds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: GameMode::Intro,
            level: 0,
            level_time_remaining: config.level_duration,
            target_obstacles: config.obstacle_initial_count,
            obstacle_speed: config.obstacle_base_speed.min(config.obstacle_max_speed),
            powerup_timer: config.powerup_interval,
            obstacles: Vec::new(),
            shots: Vec::new(),
            powerups: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all recorded events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Feed an event to the mode state machine, running entry actions on a
    /// transition. Returns true if the mode changed.
    pub fn handle(&mut self, event: ModeEvent) -> bool {
        let from = self.mode;
        let Some(to) = from.next(event) else {
            return false;
        };
        self.mode = to;
        log::info!("Mode {} -> {}", from.as_str(), to.as_str());
        self.push_event(GameEvent::ModeChanged { from, to });

        match to {
            GameMode::InGame => self.start_game(),
            GameMode::GameOver => {
                log::info!(
                    "Game over at level {} with score {}",
                    self.level,
                    self.player.score
                );
                for obstacle in &mut self.obstacles {
                    obstacle.make_dangerous();
                }
            }
            GameMode::Intro => self.reset_lives(),
        }
        true
    }

    /// Fresh run: new player, empty collections, level 1
    pub fn start_game(&mut self) {
        self.player = Player::new(&self.config);
        self.shots.clear();
        self.powerups.clear();
        self.level = 0;
        self.target_obstacles = self.config.obstacle_initial_count;
        self.obstacle_speed = self.config.obstacle_base_speed;
        self.powerup_timer = self.config.powerup_interval;
        self.next_level();
    }

    /// Level transition: reset the clock, grow target count and speed,
    /// regenerate every obstacle on-screen (all start harmless)
    pub fn next_level(&mut self) {
        self.level_time_remaining = self.config.level_duration;
        self.target_obstacles = self.target_obstacles.saturating_add(self.level);
        self.level += 1;
        self.obstacle_speed *= self.config.obstacle_speed_growth;
        self.clamp_obstacle_speed();

        let mut obstacles = Vec::with_capacity(self.target_obstacles as usize);
        for _ in 0..self.target_obstacles {
            obstacles.push(self.spawn_obstacle(Placement::OnScreen));
        }
        self.obstacles = obstacles;

        log::info!(
            "Level {}: {} obstacles at speed {:.1}",
            self.level,
            self.target_obstacles,
            self.obstacle_speed
        );
        self.push_event(GameEvent::LevelStarted {
            level: self.level,
            target_obstacles: self.target_obstacles,
            obstacle_speed: self.obstacle_speed,
        });
    }

    pub fn clamp_obstacle_speed(&mut self) {
        if self.obstacle_speed > self.config.obstacle_max_speed {
            self.obstacle_speed = self.config.obstacle_max_speed;
        }
    }

    /// New obstacle of a random configured kind at the current speed
    pub fn spawn_obstacle(&mut self, placement: Placement) -> Obstacle {
        let id = self.next_entity_id();
        let kind = self.obstacle_kinds[self.rng.random_range(0..self.obstacle_kinds.len())];
        Obstacle::spawn(
            id,
            kind,
            self.obstacle_speed,
            placement,
            &self.config,
            &mut self.rng,
        )
    }

    /// Edge-spawn until the live count reaches the target
    pub fn replenish_obstacles(&mut self) {
        while self.obstacles.len() < self.target_obstacles as usize {
            let obstacle = self.spawn_obstacle(Placement::Edge);
            log::trace!("Replenished obstacle {}", obstacle.id);
            self.obstacles.push(obstacle);
        }
    }

    /// Random power-up at a random on-screen position
    pub fn spawn_powerup(&mut self) {
        let id = self.next_entity_id();
        let powerup = PowerUp::spawn(id, &self.config, &mut self.rng);
        log::debug!("Spawned {:?} at {:?}", powerup.kind, powerup.body.pos);
        self.powerups.push(powerup);
    }

    /// Fire a shot from the ship's nose
    pub fn fire_shot(&mut self) {
        let id = self.next_entity_id();
        let nose = self.player.body.pos + glam::Vec2::new(0.0, self.player.body.size.y / 2.0);
        self.shots.push(PlayerShot::new(id, nose, &self.config));
        self.push_event(GameEvent::ShotFired);
    }

    /// Restore the starting life count (run every frame outside gameplay)
    pub fn reset_lives(&mut self) {
        self.player.lives = self.config.player_lives;
    }

    /// Drop dead entities, keeping id order
    pub fn remove_dead(&mut self) {
        self.obstacles.retain(|o| o.is_alive());
        self.shots.retain(|s| s.is_alive());
        self.powerups.retain(|p| p.is_alive());
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
        self.shots.sort_by_key(|s| s.id);
        self.powerups.sort_by_key(|p| p.id);
    }
}
