//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod mode;
pub mod obstacle;
pub mod pickup;
pub mod player;
pub mod shot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, collide_with_list};
pub use entity::{Body, Entity};
pub use mode::{GameMode, ModeEvent};
pub use obstacle::{Edge, Obstacle, ObstacleKind, Placement, SpawnError};
pub use pickup::{PowerUp, PowerUpKind};
pub use player::Player;
pub use shot::PlayerShot;
pub use state::{GameEvent, GameSession};
pub use tick::{TickInput, facing_angle, player_intent, tick};
