//! Per-frame simulation update
//!
//! Variable timestep: every timer and velocity is scaled by the frame delta.

use glam::Vec2;

use super::collision::collide_with_list;
use super::entity::Entity;
use super::mode::{GameMode, ModeEvent};
use super::state::{GameEvent, GameSession};
use crate::config::GameConfig;
use crate::round_axis;

/// Distance at which the autopilot starts evading an obstacle
const IDLE_THREAT_RADIUS: f32 = 180.0;
/// Distance at which the autopilot dashes away
const IDLE_DASH_RADIUS: f32 = 70.0;

/// Input state for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction buttons
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Analog stick (+y is up). Overrides the buttons when present.
    pub analog: Option<Vec2>,
    /// Dash pressed this frame
    pub dash: bool,
    /// Fire pressed this frame (ignored unless shots are enabled)
    pub fire: bool,
    /// Start pressed this frame
    pub start: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(session, &mut input);
    }
    let input = &input;

    match session.mode {
        GameMode::Intro | GameMode::GameOver => {
            // Lives stay at the starting value outside gameplay
            session.reset_lives();
            if input.start {
                session.handle(ModeEvent::Start);
            }
        }
        GameMode::InGame => update_in_game(session, input, dt),
    }

    // Ensure deterministic ordering
    session.normalize_order();
}

fn update_in_game(session: &mut GameSession, input: &TickInput, dt: f32) {
    // Intent from buttons or stick
    let intent = player_intent(input, &session.config);
    session.player.set_intent(intent.x, intent.y);

    if input.dash && session.player.dash(&session.config) {
        log::debug!("Dash");
        session.push_event(GameEvent::Dashed);
    }
    if input.fire && session.config.shots_enabled {
        session.fire_shot();
    }

    // Player vs obstacles
    let hits = collide_with_list(&session.player, &session.obstacles);
    for i in hits {
        if session.obstacles[i].is_harmless() || session.player.dashing {
            continue;
        }
        if session.player.take_damage(&session.config) {
            let lives = session.player.lives;
            log::debug!("Hit by obstacle {}, {} lives left", session.obstacles[i].id, lives);
            session.push_event(GameEvent::PlayerHit { lives });
        }
    }

    // Player vs power-ups
    let pickups = collide_with_list(&session.player, &session.powerups);
    for i in pickups {
        if let Some(kind) = session.powerups[i].pick_up(&mut session.player, &session.config) {
            log::debug!("Picked up {:?}", kind);
            session.push_event(GameEvent::PowerUpCollected { kind });
        }
    }
    session.powerups.retain(|p| p.is_alive());

    // Facing follows movement direction
    if let Some(angle) = facing_angle(session.player.body.vel, session.player.body.rotation) {
        session.player.desired_angle = angle;
    }

    session.player.update(dt, &session.config);

    // Power-up spawning
    session.powerup_timer -= dt;
    if session.powerup_timer <= 0.0 {
        session.spawn_powerup();
        session.powerup_timer = session.config.powerup_interval;
    }

    session.replenish_obstacles();

    for obstacle in &mut session.obstacles {
        obstacle.update(dt, &session.config);
    }
    for powerup in &mut session.powerups {
        powerup.update(dt, &session.config);
    }
    if session.config.shots_enabled {
        for shot in &mut session.shots {
            shot.update(dt, &session.config);
        }
    }
    session.remove_dead();

    // Level clock
    session.level_time_remaining -= dt;
    if session.level_time_remaining <= 0.0 {
        session.next_level();
    }

    session.clamp_obstacle_speed();

    if session.player.lives < 1 {
        session.handle(ModeEvent::LivesExhausted);
    }
}

/// Desired velocity from the frame's input. Buttons select exactly one axis
/// (left, right, up, down in that precedence); a stick overrides them.
pub fn player_intent(input: &TickInput, config: &GameConfig) -> Vec2 {
    let mut intent = Vec2::ZERO;

    if input.left && !input.right {
        intent.x = -config.player_speed_x;
    } else if input.right && !input.left {
        intent.x = config.player_speed_x;
    } else if input.up && !input.down {
        intent.y = config.player_speed_y;
    } else if input.down && !input.up {
        intent.y = -config.player_speed_y;
    }

    if let Some(stick) = input.analog {
        intent.x = round_axis(stick.x) * config.player_speed_x;
        intent.y = round_axis(stick.y) * config.player_speed_y;
    }

    intent
}

#[inline]
fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Eight-way facing lookup in degrees (0 = up, positive = counter-clockwise).
///
/// Straight down picks 180 or -180 to match the side `current` is on, so the
/// ship turns the short way. `None` when there is no movement.
pub fn facing_angle(vel: Vec2, current: f32) -> Option<f32> {
    let angle = match (sign(vel.x), sign(vel.y)) {
        (0, 0) => return None,
        (1, 0) => -90.0,
        (0, 1) => 0.0,
        (-1, 0) => 90.0,
        (0, _) => {
            if current >= 0.0 {
                180.0
            } else {
                -180.0
            }
        }
        (1, 1) => -45.0,
        (-1, 1) => 45.0,
        (-1, _) => 135.0,
        (_, _) => -135.0,
    };
    Some(angle)
}

/// Demo driver: flee the nearest dangerous obstacle, otherwise chase the
/// nearest power-up, and press start on the static screens
fn autopilot(session: &GameSession, input: &mut TickInput) {
    if session.mode != GameMode::InGame {
        input.start = true;
        return;
    }

    let me = session.player.body.pos;
    let threat = session
        .obstacles
        .iter()
        .filter(|o| !o.is_harmless())
        .map(|o| (o.body.pos, o.body.pos.distance(me)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let target = session
        .powerups
        .iter()
        .map(|p| p.body.pos)
        .min_by(|a, b| {
            a.distance(me)
                .partial_cmp(&b.distance(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let direction = match (threat, target) {
        (Some((pos, dist)), _) if dist < IDLE_THREAT_RADIUS => {
            if dist < IDLE_DASH_RADIUS {
                input.dash = true;
            }
            // Away from the threat, biased back toward the middle
            let centre = Vec2::new(
                session.config().screen_width / 2.0,
                session.config().screen_height / 2.0,
            );
            (me - pos).normalize_or_zero() * 2.0 + (centre - me).normalize_or_zero()
        }
        (_, Some(pos)) => pos - me,
        _ => Vec2::ZERO,
    };

    input.analog = Some(direction.normalize_or_zero());
}
