//! Per-mode scene drawing

use glam::Vec2;

use super::{GREY, RED, Renderer, Sprite, SpriteId, WHITE, YELLOW};
use crate::sim::{Entity, GameMode, GameSession, ObstacleKind, PowerUpKind};

const HUD_TEXT_SIZE: f32 = 14.0;
const TITLE_TEXT_SIZE: f32 = 48.0;

fn sprite_of(entity: &impl Entity, id: SpriteId) -> Sprite {
    let body = entity.body();
    Sprite {
        id,
        pos: body.pos,
        size: body.size,
        rotation: body.rotation,
        opacity: body.opacity,
    }
}

/// Draw the current frame. Read-only over the session.
pub fn render_frame<R: Renderer + ?Sized>(session: &GameSession, renderer: &mut R) {
    match session.mode {
        GameMode::Intro => draw_intro(session, renderer),
        GameMode::InGame => {
            draw_entities(session, renderer);
            draw_hud(session, renderer);
        }
        GameMode::GameOver => {
            draw_obstacles(session, renderer);
            draw_game_over(session, renderer);
        }
    }
}

fn draw_obstacles<R: Renderer + ?Sized>(session: &GameSession, renderer: &mut R) {
    for obstacle in &session.obstacles {
        let id = match obstacle.kind {
            ObstacleKind::Grey => SpriteId::MeteorGrey,
            ObstacleKind::Brown => SpriteId::MeteorBrown,
        };
        renderer.draw_sprite(&sprite_of(obstacle, id));
    }
}

fn draw_entities<R: Renderer + ?Sized>(session: &GameSession, renderer: &mut R) {
    for shot in &session.shots {
        renderer.draw_sprite(&sprite_of(shot, SpriteId::Laser));
    }

    let player_sprite = if session.player.is_flashing() {
        SpriteId::PlayerHurt
    } else {
        SpriteId::Player
    };
    renderer.draw_sprite(&sprite_of(&session.player, player_sprite));

    draw_obstacles(session, renderer);

    for powerup in &session.powerups {
        let id = match powerup.kind {
            PowerUpKind::ExtraLife => SpriteId::ExtraLife,
            PowerUpKind::ExtraScore => SpriteId::ExtraScore,
        };
        renderer.draw_sprite(&sprite_of(powerup, id));
    }
}

fn draw_hud<R: Renderer + ?Sized>(session: &GameSession, renderer: &mut R) {
    let top = session.config().screen_height - 20.0;
    let lives_color = if session.player.is_flashing() { RED } else { WHITE };
    renderer.draw_text(
        &format!("LIVES: {}", session.player.lives),
        Vec2::new(10.0, top),
        lives_color,
        HUD_TEXT_SIZE,
    );
    renderer.draw_text(
        &format!("SCORE: {}", session.player.score),
        Vec2::new(10.0, top - 20.0),
        WHITE,
        HUD_TEXT_SIZE,
    );
    renderer.draw_text(
        &format!(
            "LEVEL: {}  ({:.0}s)",
            session.level,
            session.level_time_remaining.max(0.0).ceil()
        ),
        Vec2::new(10.0, top - 40.0),
        WHITE,
        HUD_TEXT_SIZE,
    );
}

fn draw_intro<R: Renderer + ?Sized>(session: &GameSession, renderer: &mut R) {
    let config = session.config();
    let mid = Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0);
    renderer.draw_text(
        "METEOR DASH",
        mid + Vec2::new(-160.0, 60.0),
        YELLOW,
        TITLE_TEXT_SIZE,
    );
    renderer.draw_text(
        "Arrows move, Space dashes",
        mid + Vec2::new(-120.0, 0.0),
        GREY,
        HUD_TEXT_SIZE,
    );
    renderer.draw_text(
        "Press ENTER to start",
        mid + Vec2::new(-95.0, -30.0),
        WHITE,
        HUD_TEXT_SIZE,
    );
}

fn draw_game_over<R: Renderer + ?Sized>(session: &GameSession, renderer: &mut R) {
    let config = session.config();
    let mid = Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0);
    renderer.draw_text("GAME OVER", mid + Vec2::new(-130.0, 40.0), RED, TITLE_TEXT_SIZE);
    renderer.draw_text(
        &format!("SCORE: {}   LEVEL: {}", session.player.score, session.level),
        mid + Vec2::new(-90.0, 0.0),
        WHITE,
        HUD_TEXT_SIZE,
    );
    renderer.draw_text(
        "Press ENTER",
        mid + Vec2::new(-50.0, -30.0),
        GREY,
        HUD_TEXT_SIZE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::renderer::DrawList;
    use crate::sim::ModeEvent;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), 5).expect("valid config")
    }

    #[test]
    fn test_intro_draws_title_only() {
        let s = session();
        let mut list = DrawList::new();
        render_frame(&s, &mut list);
        assert_eq!(list.sprites().count(), 0);
        assert!(list.texts().any(|t| t == "METEOR DASH"));
    }

    #[test]
    fn test_in_game_draws_entities_and_hud() {
        let mut s = session();
        s.handle(ModeEvent::Start);
        s.spawn_powerup();
        let mut list = DrawList::new();
        render_frame(&s, &mut list);

        // Player + obstacles + power-up
        assert_eq!(list.sprites().count(), 1 + s.obstacles.len() + 1);
        assert!(list.sprites().any(|sp| sp.id == SpriteId::Player));
        assert!(list.texts().any(|t| t == "LIVES: 5"));
        assert!(list.texts().any(|t| t.starts_with("LEVEL: 1")));
    }

    #[test]
    fn test_hurt_sprite_while_flashing() {
        let mut s = session();
        s.handle(ModeEvent::Start);
        let config = s.config().clone();
        s.player.take_damage(&config);
        let mut list = DrawList::new();
        render_frame(&s, &mut list);
        assert!(list.sprites().any(|sp| sp.id == SpriteId::PlayerHurt));
        assert!(!list.sprites().any(|sp| sp.id == SpriteId::Player));
    }

    #[test]
    fn test_game_over_shows_opaque_obstacles() {
        let mut s = session();
        s.handle(ModeEvent::Start);
        s.handle(ModeEvent::LivesExhausted);
        let mut list = DrawList::new();
        render_frame(&s, &mut list);
        assert_eq!(list.sprites().count(), s.obstacles.len());
        assert!(list.sprites().all(|sp| sp.opacity == 255));
        assert!(list.texts().any(|t| t == "GAME OVER"));
    }
}
