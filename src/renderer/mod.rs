//! Backend-agnostic rendering
//!
//! The game only needs two primitives: a textured sprite with position,
//! rotation and opacity, and a line of text. A platform implements
//! `Renderer`; `scene::render_frame` walks the session once per frame.

pub mod scene;

use glam::Vec2;

pub use scene::render_frame;

/// RGBA colour
pub type Color = [u8; 4];

pub const WHITE: Color = [255, 255, 255, 255];
pub const RED: Color = [235, 64, 52, 255];
pub const YELLOW: Color = [250, 210, 60, 255];
pub const GREY: Color = [160, 160, 160, 255];

/// Texture handles the frontend maps to its own assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    /// Player while the damage flash is running
    PlayerHurt,
    MeteorGrey,
    MeteorBrown,
    Laser,
    ExtraLife,
    ExtraScore,
}

/// One sprite draw
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: SpriteId,
    /// Centre position
    pub pos: Vec2,
    pub size: Vec2,
    /// Degrees
    pub rotation: f32,
    pub opacity: u8,
}

/// Drawing surface supplied by the platform
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: &Sprite);

    /// Text anchored at its bottom-left corner
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, size: f32);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite(Sprite),
    Text {
        text: String,
        pos: Vec2,
        color: Color,
        size: f32,
    },
}

/// Renderer that records draw calls (headless runs, tests)
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(s) => Some(s),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for DrawList {
    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.commands.push(DrawCommand::Sprite(sprite.clone()));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, size: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
            size,
        });
    }
}
