//! Game mode state machine

use serde::{Deserialize, Serialize};

/// Top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for start
    #[default]
    Intro,
    /// Active gameplay
    InGame,
    /// Run ended, waiting for start to return to the title
    GameOver,
}

/// Inputs that can move the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// Start button pressed
    Start,
    /// Player has no lives left
    LivesExhausted,
}

impl GameMode {
    /// The single transition function. `None` means the event is ignored.
    pub fn next(self, event: ModeEvent) -> Option<GameMode> {
        match (self, event) {
            (GameMode::Intro, ModeEvent::Start) => Some(GameMode::InGame),
            (GameMode::InGame, ModeEvent::LivesExhausted) => Some(GameMode::GameOver),
            (GameMode::GameOver, ModeEvent::Start) => Some(GameMode::Intro),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Intro => "Intro",
            GameMode::InGame => "InGame",
            GameMode::GameOver => "GameOver",
        }
    }
}
