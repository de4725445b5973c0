//! Sound effect dispatch
//!
//! The simulation never plays audio itself; it records `GameEvent`s and the
//! frontend hands them to an `AudioManager`, which forwards fire-and-forget
//! requests to whatever backend the platform provides.

use crate::sim::{GameEvent, GameMode};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Power-up collected
    PickupCollect,
    /// Ship took damage
    PlayerHit,
    /// Dash started
    Dash,
    /// Shot fired
    Shot,
    /// New level began
    LevelUp,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Sound to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PickupCollect),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHit),
            GameEvent::Dashed => Some(SoundEffect::Dash),
            GameEvent::ShotFired => Some(SoundEffect::Shot),
            GameEvent::LevelStarted { level, .. } if *level > 1 => Some(SoundEffect::LevelUp),
            GameEvent::ModeChanged {
                to: GameMode::GameOver,
                ..
            } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }

    /// Mix level relative to the other effects
    fn gain(&self) -> f32 {
        match self {
            SoundEffect::PickupCollect => 0.6,
            SoundEffect::PlayerHit => 0.8,
            SoundEffect::Dash => 0.3,
            SoundEffect::Shot => 0.25,
            SoundEffect::LevelUp => 0.5,
            SoundEffect::GameOver => 0.7,
        }
    }
}

/// Platform sound output. Must not block.
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs what would have played
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Sound {:?} at volume {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol * effect.gain());
    }

    /// Play whatever the given events call for
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
