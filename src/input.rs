//! Input tracking
//!
//! Turns discrete key down/up events and an optional analog stick into the
//! per-frame `TickInput` the simulation consumes.

use glam::Vec2;

use crate::sim::TickInput;

/// Logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Dash,
    Fire,
    Start,
    Quit,
}

impl Button {
    /// Default keyboard layout (DOM-style key names)
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Button::Up),
            "ArrowDown" | "s" | "S" => Some(Button::Down),
            "ArrowLeft" | "a" | "A" => Some(Button::Left),
            "ArrowRight" | "d" | "D" => Some(Button::Right),
            " " => Some(Button::Dash),
            "f" | "F" => Some(Button::Fire),
            "Enter" => Some(Button::Start),
            "Escape" => Some(Button::Quit),
            _ => None,
        }
    }
}

/// A key transition from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Button),
    Up(Button),
}

/// Accumulated input between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    dash_held: bool,
    fire_held: bool,
    start_held: bool,
    // One-shot presses, cleared by `frame_input`
    dash_pressed: bool,
    fire_pressed: bool,
    start_pressed: bool,
    analog: Option<Vec2>,
    quit: bool,
    /// Let the autopilot drive
    pub idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(button) => self.key_down(button),
            KeyEvent::Up(button) => self.key_up(button),
        }
    }

    pub fn key_down(&mut self, button: Button) {
        match button {
            Button::Up => self.up = true,
            Button::Down => self.down = true,
            Button::Left => self.left = true,
            Button::Right => self.right = true,
            // Key repeat does not re-trigger one-shot buttons
            Button::Dash => {
                self.dash_pressed |= !self.dash_held;
                self.dash_held = true;
            }
            Button::Fire => {
                self.fire_pressed |= !self.fire_held;
                self.fire_held = true;
            }
            Button::Start => {
                self.start_pressed |= !self.start_held;
                self.start_held = true;
            }
            Button::Quit => {
                log::info!("Quit requested");
                self.quit = true;
            }
        }
    }

    pub fn key_up(&mut self, button: Button) {
        match button {
            Button::Up => self.up = false,
            Button::Down => self.down = false,
            Button::Left => self.left = false,
            Button::Right => self.right = false,
            Button::Dash => self.dash_held = false,
            Button::Fire => self.fire_held = false,
            Button::Start => self.start_held = false,
            Button::Quit => {}
        }
    }

    /// Update the analog stick; axes are clamped to [-1, 1], +y is up
    pub fn set_analog(&mut self, x: f32, y: f32) {
        let clamp = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        self.analog = Some(Vec2::new(clamp(x), clamp(y)));
    }

    /// Stick unplugged
    pub fn clear_analog(&mut self) {
        self.analog = None;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Snapshot for this frame; one-shot presses are consumed
    pub fn frame_input(&mut self) -> TickInput {
        let input = TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            analog: self.analog,
            dash: self.dash_pressed,
            fire: self.fire_pressed,
            start: self.start_pressed,
            idle_mode: self.idle_mode,
        };
        self.dash_pressed = false;
        self.fire_pressed = false;
        self.start_pressed = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_direction_persists() {
        let mut input = InputState::new();
        input.apply(KeyEvent::Down(Button::Left));
        assert!(input.frame_input().left);
        assert!(input.frame_input().left);
        input.apply(KeyEvent::Up(Button::Left));
        assert!(!input.frame_input().left);
    }

    #[test]
    fn test_one_shot_consumed_once() {
        let mut input = InputState::new();
        input.key_down(Button::Dash);
        assert!(input.frame_input().dash);
        assert!(!input.frame_input().dash);

        // Auto-repeat while held does not re-press
        input.key_down(Button::Dash);
        assert!(!input.frame_input().dash);

        input.key_up(Button::Dash);
        input.key_down(Button::Dash);
        assert!(input.frame_input().dash);
    }

    #[test]
    fn test_start_and_quit() {
        let mut input = InputState::new();
        input.key_down(Button::Start);
        input.key_down(Button::Quit);
        let frame = input.frame_input();
        assert!(frame.start);
        assert!(input.quit_requested());
    }

    #[test]
    fn test_analog_clamped() {
        let mut input = InputState::new();
        input.set_analog(2.0, f32::NAN);
        assert_eq!(input.frame_input().analog, Some(Vec2::new(1.0, 0.0)));
        input.clear_analog();
        assert_eq!(input.frame_input().analog, None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Button::from_key_name("ArrowRight"), Some(Button::Right));
        assert_eq!(Button::from_key_name(" "), Some(Button::Dash));
        assert_eq!(Button::from_key_name("Enter"), Some(Button::Start));
        assert_eq!(Button::from_key_name("q"), None);
    }
}
