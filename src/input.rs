//! Keyboard input model
//!
//! The host keeps a set of held keys (arrows, sampled every tick) and queues
//! discrete key presses (space, H, S, M) that the scene controller consumes
//! once per frame.

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Help,
    Sierra,
    Music,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            " " => Some(Key::Space),
            "h" | "H" => Some(Key::Help),
            "s" | "S" => Some(Key::Sierra),
            "m" | "M" => Some(Key::Music),
            _ => None,
        }
    }
}

/// Continuous movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    /// Record a key going down or up; non-movement keys are ignored
    pub fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Up => self.up = down,
            Key::Down => self.down = down,
            _ => {}
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Everything the controller needs for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Movement keys held at sample time
    pub held: HeldKeys,
    /// Discrete presses since the previous frame, in arrival order
    pub pressed: Vec<Key>,
    /// Real time elapsed since the previous frame (ms)
    pub dt_ms: f64,
}

impl FrameInput {
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}
