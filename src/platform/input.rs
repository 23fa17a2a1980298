//! Keyboard state
//!
//! Arrow keys are held inputs. Jump, dash and respawn are presses: they latch
//! on key down until the frame loop takes a snapshot, and OS auto-repeat
//! never re-triggers them.

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Dash,
    Respawn,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Jump),
            "z" | "Z" => Some(Key::Dash),
            "Enter" => Some(Key::Respawn),
            _ => None,
        }
    }
}

/// Held and pressed key state between frames
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    left: bool,
    right: bool,
    jump: bool,
    dash: bool,
    respawn: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. `repeat` is the DOM auto-repeat flag.
    pub fn key_down(&mut self, key: Key, repeat: bool) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            _ if repeat => {}
            Key::Jump => self.jump = true,
            Key::Dash => self.dash = true,
            Key::Respawn => self.respawn = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            _ => {}
        }
    }

    /// Release everything (window lost focus)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Current input; presses are handed over once
    pub fn take_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
            dash: self.dash,
            respawn: self.respawn,
        };
        self.jump = false;
        self.dash = false;
        self.respawn = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom(" "), Some(Key::Jump));
        assert_eq!(Key::from_dom("Z"), Some(Key::Dash));
        assert_eq!(Key::from_dom("Enter"), Some(Key::Respawn));
        assert_eq!(Key::from_dom("ArrowUp"), None);
    }

    #[test]
    fn test_held_keys_persist_until_released() {
        let mut kb = Keyboard::new();
        kb.key_down(Key::Right, false);
        assert!(kb.take_input().right);
        assert!(kb.take_input().right);
        kb.key_up(Key::Right);
        assert!(!kb.take_input().right);
    }

    #[test]
    fn test_press_handed_over_once() {
        let mut kb = Keyboard::new();
        kb.key_down(Key::Jump, false);
        // Released before the frame ran: still counts
        kb.key_up(Key::Jump);
        assert!(kb.take_input().jump);
        assert!(!kb.take_input().jump);
    }

    #[test]
    fn test_auto_repeat_does_not_retrigger() {
        let mut kb = Keyboard::new();
        kb.key_down(Key::Dash, false);
        assert!(kb.take_input().dash);
        kb.key_down(Key::Dash, true);
        assert!(!kb.take_input().dash);
    }

    #[test]
    fn test_release_all() {
        let mut kb = Keyboard::new();
        kb.key_down(Key::Left, false);
        kb.key_down(Key::Respawn, false);
        kb.release_all();
        assert_eq!(kb.take_input(), TickInput::default());
    }
}
