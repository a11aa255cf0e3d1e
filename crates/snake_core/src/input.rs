//! Keyboard state tracking with both edge-triggered and level-triggered
//! queries.
//!
//! - **Level-triggered (held):** `is_held(key)` returns true every frame
//!   the key is physically down.
//!
//! - **Edge-triggered (just_pressed / just_released):** true only during
//!   the frame the transition happened; cleared by `end_frame()` once per
//!   rendered frame. Steering input does not go through here: direction
//!   changes are applied at event time so the snake's single-slot queue
//!   sees rapid presses in their real order.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
    Enter,
    Space,
    Escape,
    Backspace,
    F3,
    Num1,
    Num2,
    Num3,
    Num4,
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Up);
        assert!(input.is_held(Key::Up));
        assert!(input.is_just_pressed(Key::Up));
    }

    #[test]
    fn test_key_up_clears_held_sets_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::Up);
        input.key_up(Key::Up);
        assert!(!input.is_held(Key::Up));
        assert!(input.is_just_released(Key::Up));
    }

    #[test]
    fn test_key_down_repeat_does_not_double_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Enter);
        assert!(input.is_just_pressed(Key::Enter));
        // Second key_down for the same key should not alter state since
        // the key is already in held (HashSet::insert returns false).
        input.key_down(Key::Enter);
        assert!(input.is_held(Key::Enter));
        assert!(input.is_just_pressed(Key::Enter));
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::Escape);
        assert!(!input.is_just_released(Key::Escape));
        assert!(!input.is_held(Key::Escape));
    }

    #[test]
    fn test_end_frame_clears_transient_state() {
        let mut input = InputState::new();
        input.key_down(Key::Escape);
        input.key_down(Key::Space);
        input.end_frame();
        // Transient just_pressed should be cleared.
        assert!(!input.is_just_pressed(Key::Escape));
        assert!(!input.is_just_pressed(Key::Space));
        // Held state should persist across frames.
        assert!(input.is_held(Key::Escape));
        assert!(input.is_held(Key::Space));
    }

    #[test]
    fn test_end_frame_clears_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::F3);
        input.key_up(Key::F3);
        assert!(input.is_just_released(Key::F3));
        input.end_frame();
        assert!(!input.is_just_released(Key::F3));
    }

    #[test]
    fn test_multiple_keys_independent() {
        let mut input = InputState::new();
        input.key_down(Key::W);
        input.key_down(Key::D);
        assert!(input.is_held(Key::W));
        assert!(input.is_held(Key::D));

        input.key_up(Key::W);
        assert!(!input.is_held(Key::W));
        assert!(input.is_just_released(Key::W));
        // D should remain held and unaffected.
        assert!(input.is_held(Key::D));
        assert!(!input.is_just_released(Key::D));
    }

    #[test]
    fn test_default_state_is_empty() {
        let input = InputState::new();
        assert!(!input.is_held(Key::Up));
        assert!(!input.is_just_pressed(Key::Up));
        assert!(!input.is_just_released(Key::Up));
    }
}
