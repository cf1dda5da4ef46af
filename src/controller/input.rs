/// Platform-agnostic input handling system
use std::collections::HashSet;

use serde::Deserialize;

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    FocusLost,
}

/// Direction an axis is asked to move in this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Positive,
    Negative,
}

impl Direction {
    pub fn to_sign(self) -> f32 {
        match self {
            Direction::None => 0.0,
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

/// Anything that can answer "is this key held right now"
pub trait KeyInput {
    fn is_key_held(&self, key: &str) -> bool;
}

/// Keys currently held down, lowercased
#[derive(Debug, Default)]
pub struct InputState {
    pub pressed_keys: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.to_lowercase());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(&key.to_lowercase());
            }
            InputEvent::FocusLost => {
                self.clear_keys();
            }
        }
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }
}

impl KeyInput for InputState {
    fn is_key_held(&self, key: &str) -> bool {
        self.pressed_keys.contains(&key.to_lowercase())
    }
}

/// Two opposing keys steering one axis, written `["positive", "negative"]` in config
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "[String; 2]")]
pub struct AxisKeys {
    pub positive: String,
    pub negative: String,
}

impl AxisKeys {
    pub fn new(positive: &str, negative: &str) -> Self {
        Self {
            positive: positive.to_string(),
            negative: negative.to_string(),
        }
    }

    pub fn direction(&self, input: &impl KeyInput) -> Direction {
        direction_from_keys(input, &self.positive, &self.negative)
    }
}

impl From<[String; 2]> for AxisKeys {
    fn from([positive, negative]: [String; 2]) -> Self {
        Self { positive, negative }
    }
}

/// Key mapping configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub rotation: AxisKeys,
    pub rope_length: AxisKeys,
    pub carriage: AxisKeys,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            rotation: AxisKeys::new("e", "q"),
            rope_length: AxisKeys::new("w", "s"),
            carriage: AxisKeys::new("d", "a"),
        }
    }
}

/// Neutral when both or neither key is held
pub fn direction_from_keys(input: &impl KeyInput, positive: &str, negative: &str) -> Direction {
    let positive = input.is_key_held(positive);
    let negative = input.is_key_held(negative);

    if positive == negative {
        return Direction::None;
    }
    if positive {
        Direction::Positive
    } else {
        Direction::Negative
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use web_sys::KeyboardEvent;

    pub fn keyboard_event_to_input(e: &KeyboardEvent, is_down: bool) -> InputEvent {
        let key = e.key();
        if is_down {
            InputEvent::KeyDown(key)
        } else {
            InputEvent::KeyUp(key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[&str]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.process_event(&InputEvent::KeyDown(key.to_string()));
        }
        input
    }

    #[test]
    fn test_direction_from_keys() {
        assert_eq!(direction_from_keys(&held(&[]), "e", "q"), Direction::None);
        assert_eq!(direction_from_keys(&held(&["e"]), "e", "q"), Direction::Positive);
        assert_eq!(direction_from_keys(&held(&["q"]), "e", "q"), Direction::Negative);
        assert_eq!(direction_from_keys(&held(&["e", "q"]), "e", "q"), Direction::None);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let input = held(&["W"]);
        assert!(input.is_key_held("w"));
        assert_eq!(KeyBindings::default().rope_length.direction(&input), Direction::Positive);
    }

    #[test]
    fn test_key_up_and_focus_loss_release_keys() {
        let mut input = held(&["a", "d"]);
        input.process_event(&InputEvent::KeyUp("A".to_string()));
        assert!(!input.is_key_held("a"));
        assert!(input.is_key_held("d"));

        input.process_event(&InputEvent::FocusLost);
        assert!(input.pressed_keys.is_empty());
    }

    #[test]
    fn test_sign_mapping() {
        assert_eq!(Direction::None.to_sign(), 0.0);
        assert_eq!(Direction::Positive.to_sign(), 1.0);
        assert_eq!(Direction::Negative.to_sign(), -1.0);
        assert_eq!(Direction::default(), Direction::None);
    }
}
