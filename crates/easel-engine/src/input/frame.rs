use std::collections::HashSet;

use crate::coords::Point;

use super::types::{InputEvent, Key, MouseButton, WheelDelta};

/// Transitions that happened since the previous frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,

    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,

    /// Sum of pointer movement this frame.
    pub pointer_delta: Point,

    /// Sum of wheel movement this frame.
    pub wheel: WheelDelta,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.pointer_delta = Point::ZERO;
        self.wheel = WheelDelta::default();
    }

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
