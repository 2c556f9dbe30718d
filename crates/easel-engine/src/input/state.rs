use std::collections::HashSet;

use crate::coords::Point;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Key, KeyState, Modifiers, MouseButton};

/// Held keys and buttons plus the last known pointer position.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Physical pixels, top-left origin; `None` while outside the window.
    pub pointer: Option<Point>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev` and records the resulting transitions into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered to an unfocused window.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(p) => {
                if let Some(prev) = self.pointer {
                    frame.pointer_delta += *p - prev;
                }
                self.pointer = Some(*p);
            }

            InputEvent::PointerLeft => self.pointer = None,

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    if self.buttons_down.insert(*button) {
                        frame.buttons_pressed.insert(*button);
                    }
                }
                ButtonState::Released => {
                    if self.buttons_down.remove(button) {
                        frame.buttons_released.insert(*button);
                    }
                }
            },

            InputEvent::Wheel(d) => {
                frame.wheel.x += d.x;
                frame.wheel.y += d.y;
            }
        }

        frame.events.push(ev);
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Pointer position, or the origin when the pointer is outside the window.
    #[inline]
    pub fn pointer_or_origin(&self) -> Point {
        self.pointer.unwrap_or(Point::ZERO)
    }
}
