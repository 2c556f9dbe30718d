//! Platform-agnostic input.
//!
//! The window runtime translates winit events into [`InputEvent`]s; nothing
//! here depends on winit.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, KeyState, Modifiers, MouseButton, WheelDelta};
