use crate::coords::Point;

/// Keyboard key, mapped from the platform's logical key where possible.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    Home,

    Shift,
    Control,
    Alt,

    BracketLeft,
    BracketRight,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Wheel movement in scroll lines; pixel deltas are converted by the runtime.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct WheelDelta {
    pub x: f32,
    pub y: f32,
}

/// Events fed to [`InputState`](super::InputState), with positions in
/// physical window pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),
    Key { key: Key, state: KeyState, repeat: bool },
    PointerMoved(Point),
    PointerButton { button: MouseButton, state: ButtonState },
    Wheel(WheelDelta),
    PointerLeft,
    Focused(bool),
}
