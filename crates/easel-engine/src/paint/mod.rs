//! Color model shared between the renderer and the brush state.

pub mod color;

pub use color::Color;
