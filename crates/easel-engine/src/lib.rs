//! Easel engine: rendering core of a 2D painting application.
//!
//! The canvas lives in a pair of GPU textures. Each frame it is drawn through
//! a pan/zoom/rotate/mirror view transform into a window-sized surface, which
//! is then composited onto the display with a brush cursor overlay.

pub mod canvas;
pub mod coords;
pub mod math;
pub mod paint;
pub mod render;
pub mod view;

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod window;
