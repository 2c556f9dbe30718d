//! Coordinate and size types shared by the view, canvas and render layers.
//!
//! Canonical window space:
//! - physical pixels
//! - origin top-left
//! - +X right, +Y down
//!
//! Canvas space uses the same orientation with the origin at the canvas'
//! top-left texel. The view transform maps canvas space into window space.

mod rect;
mod size;

pub use glam::DVec2 as Point;
pub use rect::Rect;
pub use size::PixelSize;
