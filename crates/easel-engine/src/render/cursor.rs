use glam::DVec2;

use crate::paint::Color;

/// Active brush parameters, as read by the cursor overlay.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BrushState {
    pub color: Color,
    /// `[0, 1]`.
    pub opacity: f32,
    /// Diameter in canvas pixels.
    pub size: f32,
    /// `0` is a hard edge, `1` fades from the center.
    pub softness: f32,
    /// Fill the cursor with the brush color.
    pub show_color: bool,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            opacity: 1.0,
            size: 16.0,
            softness: 0.0,
            show_color: false,
        }
    }
}

/// Per-frame input snapshot handed to [`Renderer::render_frame`](super::Renderer::render_frame).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CursorInput {
    /// Pointer position in window pixels.
    pub pointer: DVec2,
    pub brush: BrushState,
}

/// Cursor diameter in window pixels, never below one pixel.
#[inline]
pub fn cursor_diameter(brush_size: f32, scale_amount: f64) -> f32 {
    (brush_size as f64 * scale_amount).max(1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diameter_floors_at_one_pixel() {
        assert_eq!(cursor_diameter(0.5, 0.1), 1.0);
        assert_eq!(cursor_diameter(0.0, 4.0), 1.0);
    }

    #[test]
    fn diameter_scales_with_zoom() {
        assert_eq!(cursor_diameter(10.0, 2.0), 20.0);
        assert_eq!(cursor_diameter(3.0, 0.5), 1.5);
    }
}
