use glam::DVec2;

use crate::coords::{PixelSize, Rect};
use crate::math::Transform2D;

/// Accumulated pan/zoom/rotate/mirror applied to the canvas before display.
///
/// The transform maps canvas pixels to window pixels. Transitions are not
/// clamped: the canvas may be zoomed arbitrarily far or panned fully offscreen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    transform: Transform2D,
    flipped: bool,
}

impl ViewState {
    /// Baseline state: canvas centered in the window, unscaled, unmirrored.
    ///
    /// The offset uses half the canvas width on both axes.
    pub fn centered(window: PixelSize, canvas: PixelSize) -> Self {
        let half = canvas.width_f64() * 0.5;
        let center = window.center();
        let mut transform = Transform2D::identity();
        transform.translate(center.x - half, center.y - half, 0.0);
        Self { transform, flipped: false }
    }

    #[inline]
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Whether an odd number of flips has been applied since the last reset.
    #[inline]
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Cumulative zoom since the last reset, derived from the transform.
    ///
    /// Converts canvas-space brush sizes into window pixels.
    #[inline]
    pub fn scale_amount(&self) -> f64 {
        self.transform.x_axis_norm()
    }

    #[must_use]
    pub fn pan(mut self, dx: f64, dy: f64) -> Self {
        self.transform.translate(dx, dy, 0.0);
        self
    }

    #[must_use]
    pub fn rotate(mut self, x: f64, y: f64, angle: f64) -> Self {
        self.transform.rotate_about(x, y, angle);
        self
    }

    #[must_use]
    pub fn scale(mut self, x: f64, y: f64, factor: f64) -> Self {
        self.transform.scale_about(x, y, factor);
        self
    }

    #[must_use]
    pub fn flip(mut self, x: f64) -> Self {
        self.transform.flip_horizontal_about(x);
        self.flipped = !self.flipped;
        self
    }

    /// Window-space bounding box of a canvas of `canvas` size.
    pub fn canvas_bounds(&self, canvas: PixelSize) -> Rect {
        let (w, h) = (canvas.width_f64(), canvas.height_f64());
        let corners = [
            DVec2::new(0.0, 0.0),
            DVec2::new(w, 0.0),
            DVec2::new(0.0, h),
            DVec2::new(w, h),
        ];
        // Four corners always yield a rect.
        Rect::bounding(corners.map(|c| self.transform.transform_point(c))).unwrap_or_default()
    }

    /// Maps a window pixel back to canvas space.
    pub fn window_to_canvas(&self, p: DVec2) -> DVec2 {
        self.transform.inverse().transform_point(p)
    }
}
