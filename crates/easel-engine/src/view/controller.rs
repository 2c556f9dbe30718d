use crate::coords::{PixelSize, Rect};

use super::ViewState;

/// Owns the live [`ViewState`] and the sizes used to recenter it.
///
/// Every transition replaces the held state with the one returned by the
/// corresponding `ViewState` method.
#[derive(Debug, Clone)]
pub struct ViewController {
    state: ViewState,
    window: PixelSize,
    canvas: PixelSize,
}

impl ViewController {
    /// Creates a controller already in the reset state.
    pub fn new(window: PixelSize, canvas: PixelSize) -> Self {
        Self {
            state: ViewState::centered(window, canvas),
            window,
            canvas,
        }
    }

    #[inline]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[inline]
    pub fn scale_amount(&self) -> f64 {
        self.state.scale_amount()
    }

    #[inline]
    pub fn flipped(&self) -> bool {
        self.state.flipped()
    }

    #[inline]
    pub fn window_size(&self) -> PixelSize {
        self.window
    }

    #[inline]
    pub fn canvas_size(&self) -> PixelSize {
        self.canvas
    }

    /// Window-space rectangle currently covered by the canvas.
    pub fn canvas_bounds(&self) -> Rect {
        self.state.canvas_bounds(self.canvas)
    }

    /// Discards pan/zoom/rotation/mirror and recenters the canvas.
    pub fn reset(&mut self) {
        self.state = ViewState::centered(self.window, self.canvas);
    }

    /// Records a new window size and resets the view to it.
    pub fn set_window_size(&mut self, window: PixelSize) {
        self.window = window;
        self.reset();
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.state = self.state.pan(dx, dy);
    }

    pub fn rotate(&mut self, x: f64, y: f64, angle: f64) {
        self.state = self.state.rotate(x, y, angle);
    }

    pub fn scale(&mut self, x: f64, y: f64, factor: f64) {
        self.state = self.state.scale(x, y, factor);
        log::trace!("view scale -> {:.4}", self.state.scale_amount());
    }

    /// Mirrors about the vertical line `x`; the pivot's Y is irrelevant.
    pub fn flip(&mut self, x: f64) {
        self.state = self.state.flip(x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: u32, h: u32) -> PixelSize { PixelSize::new(w, h).unwrap() }

    fn scrambled(c: &mut ViewController) {
        c.pan(37.0, -91.0);
        c.rotate(12.0, 400.0, 2.2);
        c.scale(500.0, 20.0, 0.35);
        c.flip(77.0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut c = ViewController::new(size(800, 600), size(512, 512));
        scrambled(&mut c);
        c.reset();
        let once = *c.state();
        c.reset();
        assert_eq!(*c.state(), once);
    }

    #[test]
    fn reset_clears_scale_and_flip() {
        let mut c = ViewController::new(size(800, 600), size(512, 512));
        scrambled(&mut c);
        assert!(c.flipped());
        c.reset();
        assert_eq!(c.scale_amount(), 1.0);
        assert!(!c.flipped());
    }

    #[test]
    fn window_resize_matches_fresh_reset() {
        let mut c = ViewController::new(size(800, 600), size(512, 512));
        scrambled(&mut c);
        c.set_window_size(size(1024, 768));

        let fresh = ViewController::new(size(1024, 768), size(512, 512));
        assert_eq!(c.state(), fresh.state());
        assert_eq!(c.window_size(), size(1024, 768));
    }

    #[test]
    fn flip_sequence_alternates_from_false() {
        let mut c = ViewController::new(size(640, 480), size(256, 256));
        assert!(!c.flipped());
        c.flip(320.0);
        assert!(c.flipped());
        c.flip(10.0);
        assert!(!c.flipped());
        c.flip(600.0);
        assert!(c.flipped());
    }
}
