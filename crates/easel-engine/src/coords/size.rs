use crate::render::RenderError;

/// Width/height pair in pixels.
///
/// Used for both the window (changes on resize) and the canvas (fixed for the
/// session). A `PixelSize` obtained through [`PixelSize::new`] is never zero
/// in either dimension.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    /// Validated constructor. Zero-sized surfaces cannot be rendered to.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Square size, as used by the default canvas.
    #[inline]
    pub fn square(side: u32) -> Result<Self, RenderError> {
        Self::new(side, side)
    }

    #[inline]
    pub fn width_f64(self) -> f64 {
        self.width as f64
    }

    #[inline]
    pub fn height_f64(self) -> f64 {
        self.height as f64
    }

    /// Center point in pixel coordinates.
    #[inline]
    pub fn center(self) -> glam::DVec2 {
        glam::DVec2::new(self.width_f64() * 0.5, self.height_f64() * 0.5)
    }

    #[inline]
    pub fn to_array_f32(self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(PixelSize::new(0, 10).is_err());
        assert!(PixelSize::new(10, 0).is_err());
        assert!(PixelSize::square(0).is_err());
    }

    #[test]
    fn center_is_half_extent() {
        let s = PixelSize::new(800, 600).unwrap();
        assert_eq!(s.center(), glam::DVec2::new(400.0, 300.0));
        assert_eq!(s.to_string(), "800x600");
    }
}
