use glam::DVec2;

/// Axis-aligned rectangle stored as min/max corners (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    #[inline]
    pub const fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Smallest rectangle containing every point in `points`.
    ///
    /// Returns `None` for an empty iterator.
    pub fn bounding(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    /// Component-wise comparison within `eps`.
    pub fn abs_diff_eq(self, other: Rect, eps: f64) -> bool {
        self.min.abs_diff_eq(other.min, eps) && self.max.abs_diff_eq(other.max, eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> DVec2 { DVec2::new(x, y) }

    #[test]
    fn bounding_of_unordered_corners() {
        let r = Rect::bounding([p(10.0, 0.0), p(0.0, 5.0), p(4.0, -2.0)]).unwrap();
        assert_eq!(r.min, p(0.0, -2.0));
        assert_eq!(r.max, p(10.0, 5.0));
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 7.0);
    }

    #[test]
    fn bounding_of_nothing_is_none() {
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }
}
