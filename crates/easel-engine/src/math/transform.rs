use glam::{DMat4, DVec2, DVec3};

/// 2D affine transform embedded in a 4×4 homogeneous matrix.
///
/// Conventions:
/// - column vectors, `p' = M * p`
/// - every composition helper applies its operation *after* the existing
///   transform, so pivots are expressed in the output space (window pixels
///   for the view transform)
///
/// Only translation, rotation about Z, non-degenerate scale and axis mirrors
/// are ever composed, so the matrix stays invertible.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2D(DMat4);

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    #[inline]
    pub const fn identity() -> Self {
        Self(DMat4::IDENTITY)
    }

    #[inline]
    pub const fn matrix(&self) -> &DMat4 {
        &self.0
    }

    /// Projection from pixel space to normalized device coordinates.
    ///
    /// `(0, 0)` (top-left) maps to `(-1, 1)`, `(width, height)` maps to
    /// `(1, -1)`. Depth `z = 0` lands at `0.5`, inside wgpu's `[0, 1]` range.
    pub fn orthographic(width: f64, height: f64) -> Self {
        Self(DMat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0))
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.post(DMat4::from_translation(DVec3::new(dx, dy, dz)));
    }

    /// Rotates by `angle` radians about `(x, y)`.
    pub fn rotate_about(&mut self, x: f64, y: f64, angle: f64) {
        self.post(about(x, y, DMat4::from_rotation_z(angle)));
    }

    /// Uniformly scales by `factor` about `(x, y)`.
    pub fn scale_about(&mut self, x: f64, y: f64, factor: f64) {
        self.post(about(x, y, DMat4::from_scale(DVec3::new(factor, factor, 1.0))));
    }

    /// Mirrors the X axis about the vertical line through `x`.
    pub fn flip_horizontal_about(&mut self, x: f64) {
        self.post(about(x, 0.0, DMat4::from_scale(DVec3::new(-1.0, 1.0, 1.0))));
    }

    /// Maps a 2D point (z = 0).
    #[inline]
    pub fn transform_point(&self, p: DVec2) -> DVec2 {
        self.0.transform_point3(p.extend(0.0)).truncate()
    }

    #[inline]
    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    /// Length of the image of the X unit vector.
    ///
    /// For transforms composed from rotations, mirrors and uniform scales this
    /// is the cumulative scale factor.
    #[inline]
    pub fn x_axis_norm(&self) -> f64 {
        self.0.x_axis.truncate().length()
    }

    /// Column-major `f32` copy, laid out as WGSL `mat4x4<f32>` expects.
    #[inline]
    pub fn to_cols_array_f32(&self) -> [[f32; 4]; 4] {
        self.0.as_mat4().to_cols_array_2d()
    }

    pub fn abs_diff_eq(&self, other: &Transform2D, eps: f64) -> bool {
        self.0.abs_diff_eq(other.0, eps)
    }

    #[inline]
    fn post(&mut self, op: DMat4) {
        self.0 = op * self.0;
    }
}

/// Returns the transform that applies `a` first, then `b`.
#[inline]
pub fn multiply(a: &Transform2D, b: &Transform2D) -> Transform2D {
    Transform2D(b.0 * a.0)
}

fn about(x: f64, y: f64, op: DMat4) -> DMat4 {
    let pivot = DVec3::new(x, y, 0.0);
    DMat4::from_translation(pivot) * op * DMat4::from_translation(-pivot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn p(x: f64, y: f64) -> DVec2 { DVec2::new(x, y) }

    fn assert_point(actual: DVec2, expected: DVec2) {
        assert!(
            actual.abs_diff_eq(expected, EPS),
            "expected {expected:?}, got {actual:?}"
        );
    }

    // ── orthographic ──────────────────────────────────────────────────────

    #[test]
    fn orthographic_maps_window_corners_to_ndc() {
        let o = Transform2D::orthographic(800.0, 600.0);
        assert_point(o.transform_point(p(0.0, 0.0)), p(-1.0, 1.0));
        assert_point(o.transform_point(p(800.0, 600.0)), p(1.0, -1.0));
        assert_point(o.transform_point(p(400.0, 300.0)), p(0.0, 0.0));
    }

    #[test]
    fn orthographic_depth_is_inside_clip_range() {
        let o = Transform2D::orthographic(640.0, 480.0);
        let z = o.matrix().transform_point3(DVec3::ZERO).z;
        assert!((0.0..=1.0).contains(&z));
    }

    // ── composition helpers ───────────────────────────────────────────────

    #[test]
    fn translate_accumulates() {
        let mut t = Transform2D::identity();
        t.translate(10.0, 5.0, 0.0);
        t.translate(-3.0, 2.0, 0.0);
        assert_point(t.transform_point(p(0.0, 0.0)), p(7.0, 7.0));
    }

    #[test]
    fn rotate_about_keeps_pivot_fixed() {
        for angle in [0.1, FRAC_PI_2, PI, -2.5, 17.0] {
            let mut t = Transform2D::identity();
            t.translate(30.0, -12.0, 0.0);
            let pivot = p(250.0, 125.0);
            let before = t.inverse().transform_point(pivot);
            t.rotate_about(pivot.x, pivot.y, angle);
            assert_point(t.transform_point(before), pivot);
        }
    }

    #[test]
    fn rotate_quarter_turn_about_origin() {
        let mut t = Transform2D::identity();
        t.rotate_about(0.0, 0.0, FRAC_PI_2);
        // +Y down: a positive angle turns +X towards +Y.
        assert_point(t.transform_point(p(1.0, 0.0)), p(0.0, 1.0));
    }

    #[test]
    fn scale_about_moves_points_away_from_pivot() {
        let mut t = Transform2D::identity();
        t.scale_about(100.0, 100.0, 2.0);
        assert_point(t.transform_point(p(100.0, 100.0)), p(100.0, 100.0));
        assert_point(t.transform_point(p(110.0, 90.0)), p(120.0, 80.0));
        assert!((t.x_axis_norm() - 2.0).abs() < EPS);
    }

    #[test]
    fn flip_mirrors_about_vertical_line() {
        let mut t = Transform2D::identity();
        t.flip_horizontal_about(50.0);
        assert_point(t.transform_point(p(60.0, 7.0)), p(40.0, 7.0));
        assert_point(t.transform_point(p(50.0, -3.0)), p(50.0, -3.0));
        assert!((t.x_axis_norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn rotation_and_flip_preserve_scale_norm() {
        let mut t = Transform2D::identity();
        t.scale_about(0.0, 0.0, 3.0);
        t.rotate_about(10.0, 20.0, 0.7);
        t.flip_horizontal_about(5.0);
        assert!((t.x_axis_norm() - 3.0).abs() < EPS);
    }

    // ── multiply ──────────────────────────────────────────────────────────

    #[test]
    fn multiply_applies_left_operand_first() {
        let mut a = Transform2D::identity();
        a.translate(10.0, 0.0, 0.0);
        let mut b = Transform2D::identity();
        b.scale_about(0.0, 0.0, 2.0);

        let ab = multiply(&a, &b);
        assert_point(ab.transform_point(p(1.0, 1.0)), p(22.0, 2.0));

        let ba = multiply(&b, &a);
        assert_point(ba.transform_point(p(1.0, 1.0)), p(12.0, 2.0));
    }

    #[test]
    fn view_then_projection_lands_in_ndc() {
        let mut view = Transform2D::identity();
        view.translate(144.0, 44.0, 0.0);
        let screen = multiply(&view, &Transform2D::orthographic(800.0, 600.0));
        assert_point(screen.transform_point(p(256.0, 256.0)), p(0.0, 0.0));
    }

    #[test]
    fn f32_columns_match_matrix() {
        let mut t = Transform2D::identity();
        t.translate(3.0, 4.0, 0.0);
        let cols = t.to_cols_array_f32();
        assert_eq!(cols[3], [3.0, 4.0, 0.0, 1.0]);
        assert_eq!(cols[0], [1.0, 0.0, 0.0, 0.0]);
    }
}
