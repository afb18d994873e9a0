//! Transform decorators.
//!
//! Each decorator owns exactly one wrapped node and a matrix computed once in
//! its constructor. Rendering brackets the wrapped node in a
//! [`TransformScope`], so for `outer(inner(node))` the vertices of `node`
//! reach the backend transformed by `M_outer * M_inner`.

use core::f64::consts::{FRAC_PI_2, PI};
use core::fmt;

use crate::math::Mat4;

use super::error::ensure_finite;
use super::{Backend, Node, SceneError, TransformScope};

/// Wrapped node + its fixed matrix. Shared body of every decorator.
struct Wrapped {
    node: Box<dyn Node>,
    matrix: Mat4,
}

impl Wrapped {
    fn new(node: impl Node + 'static, matrix: Mat4) -> Self {
        Self { node: Box::new(node), matrix }
    }

    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError> {
        let mut scope = TransformScope::enter(backend)?;
        scope.backend().apply_transform(&self.matrix);
        self.node.render(scope.backend())
    }
}

// ── Translation ───────────────────────────────────────────────────────────

/// Moves the wrapped node by `(x, y)`.
pub struct Translation {
    x: f32,
    y: f32,
    inner: Wrapped,
}

impl Translation {
    pub fn new(node: impl Node + 'static, x: f32, y: f32) -> Result<Self, SceneError> {
        let x = ensure_finite("Translation x", x)?;
        let y = ensure_finite("Translation y", y)?;
        Ok(Self { x, y, inner: Wrapped::new(node, Mat4::from_translation(x, y, 0.0)) })
    }

    #[inline]
    pub fn offset(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.inner.matrix
    }
}

impl Node for Translation {
    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError> {
        self.inner.render(backend)
    }
}

impl fmt::Debug for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translation").field("x", &self.x).field("y", &self.y).finish_non_exhaustive()
    }
}

// ── Rotation ──────────────────────────────────────────────────────────────

/// Rotates the wrapped node anticlockwise about the origin.
///
/// `theta` is in radians. The backend-facing rotate angle is degrees, derived
/// once as `theta * 180 / π` and kept next to `theta`.
pub struct Rotation {
    theta: f32,
    degrees: f32,
    inner: Wrapped,
}

impl Rotation {
    pub fn new(node: impl Node + 'static, theta: f32) -> Result<Self, SceneError> {
        let theta = ensure_finite("Rotation theta", theta)?;
        let degrees = theta * 180.0 / core::f32::consts::PI;
        Ok(Self {
            theta,
            degrees,
            inner: Wrapped::new(node, Mat4::from_rotation_z_degrees(degrees)),
        })
    }

    /// Angle in radians, as constructed.
    #[inline]
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Angle handed to a degree-based rotate call.
    #[inline]
    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.inner.matrix
    }
}

impl Node for Rotation {
    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError> {
        self.inner.render(backend)
    }
}

impl fmt::Debug for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rotation")
            .field("theta", &self.theta)
            .field("degrees", &self.degrees)
            .finish_non_exhaustive()
    }
}

// ── Scaling ───────────────────────────────────────────────────────────────

/// Uniform scale in X and Y about the origin. Z scale stays 1.
///
/// A factor of 0 collapses the wrapped geometry onto the origin; negative
/// factors mirror through it.
pub struct Scaling {
    factor: f32,
    inner: Wrapped,
}

impl Scaling {
    pub fn new(node: impl Node + 'static, factor: f32) -> Result<Self, SceneError> {
        let factor = ensure_finite("Scaling factor", factor)?;
        Ok(Self { factor, inner: Wrapped::new(node, Mat4::from_scale(factor, factor, 1.0)) })
    }

    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.inner.matrix
    }
}

impl Node for Scaling {
    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError> {
        self.inner.render(backend)
    }
}

impl fmt::Debug for Scaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scaling").field("factor", &self.factor).finish_non_exhaustive()
    }
}

// ── Skew ──────────────────────────────────────────────────────────────────

/// Skew angles are radians, like [`Rotation`]. The tangent must be finite,
/// so odd multiples of π/2 are rejected.
fn ensure_skew(what: &'static str, angle: f32) -> Result<f32, SceneError> {
    let angle = ensure_finite(what, angle)?;
    // Reduce in f64 so large angles keep their distance to the asymptote.
    // Within one f32 ulp of an odd multiple of π/2 counts as vertical.
    let a = f64::from(angle);
    let off_axis = (a.rem_euclid(PI) - FRAC_PI_2).abs();
    let tolerance = (a.abs() * f64::from(f32::EPSILON)).max(1e-6);
    if !angle.tan().is_finite() || off_axis < tolerance {
        return Err(SceneError::InvalidParameter { what, value: angle });
    }
    Ok(angle)
}

/// Shears the wrapped node along X: `x' = x + tan(angle) * y`.
pub struct SkewX {
    angle: f32,
    inner: Wrapped,
}

impl SkewX {
    /// `angle` in radians.
    pub fn new(node: impl Node + 'static, angle: f32) -> Result<Self, SceneError> {
        let angle = ensure_skew("SkewX angle", angle)?;
        Ok(Self { angle, inner: Wrapped::new(node, Mat4::from_skew_x(angle)) })
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.inner.matrix
    }
}

impl Node for SkewX {
    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError> {
        self.inner.render(backend)
    }
}

impl fmt::Debug for SkewX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkewX").field("angle", &self.angle).finish_non_exhaustive()
    }
}

/// Shears the wrapped node along Y: `y' = y + tan(angle) * x`.
pub struct SkewY {
    angle: f32,
    inner: Wrapped,
}

impl SkewY {
    /// `angle` in radians.
    pub fn new(node: impl Node + 'static, angle: f32) -> Result<Self, SceneError> {
        let angle = ensure_skew("SkewY angle", angle)?;
        Ok(Self { angle, inner: Wrapped::new(node, Mat4::from_skew_y(angle)) })
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.inner.matrix
    }
}

impl Node for SkewY {
    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError> {
        self.inner.render(backend)
    }
}

impl fmt::Debug for SkewY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkewY").field("angle", &self.angle).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
    use std::rc::Rc;

    use crate::coords::Vec2;
    use crate::scene::{Command, RecordingBackend, Triangle};

    const EPS: f32 = 1e-3;

    fn tri() -> Triangle {
        Triangle::new((200.0, 200.0), (100.0, 400.0), (0.0, 0.0)).unwrap()
    }

    fn world(node: &dyn Node) -> Vec<[Vec2; 3]> {
        let mut rec = RecordingBackend::new();
        node.render(&mut rec).unwrap();
        rec.triangles().collect()
    }

    fn assert_close(a: &[[Vec2; 3]], b: &[[Vec2; 3]]) {
        assert_eq!(a.len(), b.len());
        for (ta, tb) in a.iter().zip(b) {
            for (pa, pb) in ta.iter().zip(tb) {
                assert!(
                    (pa.x - pb.x).abs() < EPS && (pa.y - pb.y).abs() < EPS,
                    "{pa:?} != {pb:?}"
                );
            }
        }
    }

    // ── stack discipline ──────────────────────────────────────────────────

    #[test]
    fn decorator_brackets_wrapped_node() {
        let node = Translation::new(tri(), 10.0, 20.0).unwrap();
        let mut rec = RecordingBackend::new();
        node.render(&mut rec).unwrap();

        let cmds = rec.commands();
        assert_eq!(cmds.len(), 4);
        assert_eq!(cmds[0], Command::Push);
        assert_eq!(cmds[1], Command::Apply(Mat4::from_translation(10.0, 20.0, 0.0)));
        assert!(matches!(cmds[2], Command::Triangle { .. }));
        assert_eq!(cmds[3], Command::Pop);
        assert_eq!(rec.depth(), 0);
    }

    #[test]
    fn deep_nesting_leaves_depth_unchanged() {
        let mut node: Box<dyn Node> = Box::new(tri());
        for i in 0..100 {
            node = match i % 5 {
                0 => Box::new(Translation::new(node, 1.0, 2.0).unwrap()),
                1 => Box::new(Rotation::new(node, 0.1).unwrap()),
                2 => Box::new(Scaling::new(node, 1.1).unwrap()),
                3 => Box::new(SkewX::new(node, 0.05).unwrap()),
                _ => Box::new(SkewY::new(node, -0.05).unwrap()),
            };
        }

        let mut rec = RecordingBackend::new();
        rec.push_transform().unwrap();
        node.render(&mut rec).unwrap();
        assert_eq!(rec.depth(), 1);
        assert_eq!(rec.max_depth_seen(), 101);
    }

    #[test]
    fn failing_child_still_pops() {
        let node = Translation::new(
            Rotation::new(Scaling::new(tri(), 2.0).unwrap(), 1.0).unwrap(),
            5.0,
            5.0,
        )
        .unwrap();
        let mut rec = RecordingBackend::new().fail_draws_after(0);

        let err = node.render(&mut rec).unwrap_err();
        assert!(matches!(err, SceneError::BackendFailure(_)));
        assert_eq!(rec.depth(), 0);
        let pops = rec.commands().iter().filter(|c| **c == Command::Pop).count();
        assert_eq!(pops, 3);
    }

    #[test]
    fn overflow_reports_failure_and_unwinds() {
        let mut node: Box<dyn Node> = Box::new(tri());
        for _ in 0..5 {
            node = Box::new(Translation::new(node, 1.0, 0.0).unwrap());
        }
        let mut rec = RecordingBackend::with_max_depth(3);

        assert!(matches!(node.render(&mut rec), Err(SceneError::BackendFailure(_))));
        assert_eq!(rec.depth(), 0);
        assert_eq!(rec.triangles().count(), 0);
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn sequential_translations_add() {
        let twice = Translation::new(Translation::new(tri(), 250.0, 0.0).unwrap(), 500.0, 0.0)
            .unwrap();
        let once = Translation::new(tri(), 750.0, 0.0).unwrap();
        assert_eq!(once.offset(), (750.0, 0.0));
        assert_eq!(world(&twice), world(&once));
        assert_eq!(world(&twice)[0][2], Vec2::new(750.0, 0.0));
    }

    #[test]
    fn outer_matrix_multiplies_last() {
        // Translate(outer) of Scale(inner): scale first, then move.
        let node = Translation::new(Scaling::new(tri(), 2.0).unwrap(), 10.0, 0.0).unwrap();
        assert_eq!(world(&node)[0][0], Vec2::new(410.0, 400.0));

        // Scale(outer) of Translate(inner): move first, then scale.
        let node = Scaling::new(Translation::new(tri(), 10.0, 0.0).unwrap(), 2.0).unwrap();
        assert_eq!(world(&node)[0][0], Vec2::new(420.0, 400.0));
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn rotation_converts_radians_to_degrees() {
        let r = Rotation::new(tri(), FRAC_PI_2).unwrap();
        assert!((r.degrees() - 90.0).abs() < EPS);
        assert_eq!(r.theta(), FRAC_PI_2);

        let r = Rotation::new(tri(), PI).unwrap();
        assert!((r.degrees() - 180.0).abs() < EPS);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let r = Rotation::new(tri(), 0.0).unwrap();
        assert_eq!(*r.matrix(), Mat4::IDENTITY);
        assert_eq!(world(&r), world(&tri()));
    }

    #[test]
    fn quarter_rotation_turns_x_into_y() {
        let r = Rotation::new(Triangle::from_origin((10.0, 0.0), (0.0, 10.0)).unwrap(), FRAC_PI_2)
            .unwrap();
        assert_close(
            &world(&r),
            &[[Vec2::new(0.0, 10.0), Vec2::new(-10.0, 0.0), Vec2::ZERO]],
        );
    }

    // ── scaling ───────────────────────────────────────────────────────────

    #[test]
    fn unit_scale_is_identity() {
        let s = Scaling::new(tri(), 1.0).unwrap();
        assert_eq!(*s.matrix(), Mat4::IDENTITY);
        assert_eq!(world(&s), world(&tri()));
    }

    #[test]
    fn zero_scale_collapses_to_origin() {
        let s = Scaling::new(tri(), 0.0).unwrap();
        assert_eq!(world(&s), vec![[Vec2::ZERO; 3]]);
    }

    #[test]
    fn scale_keeps_z() {
        let s = Scaling::new(tri(), 3.0).unwrap();
        assert_eq!(s.matrix().cols[2][2], 1.0);
    }

    #[test]
    fn non_finite_parameters_are_rejected() {
        assert!(matches!(
            Scaling::new(tri(), f32::INFINITY),
            Err(SceneError::InvalidParameter { what: "Scaling factor", .. })
        ));
        assert!(Translation::new(tri(), f32::NAN, 0.0).is_err());
        assert!(Rotation::new(tri(), f32::NEG_INFINITY).is_err());
        assert!(SkewY::new(tri(), f32::NAN).is_err());
    }

    // ── skew ──────────────────────────────────────────────────────────────

    #[test]
    fn skew_x_moves_points_by_their_y() {
        let s = SkewX::new(Triangle::from_origin((0.0, 10.0), (10.0, 0.0)).unwrap(), FRAC_PI_4)
            .unwrap();
        assert_close(
            &world(&s),
            &[[Vec2::new(10.0, 10.0), Vec2::new(10.0, 0.0), Vec2::ZERO]],
        );
    }

    #[test]
    fn skew_y_moves_points_by_their_x() {
        let s = SkewY::new(Triangle::from_origin((0.0, 10.0), (10.0, 0.0)).unwrap(), FRAC_PI_4)
            .unwrap();
        assert_close(
            &world(&s),
            &[[Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0), Vec2::ZERO]],
        );
    }

    #[test]
    fn vertical_skew_is_rejected() {
        assert!(SkewX::new(tri(), FRAC_PI_2).is_err());
        assert!(SkewY::new(tri(), -FRAC_PI_2).is_err());
        assert!(SkewX::new(tri(), 3.0 * FRAC_PI_2).is_err());
        assert!(SkewX::new(tri(), -10.0f32.to_radians()).is_ok());
    }

    #[test]
    fn vertical_skew_is_rejected_at_large_angles() {
        assert!(SkewX::new(tri(), 101.0 * FRAC_PI_2).is_err());
        assert!(SkewY::new(tri(), -1001.0 * FRAC_PI_2).is_err());
        assert!(SkewX::new(tri(), 5.0 * FRAC_PI_2).is_err());
        assert!(SkewX::new(tri(), 100.0 * PI + 0.25).is_ok());
    }

    // ── immutability / reuse ──────────────────────────────────────────────

    #[test]
    fn rendering_twice_issues_identical_commands() {
        let node = SkewX::new(
            Rotation::new(Translation::new(tri(), 3.0, 4.0).unwrap(), 0.4).unwrap(),
            0.2,
        )
        .unwrap();
        let matrix_before = *node.matrix();

        let mut first = RecordingBackend::new();
        node.render(&mut first).unwrap();
        let mut second = RecordingBackend::new();
        node.render(&mut second).unwrap();

        assert_eq!(first.commands(), second.commands());
        assert_eq!(*node.matrix(), matrix_before);
    }

    #[test]
    fn shared_subtree_renders_under_two_parents() {
        let shared: Rc<dyn Node> = Rc::new(Translation::new(tri(), 250.0, 0.0).unwrap());
        let a = Translation::new(Rc::clone(&shared), 500.0, 0.0).unwrap();
        let b = Scaling::new(Rc::clone(&shared), 0.5).unwrap();

        let mut rec = RecordingBackend::new();
        a.render(&mut rec).unwrap();
        b.render(&mut rec).unwrap();
        shared.render(&mut rec).unwrap();

        let tris: Vec<_> = rec.triangles().collect();
        assert_eq!(tris[0][2], Vec2::new(750.0, 0.0));
        assert_eq!(tris[1][2], Vec2::new(125.0, 0.0));
        assert_eq!(tris[2][2], Vec2::new(250.0, 0.0));
        assert_eq!(rec.depth(), 0);
    }
}
