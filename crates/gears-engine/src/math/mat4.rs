use core::ops::Mul;

use crate::coords::Vec2;

/// 4x4 transform matrix, column-major.
///
/// `cols[c][r]` is the element at row `r` of column `c`, the layout a
/// `glMultMatrixf`-style call consumes. Points are column vectors, so
/// `a * b` applied to `v` transforms by `b` first, then `a`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Offset by `(x, y, z)`.
    #[inline]
    pub const fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Per-axis scale about the origin.
    #[inline]
    pub const fn from_scale(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [x, 0.0, 0.0, 0.0],
                [0.0, y, 0.0, 0.0],
                [0.0, 0.0, z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Anticlockwise rotation about the Z axis, `angle` in radians.
    #[inline]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the Z axis taking degrees, like a `glRotatef(deg, 0, 0, 1)` call.
    #[inline]
    pub fn from_rotation_z_degrees(degrees: f32) -> Self {
        Self::from_rotation_z(degrees.to_radians())
    }

    /// Shear along X: `x' = x + tan(angle) * y`. `angle` in radians.
    #[inline]
    pub fn from_skew_x(angle: f32) -> Self {
        let t = angle.tan();
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [t, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Shear along Y: `y' = y + tan(angle) * x`. `angle` in radians.
    #[inline]
    pub fn from_skew_y(angle: f32) -> Self {
        let t = angle.tan();
        Self {
            cols: [
                [1.0, t, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Transforms a point on the `z = 0` plane, assuming an affine matrix (`w` stays 1).
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let m = &self.cols;
        Vec2::new(
            m[0][0] * p.x + m[1][0] * p.y + m[3][0],
            m[0][1] * p.x + m[1][1] * p.y + m[3][1],
        )
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0; 4]; 4];
        for (c, out_col) in out.iter_mut().enumerate() {
            for (r, v) in out_col.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Mat4 { cols: out }
    }
}

impl Mul<Vec2> for Mat4 {
    type Output = Vec2;

    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.transform_point(rhs)
    }
}
