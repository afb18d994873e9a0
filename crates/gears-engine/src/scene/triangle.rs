use crate::coords::Vec2;
use crate::paint::Color;

use super::error::ensure_finite;
use super::{Backend, Node, SceneError};

/// Filled triangle in its own local coordinates.
///
/// Vertices are emitted in the order given. Winding is not normalized and
/// nothing culls back faces, so clockwise and anticlockwise input both draw.
/// Degenerate (collinear) triangles are accepted; they simply cover no pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Vec2; 3],
    color: Color,
}

impl Triangle {
    /// Creates a white triangle. Fails if any coordinate is NaN or infinite.
    pub fn new(
        a: impl Into<Vec2>,
        b: impl Into<Vec2>,
        c: impl Into<Vec2>,
    ) -> Result<Self, SceneError> {
        let vertices = [a.into(), b.into(), c.into()];
        for v in &vertices {
            ensure_finite("Triangle vertex x", v.x)?;
            ensure_finite("Triangle vertex y", v.y)?;
        }
        Ok(Self { vertices, color: Color::WHITE })
    }

    /// Triangle closing on the local origin: `a, b, (0, 0)`.
    pub fn from_origin(a: impl Into<Vec2>, b: impl Into<Vec2>) -> Result<Self, SceneError> {
        Self::new(a, b, Vec2::ZERO)
    }

    /// Replaces the fill color.
    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn vertices(&self) -> [Vec2; 3] {
        self.vertices
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Twice the signed area. Positive for anticlockwise input in a +Y up frame.
    pub fn signed_area2(&self) -> f32 {
        let [a, b, c] = self.vertices;
        let ab = b - a;
        let ac = c - a;
        ab.x * ac.y - ab.y * ac.x
    }
}

impl Node for Triangle {
    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError> {
        backend.draw_triangle(self.vertices, self.color)
    }
}
