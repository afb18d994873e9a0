use crate::coords::Vec2;
use crate::math::Mat4;
use crate::paint::Color;

use super::{Backend, SceneError, TransformStack};

/// A world-space vertex ready for upload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BatchVertex {
    pub position: Vec2,
    pub color: Color,
}

/// Frame backend: resolves each emitted triangle through the current
/// transform and collects the result for the triangle renderer.
///
/// Performance characteristics:
/// - `draw_triangle` is O(1) amortized
/// - `clear` keeps allocated capacity, so steady-state frames do not allocate
#[derive(Debug, Clone, Default)]
pub struct GeometryBatch {
    stack: TransformStack,
    vertices: Vec<BatchVertex>,
}

impl GeometryBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { stack: TransformStack::with_max_depth(max_depth), vertices: Vec::new() }
    }

    /// Starts a new frame: no geometry, identity transform.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.stack.reset();
    }

    /// Vertices in draw order, three per triangle.
    #[inline]
    pub fn vertices(&self) -> &[BatchVertex] {
        &self.vertices
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when every pushed transform has been popped.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.stack.depth() == 0
    }
}

impl Backend for GeometryBatch {
    #[inline]
    fn push_transform(&mut self) -> Result<(), SceneError> {
        self.stack.push()
    }

    #[inline]
    fn apply_transform(&mut self, matrix: &Mat4) {
        self.stack.apply(matrix);
    }

    #[inline]
    fn pop_transform(&mut self) {
        self.stack.pop();
    }

    fn draw_triangle(&mut self, vertices: [Vec2; 3], color: Color) -> Result<(), SceneError> {
        let m = self.stack.current();
        self.vertices.extend(vertices.map(|v| BatchVertex { position: m * v, color }));
        Ok(())
    }

    #[inline]
    fn depth(&self) -> usize {
        self.stack.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, Translation, Triangle};

    #[test]
    fn collects_transformed_vertices() {
        let node = Translation::new(
            Triangle::from_origin((200.0, 200.0), (100.0, 400.0)).unwrap(),
            250.0,
            0.0,
        )
        .unwrap();
        let mut batch = GeometryBatch::new();
        node.render(&mut batch).unwrap();

        assert_eq!(batch.triangle_count(), 1);
        let pos: Vec<Vec2> = batch.vertices().iter().map(|v| v.position).collect();
        assert_eq!(
            pos,
            vec![Vec2::new(450.0, 200.0), Vec2::new(350.0, 400.0), Vec2::new(250.0, 0.0)]
        );
        assert!(batch.is_balanced());
    }

    #[test]
    fn default_batch_renders_deeply_nested_trees() {
        let mut node: Box<dyn Node> =
            Box::new(Triangle::from_origin((1.0, 0.0), (0.0, 1.0)).unwrap());
        for _ in 0..120 {
            node = Box::new(Translation::new(node, 1.0, 0.0).unwrap());
        }

        let mut batch = GeometryBatch::new();
        node.render(&mut batch).unwrap();

        assert_eq!(batch.triangle_count(), 1);
        assert_eq!(batch.vertices()[2].position, Vec2::new(120.0, 0.0));
        assert!(batch.is_balanced());
    }

    #[test]
    fn clear_keeps_nothing_but_capacity() {
        let mut batch = GeometryBatch::new();
        Triangle::from_origin((1.0, 0.0), (0.0, 1.0)).unwrap().render(&mut batch).unwrap();
        batch.clear();
        assert!(batch.is_empty());
        assert!(batch.is_balanced());
    }
}
