use std::rc::Rc;

use super::{Node, Rotation, Scaling, SceneError, SkewX, SkewY, Translation};

/// Chained construction of decorated nodes, innermost first.
///
/// `tri.rotated(a)?.translated(x, y)?` is `Translation(Rotation(tri, a), x, y)`:
/// the rotation applies to the vertices first.
pub trait NodeExt: Node + Sized + 'static {
    fn translated(self, x: f32, y: f32) -> Result<Translation, SceneError> {
        Translation::new(self, x, y)
    }

    /// `theta` in radians.
    fn rotated(self, theta: f32) -> Result<Rotation, SceneError> {
        Rotation::new(self, theta)
    }

    fn scaled(self, factor: f32) -> Result<Scaling, SceneError> {
        Scaling::new(self, factor)
    }

    /// `angle` in radians.
    fn skewed_x(self, angle: f32) -> Result<SkewX, SceneError> {
        SkewX::new(self, angle)
    }

    /// `angle` in radians.
    fn skewed_y(self, angle: f32) -> Result<SkewY, SceneError> {
        SkewY::new(self, angle)
    }

    /// Converts into a shareable handle, e.g. to attach one sub-tree twice.
    fn shared(self) -> Rc<dyn Node> {
        Rc::new(self)
    }
}

impl<N: Node + 'static> NodeExt for N {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::scene::{RecordingBackend, Triangle};

    #[test]
    fn chain_wraps_innermost_first() {
        let node = Triangle::from_origin((10.0, 0.0), (0.0, 10.0))
            .and_then(|t| t.scaled(2.0))
            .and_then(|s| s.translated(5.0, 0.0))
            .unwrap();

        let mut rec = RecordingBackend::new();
        node.render(&mut rec).unwrap();
        let tri = rec.triangles().next().unwrap();
        assert_eq!(tri[0], Vec2::new(25.0, 0.0));
    }

    #[test]
    fn shared_handle_is_a_node() {
        let shared = Triangle::from_origin((1.0, 0.0), (0.0, 1.0)).unwrap().shared();
        let wrapped = Rc::clone(&shared).translated(3.0, 0.0).unwrap();

        let mut rec = RecordingBackend::new();
        wrapped.render(&mut rec).unwrap();
        shared.render(&mut rec).unwrap();
        assert_eq!(rec.triangles().count(), 2);
        assert_eq!(Rc::strong_count(&shared), 2);
    }
}
