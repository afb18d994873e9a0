use std::rc::Rc;

use super::{Backend, SceneError};

/// Anything that can be drawn: primitives and the transforms wrapping them.
///
/// `render` issues commands to `backend` and must leave its transform stack
/// at the depth it found it. Rendering an unchanged tree twice issues the
/// same command sequence twice.
///
/// ```rust,ignore
/// let node = Triangle::new((0.0, 0.0), (100.0, 0.0), (0.0, 100.0))?
///     .rotated(FRAC_PI_4)?
///     .translated(200.0, 150.0)?;
/// node.render(&mut backend)?;
/// ```
pub trait Node {
    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError>;
}

impl<N: Node + ?Sized> Node for Box<N> {
    #[inline]
    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError> {
        (**self).render(backend)
    }
}

/// Shared sub-trees. The same `Rc` can sit under several parents or be
/// attached as several roots; each use renders independently.
impl<N: Node + ?Sized> Node for Rc<N> {
    #[inline]
    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError> {
        (**self).render(backend)
    }
}

impl<N: Node + ?Sized> Node for &N {
    #[inline]
    fn render(&self, backend: &mut dyn Backend) -> Result<(), SceneError> {
        (**self).render(backend)
    }
}
