use crate::coords::Vec2;
use crate::math::Mat4;
use crate::paint::Color;

use super::SceneError;

/// Rasterization backend as seen by the scene graph.
///
/// Holds the transform stack nodes push onto and receives raw geometry.
/// Transform calls bracket each decorator: `push_transform`, `apply_transform`,
/// render the wrapped node, `pop_transform`. Use [`TransformScope`] rather
/// than calling push/pop by hand so the pop also runs on error.
pub trait Backend {
    /// Saves the current transform. Fails if the stack is full.
    fn push_transform(&mut self) -> Result<(), SceneError>;

    /// Post-multiplies the current transform: `current = current * matrix`.
    fn apply_transform(&mut self, matrix: &Mat4);

    /// Restores the transform saved by the matching `push_transform`.
    fn pop_transform(&mut self);

    /// Emits one triangle in the caller's local coordinates.
    fn draw_triangle(&mut self, vertices: [Vec2; 3], color: Color) -> Result<(), SceneError>;

    /// Number of saved transforms currently on the stack.
    fn depth(&self) -> usize;
}

/// Pushed transform frame that pops itself when dropped.
///
/// Stack depth after the scope ends equals the depth before it began, on the
/// success path and on every early return.
pub struct TransformScope<'a> {
    backend: &'a mut dyn Backend,
}

impl<'a> TransformScope<'a> {
    /// Pushes a frame. Nothing is pushed if this fails.
    pub fn enter(backend: &'a mut dyn Backend) -> Result<Self, SceneError> {
        backend.push_transform()?;
        Ok(Self { backend })
    }

    /// The backend, with this scope's frame on top of its stack.
    #[inline]
    pub fn backend(&mut self) -> &mut dyn Backend {
        &mut *self.backend
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.backend.pop_transform();
    }
}
