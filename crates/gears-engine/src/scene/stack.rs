use crate::math::Mat4;

use super::SceneError;

/// Stack of composed transforms.
///
/// The base frame is always present and starts as the identity; `depth`
/// counts frames pushed above it. The top frame is the current transform.
#[derive(Debug, Clone)]
pub struct TransformStack {
    frames: Vec<Mat4>,
    max_depth: usize,
}

impl TransformStack {
    /// Depth limit used by `new`: none. Frames live on the heap, so nesting is
    /// bounded only by memory. Use `with_max_depth` to opt into a cap.
    pub const DEFAULT_MAX_DEPTH: usize = usize::MAX;

    pub fn new() -> Self {
        Self::with_max_depth(Self::DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        let mut frames = Vec::with_capacity(max_depth.min(64) + 1);
        frames.push(Mat4::IDENTITY);
        Self { frames, max_depth }
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// The transform applied to geometry emitted right now.
    #[inline]
    pub fn current(&self) -> Mat4 {
        self.frames.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Duplicates the top frame.
    pub fn push(&mut self) -> Result<(), SceneError> {
        if self.depth() >= self.max_depth {
            return Err(SceneError::backend(format!(
                "transform stack overflow (max depth {})",
                self.max_depth
            )));
        }
        self.frames.push(self.current());
        Ok(())
    }

    /// `top = top * matrix`
    pub fn apply(&mut self, matrix: &Mat4) {
        if let Some(top) = self.frames.last_mut() {
            *top = *top * *matrix;
        }
    }

    /// Drops the top frame.
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `push`. In release
    /// builds the call is logged and ignored so the base frame survives.
    pub fn pop(&mut self) {
        debug_assert!(self.depth() > 0, "pop called without matching push");
        if self.depth() == 0 {
            log::warn!("transform stack underflow ignored");
            return;
        }
        self.frames.pop();
    }

    /// Returns to a single identity base frame, keeping allocated capacity.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.frames.push(Mat4::IDENTITY);
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    #[test]
    fn starts_at_identity_with_no_depth() {
        let s = TransformStack::new();
        assert_eq!(s.depth(), 0);
        assert_eq!(s.current(), Mat4::IDENTITY);
        assert_eq!(s.max_depth(), TransformStack::DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn default_stack_has_no_practical_limit() {
        let mut s = TransformStack::new();
        for _ in 0..500 {
            s.push().unwrap();
            s.apply(&Mat4::from_translation(1.0, 0.0, 0.0));
        }
        assert_eq!(s.depth(), 500);
        assert_eq!(s.current() * Vec2::ZERO, Vec2::new(500.0, 0.0));
        for _ in 0..500 {
            s.pop();
        }
        assert_eq!(s.current(), Mat4::IDENTITY);
    }

    #[test]
    fn pop_restores_the_pushed_frame() {
        let mut s = TransformStack::new();
        s.apply(&Mat4::from_translation(5.0, 0.0, 0.0));
        let before = s.current();

        s.push().unwrap();
        s.apply(&Mat4::from_scale(3.0, 3.0, 1.0));
        assert_ne!(s.current(), before);

        s.pop();
        assert_eq!(s.current(), before);
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn apply_post_multiplies() {
        let mut s = TransformStack::new();
        s.apply(&Mat4::from_translation(10.0, 0.0, 0.0));
        s.apply(&Mat4::from_scale(2.0, 2.0, 1.0));
        // Inner (scale) hits the vertex first.
        assert_eq!(s.current() * Vec2::new(1.0, 1.0), Vec2::new(12.0, 2.0));
    }

    #[test]
    fn push_past_max_depth_fails_without_growing() {
        let mut s = TransformStack::with_max_depth(2);
        s.push().unwrap();
        s.push().unwrap();
        let err = s.push().unwrap_err();
        assert!(matches!(err, SceneError::BackendFailure(_)));
        assert_eq!(s.depth(), 2);
    }

    #[test]
    fn reset_clears_frames() {
        let mut s = TransformStack::new();
        s.push().unwrap();
        s.apply(&Mat4::from_translation(1.0, 1.0, 0.0));
        s.reset();
        assert_eq!(s.depth(), 0);
        assert_eq!(s.current(), Mat4::IDENTITY);
    }
}
