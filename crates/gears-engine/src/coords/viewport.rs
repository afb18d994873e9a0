use super::Vec2;

/// Drawable area in logical pixels.
///
/// The triangle renderer maps `(0, 0)..(width, height)` onto the full surface,
/// so this is the coordinate basis every root node draws into.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size clamped to at least one logical pixel per axis, safe to divide by.
    #[inline]
    pub fn clamped_size(self) -> Vec2 {
        Vec2::new(self.width.max(1.0), self.height.max(1.0))
    }
}
