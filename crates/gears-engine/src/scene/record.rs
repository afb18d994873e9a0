use crate::coords::Vec2;
use crate::math::Mat4;
use crate::paint::Color;

use super::{Backend, SceneError, TransformStack};

/// One backend call as seen by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Push,
    Apply(Mat4),
    Pop,
    Triangle {
        /// Vertices as the node emitted them.
        local: [Vec2; 3],
        /// Vertices after the current transform.
        world: [Vec2; 3],
        color: Color,
    },
}

/// Backend that records every call instead of drawing.
///
/// Tracks a real [`TransformStack`] so recorded triangles carry their
/// composed world positions. Draw failures can be injected to exercise
/// error paths.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    stack: TransformStack,
    commands: Vec<Command>,
    max_depth_seen: usize,
    draws: usize,
    fail_draws_after: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { stack: TransformStack::with_max_depth(max_depth), ..Self::default() }
    }

    /// Lets `n` draws succeed; every later draw fails with `BackendFailure`.
    pub fn fail_draws_after(mut self, n: usize) -> Self {
        self.fail_draws_after = Some(n);
        self
    }

    #[inline]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// World-space vertices of every recorded triangle, in draw order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::Triangle { world, .. } => Some(*world),
            _ => None,
        })
    }

    /// Deepest stack depth reached since creation or the last `clear`.
    #[inline]
    pub fn max_depth_seen(&self) -> usize {
        self.max_depth_seen
    }

    /// Drops recorded commands and resets the stack.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.stack.reset();
        self.max_depth_seen = 0;
        self.draws = 0;
    }
}

impl Backend for RecordingBackend {
    fn push_transform(&mut self) -> Result<(), SceneError> {
        self.stack.push()?;
        self.max_depth_seen = self.max_depth_seen.max(self.stack.depth());
        self.commands.push(Command::Push);
        Ok(())
    }

    fn apply_transform(&mut self, matrix: &Mat4) {
        self.stack.apply(matrix);
        self.commands.push(Command::Apply(*matrix));
    }

    fn pop_transform(&mut self) {
        self.stack.pop();
        self.commands.push(Command::Pop);
    }

    fn draw_triangle(&mut self, vertices: [Vec2; 3], color: Color) -> Result<(), SceneError> {
        if self.fail_draws_after.is_some_and(|n| self.draws >= n) {
            return Err(SceneError::backend(format!("injected failure on draw {}", self.draws)));
        }
        self.draws += 1;

        let m = self.stack.current();
        self.commands.push(Command::Triangle {
            local: vertices,
            world: vertices.map(|v| m * v),
            color,
        });
        Ok(())
    }

    #[inline]
    fn depth(&self) -> usize {
        self.stack.depth()
    }
}
