use std::rc::Rc;

use anyhow::Result;
use winit::dpi::LogicalSize;

use crate::core::{App, AppControl, FrameCtx};
use crate::device::GpuInit;
use crate::paint::Color;
use crate::render::TriangleRenderer;
use crate::scene::{GeometryBatch, Node, SceneError, TransformStack};
use crate::window::{Runtime, RuntimeConfig};

/// A window that renders an ordered list of root nodes every frame.
///
/// Roots render in attachment order, so later roots draw over earlier ones.
/// The same `Rc` may be attached more than once; each attachment renders
/// independently.
///
/// ```rust,ignore
/// let shifted = Triangle::from_origin((200.0, 200.0), (100.0, 400.0))?
///     .translated(250.0, 0.0)?
///     .shared();
///
/// let mut app = Application::new();
/// app.attach_node(Rc::clone(&shifted))
///     .attach_node(shifted.scaled(0.5)?.shared())
///     .resize(1024.0, 768.0);
/// app.run()?;
/// ```
pub struct Application {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    clear_color: Color,
    max_stack_depth: usize,
    roots: Vec<Rc<dyn Node>>,
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            gpu_init: GpuInit::default(),
            clear_color: Color::BLACK,
            max_stack_depth: TransformStack::DEFAULT_MAX_DEPTH,
            roots: Vec::new(),
        }
    }

    /// Appends a root node. Insertion order is draw order.
    pub fn attach_node(&mut self, node: Rc<dyn Node>) -> &mut Self {
        self.roots.push(node);
        self
    }

    /// Sets the logical size of the window `run` opens. Node data is unaffected.
    pub fn resize(&mut self, width: f64, height: f64) -> &mut Self {
        self.config.initial_size = LogicalSize::new(width, height);
        self
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.config.title = title.into();
        self
    }

    pub fn clear_color(&mut self, color: Color) -> &mut Self {
        self.clear_color = color;
        self
    }

    /// Deepest transform nesting a frame may reach before it is aborted.
    pub fn max_stack_depth(&mut self, depth: usize) -> &mut Self {
        self.max_stack_depth = depth;
        self
    }

    pub fn gpu_init(&mut self, init: GpuInit) -> &mut Self {
        self.gpu_init = init;
        self
    }

    #[inline]
    pub fn roots(&self) -> &[Rc<dyn Node>] {
        &self.roots
    }

    #[inline]
    pub fn window_size(&self) -> (f64, f64) {
        (self.config.initial_size.width, self.config.initial_size.height)
    }

    /// A batch sized for this application's stack depth limit.
    pub fn new_batch(&self) -> GeometryBatch {
        GeometryBatch::with_max_depth(self.max_stack_depth)
    }

    /// Runs one traversal of every root into `batch`, replacing its contents.
    pub fn render_frame(&self, batch: &mut GeometryBatch) -> Result<(), SceneError> {
        render_roots(&self.roots, batch)
    }

    /// Opens the window and renders every frame until it closes.
    pub fn run(self) -> Result<()> {
        log::info!(
            "starting {:?} with {} root node(s)",
            self.config.title,
            self.roots.len()
        );

        let scene = SceneApp {
            batch: GeometryBatch::with_max_depth(self.max_stack_depth),
            roots: self.roots,
            clear_color: self.clear_color,
            renderer: TriangleRenderer::new(),
            failures: FailureLog::default(),
        };
        Runtime::run(self.config, self.gpu_init, scene)
    }
}

fn render_roots(roots: &[Rc<dyn Node>], batch: &mut GeometryBatch) -> Result<(), SceneError> {
    batch.clear();
    for root in roots {
        root.render(batch)?;
    }
    Ok(())
}

/// Reports aborted frames without flooding the log.
///
/// A failure is logged when it differs from the previous one; an unchanged
/// failure is repeated every `REMIND_EVERY` frames.
#[derive(Debug, Default)]
struct FailureLog {
    last: Option<String>,
    repeats: u64,
}

impl FailureLog {
    const REMIND_EVERY: u64 = 600;

    /// Returns true when this failure was written to the log.
    fn failed(&mut self, frame: u64, err: &SceneError) -> bool {
        let msg = err.to_string();
        if self.last.as_deref() == Some(msg.as_str()) {
            self.repeats += 1;
            if self.repeats % Self::REMIND_EVERY != 0 {
                return false;
            }
            log::error!("frame {frame} aborted: {msg} (failing for {} frames)", self.repeats + 1);
        } else {
            log::error!("frame {frame} aborted: {msg}");
            self.last = Some(msg);
            self.repeats = 0;
        }
        true
    }

    fn succeeded(&mut self, frame: u64) {
        if self.last.take().is_some() {
            log::info!("frame {frame} rendered again after {} failed frame(s)", self.repeats + 1);
            self.repeats = 0;
        }
    }
}

/// Per-frame driver handed to the window runtime.
struct SceneApp {
    roots: Vec<Rc<dyn Node>>,
    clear_color: Color,
    batch: GeometryBatch,
    renderer: TriangleRenderer,
    failures: FailureLog,
}

impl App for SceneApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let complete = match render_roots(&self.roots, &mut self.batch) {
            Ok(()) => {
                self.failures.succeeded(ctx.frame_index);
                true
            }
            Err(err) => {
                self.failures.failed(ctx.frame_index, &err);
                false
            }
        };
        debug_assert!(self.batch.is_balanced(), "transform stack left unbalanced");

        let (batch, renderer) = (&self.batch, &mut self.renderer);
        ctx.render(self.clear_color, |rctx, target| {
            if complete {
                renderer.render(rctx, target, batch);
            }
        })
    }

    fn on_resize(&mut self, width: f32, height: f32) {
        log::debug!("viewport now {width}x{height}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::scene::{NodeExt, Triangle};

    fn demo_triangle() -> Triangle {
        Triangle::from_origin((200.0, 200.0), (100.0, 400.0)).unwrap()
    }

    fn positions(batch: &GeometryBatch) -> Vec<Vec2> {
        batch.vertices().iter().map(|v| v.position).collect()
    }

    #[test]
    fn roots_render_in_attachment_order() {
        let red = Color::from_straight(1.0, 0.0, 0.0, 1.0);
        let mut app = Application::new();
        app.attach_node(demo_triangle().shared())
            .attach_node(demo_triangle().with_color(red).shared());

        let mut batch = app.new_batch();
        app.render_frame(&mut batch).unwrap();

        assert_eq!(batch.triangle_count(), 2);
        assert_eq!(batch.vertices()[0].color, Color::WHITE);
        assert_eq!(batch.vertices()[3].color, red);
    }

    #[test]
    fn shared_root_attached_twice_renders_twice() {
        let shifted = demo_triangle()
            .translated(250.0, 0.0)
            .and_then(|n| n.translated(500.0, 0.0))
            .unwrap()
            .shared();

        let mut app = Application::new();
        app.attach_node(Rc::clone(&shifted)).attach_node(Rc::clone(&shifted));

        let mut batch = app.new_batch();
        app.render_frame(&mut batch).unwrap();

        let pos = positions(&batch);
        assert_eq!(pos.len(), 6);
        assert_eq!(pos[2], Vec2::new(750.0, 0.0));
        assert_eq!(pos[..3], pos[3..]);
        assert!(batch.is_balanced());
    }

    #[test]
    fn frames_are_reproducible() {
        let mut app = Application::new();
        app.attach_node(demo_triangle().skewed_x(-10f32.to_radians()).unwrap().shared())
            .attach_node(demo_triangle().rotated(0.5).unwrap().shared());

        let mut batch = app.new_batch();
        app.render_frame(&mut batch).unwrap();
        let first = positions(&batch);
        app.render_frame(&mut batch).unwrap();
        assert_eq!(positions(&batch), first);
    }

    #[test]
    fn too_deep_tree_aborts_the_frame_balanced() {
        let mut node: Rc<dyn Node> = demo_triangle().shared();
        for _ in 0..4 {
            node = node.scaled(1.0).unwrap().shared();
        }

        let mut app = Application::new();
        app.max_stack_depth(2).attach_node(node);

        let mut batch = app.new_batch();
        assert!(matches!(app.render_frame(&mut batch), Err(SceneError::BackendFailure(_))));
        assert!(batch.is_balanced());
    }

    #[test]
    fn repeated_failures_are_logged_once_then_periodically() {
        let overflow = SceneError::backend("transform stack overflow (max depth 2)");
        let mut log = FailureLog::default();

        assert!(log.failed(0, &overflow));
        let logged = (1..=FailureLog::REMIND_EVERY).filter(|&f| log.failed(f, &overflow)).count();
        assert_eq!(logged, 1);

        // A different error is reported straight away.
        assert!(log.failed(700, &SceneError::backend("draw failed")));

        // After recovery the same error counts as new again.
        log.succeeded(701);
        assert!(log.failed(702, &SceneError::backend("draw failed")));
    }

    #[test]
    fn resize_only_changes_the_window() {
        let mut app = Application::new();
        app.attach_node(demo_triangle().shared()).resize(1024.0, 768.0);
        assert_eq!(app.window_size(), (1024.0, 768.0));
        assert_eq!(app.roots().len(), 1);
    }
}
