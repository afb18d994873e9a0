use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Per-frame contract between the window runtime and whatever it drives.
pub trait App {
    /// Called once per redraw of the window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called after the window's logical size changed.
    fn on_resize(&mut self, width: f32, height: f32) {
        let _ = (width, height);
    }
}
