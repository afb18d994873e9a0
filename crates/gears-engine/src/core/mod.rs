//! Core engine-facing contracts.
//!
//! The stable interface between the window runtime and the code it drives
//! each frame, without leaking runtime internals into user code.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
