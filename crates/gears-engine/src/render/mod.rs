//! GPU rendering subsystem.
//!
//! The triangle renderer consumes a frame's [`GeometryBatch`](crate::scene::GeometryBatch)
//! and issues GPU commands via wgpu. It owns its GPU resources (pipeline, buffers).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod ctx;
mod triangle;

pub use ctx::{RenderCtx, RenderTarget};
pub use triangle::TriangleRenderer;
