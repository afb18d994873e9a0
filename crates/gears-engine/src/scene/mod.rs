//! Scene graph.
//!
//! Responsibilities:
//! - the [`Node`] capability shared by primitives and transform decorators
//! - primitives that emit raw geometry ([`Triangle`])
//! - decorators that wrap one node with a fixed matrix ([`Translation`],
//!   [`Rotation`], [`Scaling`], [`SkewX`], [`SkewY`])
//! - the [`Backend`] seam and its implementations: the frame
//!   [`GeometryBatch`] and the test [`RecordingBackend`]
//!
//! Traversal is depth-first and synchronous. The transform stack lives in
//! the backend passed to `render`, never in global state.

mod backend;
mod batch;
mod error;
mod ext;
mod node;
mod record;
mod stack;
mod transforms;
mod triangle;

pub use backend::{Backend, TransformScope};
pub use batch::{BatchVertex, GeometryBatch};
pub use error::SceneError;
pub use ext::NodeExt;
pub use node::Node;
pub use record::{Command, RecordingBackend};
pub use stack::TransformStack;
pub use transforms::{Rotation, Scaling, SkewX, SkewY, Translation};
pub use triangle::Triangle;
