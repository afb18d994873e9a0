//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring, clearing and presenting frames

mod error;
mod gpu;

pub use error::SurfaceErrorAction;
pub use gpu::{Gpu, GpuFrame, GpuInit};
