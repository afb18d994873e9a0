//! gears engine crate.
//!
//! A 2D scene graph: primitives wrapped by composable transform decorators,
//! rendered each frame through an explicit transform stack into a wgpu
//! triangle renderer.

pub mod app;
pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod math;
pub mod paint;
pub mod render;
pub mod scene;
pub mod window;
