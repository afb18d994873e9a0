//! Application façade.
//!
//! Owns the root node list and the window configuration, and connects the
//! scene graph to the window runtime and triangle renderer.

mod application;

pub use application::Application;
