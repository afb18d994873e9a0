//! Paint model: the fill color carried by primitives down to the renderer.

mod color;

pub use color::Color;
