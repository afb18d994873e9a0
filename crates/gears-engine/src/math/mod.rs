//! Transform math.
//!
//! Only what the scene graph composes: a column-major 4x4 matrix with the
//! affine constructors the transform decorators need.

mod mat4;

pub use mat4::Mat4;
