//! Transform math for the canvas view.
//!
//! Pure `f64` math with no GPU state. Conversion to `f32` happens only when a
//! matrix is uploaded as a shader uniform.

mod transform;

pub use transform::{Transform2D, multiply};
