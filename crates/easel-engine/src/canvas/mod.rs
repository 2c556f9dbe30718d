//! Double-buffered canvas storage.

mod dual;

pub use dual::DualFramebuffer;
