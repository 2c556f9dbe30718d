//! Rendering core.
//!
//! Two passes per frame: the canvas front buffer is drawn through the view
//! transform into a window-sized view surface, which is then composited onto
//! the display together with the brush cursor.
//!
//! Convention:
//! - Window and canvas coordinates are physical pixels, top-left origin, +Y down.
//! - GPU work goes through [`GpuBackend`]; [`WgpuBackend`] is the wgpu implementation.

mod backend;
mod ctx;
mod cursor;
mod error;
mod geometry;
pub mod program;
mod renderer;
mod target;
mod uniform;
mod wgpu_backend;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{
    DrawCall, FramebufferTarget, GeometryHandle, GpuBackend, PixelFormat, ProgramHandle,
    TextureDesc, TextureHandle,
};
pub use ctx::RenderCtx;
pub use cursor::{BrushState, CursorInput, cursor_diameter};
pub use error::RenderError;
pub use geometry::{QuadGeometry, QuadVertex};
pub use program::ProgramSource;
pub use renderer::{Renderer, RendererConfig};
pub use target::{Framebuffer, RenderTarget};
pub use uniform::{UniformBlock, UniformDecl, UniformKind, UniformLayout, UniformValue, Uniforms};
pub use wgpu_backend::WgpuBackend;
