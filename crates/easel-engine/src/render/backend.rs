//! The seam between the render core and a GPU API.
//!
//! The core never talks to a graphics API directly. It creates programs,
//! quad geometry and color textures through [`GpuBackend`] and receives
//! opaque handles back; every draw is described by a [`DrawCall`].
//!
//! Binding convention for programs (group 0):
//! - binding `0`: the packed uniform buffer, present when the program declares
//!   any non-texture uniform
//! - binding `1 + 2i`: the `i`-th declared texture
//! - binding `2 + 2i`: the sampler for that texture

use crate::coords::PixelSize;
use crate::paint::Color;

use super::error::RenderError;
use super::geometry::QuadGeometry;
use super::program::ProgramSource;
use super::uniform::UniformLayout;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

handle!(
    /// Compiled shader program owned by a backend.
    ProgramHandle
);
handle!(
    /// Uploaded quad vertex data owned by a backend.
    GeometryHandle
);
handle!(
    /// Color texture owned by a backend; stays valid across reallocation.
    TextureHandle
);

/// Pixel formats the core allocates.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixelFormat {
    /// 8 bits per channel; canvas storage.
    Rgba8Unorm,
    /// 16 bits per channel; the window-sized view surface.
    Rgba16Float,
}

/// Parameters for a new color texture.
#[derive(Debug, Clone)]
pub struct TextureDesc<'a> {
    pub label: &'a str,
    pub size: PixelSize,
    pub format: PixelFormat,
    /// Initial contents, also used after reallocation.
    pub clear: Color,
}

/// Where a draw lands.
///
/// `DisplaySurface` is the platform's default framebuffer for the current
/// frame; it is not owned by any render target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FramebufferTarget {
    Offscreen(TextureHandle),
    DisplaySurface,
}

/// One full-quad draw.
#[derive(Debug, Clone)]
pub struct DrawCall<'a> {
    pub program: ProgramHandle,
    pub geometry: GeometryHandle,
    pub output: FramebufferTarget,
    /// Clear color applied before drawing; `None` keeps existing contents.
    pub clear: Option<Color>,
    /// Packed uniform buffer (see [`UniformLayout`]).
    pub uniform_bytes: &'a [u8],
    /// Textures in declaration order.
    pub textures: &'a [TextureHandle],
}

/// Capabilities the render core needs from a GPU API.
///
/// Implementations must be driven from a single thread; resource mutation
/// (`reallocate_texture`) is only issued between frames.
pub trait GpuBackend {
    /// Creates a program from already validated WGSL.
    fn create_program(
        &mut self,
        source: &ProgramSource<'_>,
        layout: &UniformLayout,
    ) -> Result<ProgramHandle, RenderError>;

    fn create_geometry(&mut self, geometry: &QuadGeometry) -> Result<GeometryHandle, RenderError>;

    fn create_texture(&mut self, desc: &TextureDesc<'_>) -> Result<TextureHandle, RenderError>;

    /// Replaces the storage behind `texture` with a new size.
    ///
    /// Format and clear color are kept; previous contents are discarded.
    fn reallocate_texture(&mut self, texture: TextureHandle, size: PixelSize) -> Result<(), RenderError>;

    fn draw(&mut self, call: &DrawCall<'_>) -> Result<(), RenderError>;
}
