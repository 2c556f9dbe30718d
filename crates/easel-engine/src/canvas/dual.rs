use crate::coords::PixelSize;
use crate::paint::Color;
use crate::render::{Framebuffer, GpuBackend, PixelFormat, RenderError, TextureHandle, TextureDesc};

/// Two equally sized canvas textures with a front/back designation.
///
/// The renderer only ever samples the front buffer. The drawing side paints
/// into the back buffer and calls [`publish`](Self::publish) once the stroke
/// is complete, which swaps the roles in a single step.
#[derive(Debug, Clone)]
pub struct DualFramebuffer {
    buffers: [TextureHandle; 2],
    size: PixelSize,
    clear: Color,
    a_front: bool,
}

impl DualFramebuffer {
    /// Allocates both buffers, cleared to `clear`. Buffer A starts as front.
    pub fn new<B: GpuBackend>(
        backend: &mut B,
        size: PixelSize,
        format: PixelFormat,
        clear: Color,
    ) -> Result<Self, RenderError> {
        let size = PixelSize::new(size.width, size.height)?;
        let a = backend.create_texture(&TextureDesc { label: "easel canvas a", size, format, clear })?;
        let b = backend.create_texture(&TextureDesc { label: "easel canvas b", size, format, clear })?;

        Ok(Self {
            buffers: [a, b],
            size,
            clear,
            a_front: true,
        })
    }

    /// Texture currently displayed.
    #[inline]
    pub fn front_texture(&self) -> TextureHandle {
        self.buffers[self.front_index()]
    }

    /// Texture currently open for writing.
    #[inline]
    pub fn back_texture(&self) -> TextureHandle {
        self.buffers[1 - self.front_index()]
    }

    /// Back buffer as a draw target; draws accumulate on its contents.
    pub fn back_framebuffer(&self) -> Framebuffer {
        Framebuffer::from_texture(self.back_texture(), self.size, None)
    }

    /// Makes the back buffer the new front.
    pub fn publish(&mut self) {
        self.a_front = !self.a_front;
    }

    /// `0` when buffer A is front, `1` for buffer B.
    #[inline]
    pub fn front_index(&self) -> usize {
        if self.a_front { 0 } else { 1 }
    }

    #[inline]
    pub fn size(&self) -> PixelSize {
        self.size
    }

    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear
    }
}
