use crate::coords::PixelSize;
use crate::paint::Color;

use super::backend::{
    DrawCall, FramebufferTarget, GeometryHandle, GpuBackend, PixelFormat, ProgramHandle,
    TextureDesc, TextureHandle,
};
use super::error::RenderError;
use super::geometry::QuadGeometry;
use super::program::ProgramSource;
use super::uniform::{UniformBlock, UniformLayout, Uniforms};

/// Output surface of a render target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Framebuffer {
    target: FramebufferTarget,
    size: PixelSize,
    clear: Option<Color>,
}

impl Framebuffer {
    /// Allocates an offscreen color texture owned by this framebuffer.
    pub fn offscreen<B: GpuBackend>(
        backend: &mut B,
        label: &str,
        size: PixelSize,
        format: PixelFormat,
        clear: Color,
    ) -> Result<Self, RenderError> {
        let texture = backend.create_texture(&TextureDesc { label, size, format, clear })?;
        Ok(Self::from_texture(texture, size, Some(clear)))
    }

    /// Wraps an existing texture (e.g. a canvas buffer) as a draw target.
    ///
    /// With `clear = None` draws accumulate on the existing contents.
    pub fn from_texture(texture: TextureHandle, size: PixelSize, clear: Option<Color>) -> Self {
        Self {
            target: FramebufferTarget::Offscreen(texture),
            size,
            clear,
        }
    }

    /// The platform display framebuffer for the current frame.
    pub fn display(size: PixelSize, clear: Color) -> Self {
        Self {
            target: FramebufferTarget::DisplaySurface,
            size,
            clear: Some(clear),
        }
    }

    #[inline]
    pub fn target(&self) -> FramebufferTarget {
        self.target
    }

    /// Backing texture; `None` for the display surface.
    #[inline]
    pub fn texture(&self) -> Option<TextureHandle> {
        match self.target {
            FramebufferTarget::Offscreen(t) => Some(t),
            FramebufferTarget::DisplaySurface => None,
        }
    }

    #[inline]
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Color applied at the start of every pass into this framebuffer.
    #[inline]
    pub fn clear_color(&self) -> Option<Color> {
        self.clear
    }
}

/// A (program, quad, framebuffer) triple able to run one draw per call.
#[derive(Debug)]
pub struct RenderTarget {
    program: ProgramHandle,
    layout: UniformLayout,
    uniforms: UniformBlock,
    geometry: GeometryHandle,
    framebuffer: Framebuffer,
}

impl RenderTarget {
    /// Validates `source`, then creates its program and geometry on `backend`.
    pub fn new<B: GpuBackend>(
        backend: &mut B,
        source: &ProgramSource<'_>,
        geometry: &QuadGeometry,
        framebuffer: Framebuffer,
    ) -> Result<Self, RenderError> {
        let layout = UniformLayout::new(source.label, source.uniforms)?;
        source.validate()?;
        let program = backend.create_program(source, &layout)?;
        let geometry = backend.create_geometry(geometry)?;
        log::debug!("render target `{}` -> {:?}", source.label, framebuffer.target());

        Ok(Self {
            program,
            uniforms: UniformBlock::new(&layout),
            layout,
            geometry,
            framebuffer,
        })
    }

    /// Sets `uniforms` by name and draws the quad into the framebuffer.
    ///
    /// Unknown names and type mismatches fail before anything is drawn.
    pub fn render<B: GpuBackend>(&mut self, backend: &mut B, uniforms: &Uniforms<'_>) -> Result<(), RenderError> {
        self.uniforms.apply(&self.layout, uniforms)?;
        let textures = self.uniforms.bound_textures(&self.layout)?;

        backend.draw(&DrawCall {
            program: self.program,
            geometry: self.geometry,
            output: self.framebuffer.target,
            clear: self.framebuffer.clear,
            uniform_bytes: self.uniforms.bytes(),
            textures: &textures,
        })
    }

    #[inline]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    #[inline]
    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    /// Records the framebuffer's new dimensions (storage is reallocated by the owner).
    pub(crate) fn set_size(&mut self, size: PixelSize) {
        self.framebuffer.size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::program::view;
    use crate::render::testing::RecordingBackend;
    use crate::math::Transform2D;

    fn size(w: u32, h: u32) -> PixelSize {
        PixelSize::new(w, h).unwrap()
    }

    fn view_target(backend: &mut RecordingBackend) -> RenderTarget {
        let fb = Framebuffer::offscreen(backend, "test surface", size(64, 32), PixelFormat::Rgba8Unorm, Color::BLACK)
            .unwrap();
        RenderTarget::new(backend, &view::SOURCE, &QuadGeometry::canvas(size(16, 16)), fb).unwrap()
    }

    #[test]
    fn offscreen_framebuffer_owns_a_cleared_texture() {
        let mut backend = RecordingBackend::default();
        let fb = Framebuffer::offscreen(&mut backend, "t", size(4, 4), PixelFormat::Rgba16Float, Color::WHITE)
            .unwrap();
        let t = backend.texture(fb.texture().unwrap());
        assert_eq!(t.clear, Color::WHITE);
        assert_eq!(t.format, PixelFormat::Rgba16Float);
        assert_eq!(fb.clear_color(), Some(Color::WHITE));
    }

    #[test]
    fn display_framebuffer_has_no_texture() {
        let fb = Framebuffer::display(size(8, 8), Color::BLACK);
        assert_eq!(fb.texture(), None);
        assert_eq!(fb.target(), FramebufferTarget::DisplaySurface);
    }

    #[test]
    fn render_issues_one_draw() {
        let mut backend = RecordingBackend::default();
        let mut target = view_target(&mut backend);
        let tex = target.framebuffer().texture().unwrap();
        target
            .render(
                &mut backend,
                &Uniforms::new()
                    .with(view::TRANSFORM, Transform2D::identity())
                    .with(view::BASE_TEXTURE, tex),
            )
            .unwrap();
        assert_eq!(backend.draws.len(), 1);
        assert_eq!(backend.read_f32(&backend.draws[0], view::TRANSFORM, 0), 1.0);
    }

    #[test]
    fn unknown_uniform_fails_without_drawing() {
        let mut backend = RecordingBackend::default();
        let mut target = view_target(&mut backend);
        let err = target
            .render(&mut backend, &Uniforms::new().with("brush_colour", 1.0f32))
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownUniform { ref name, .. } if name == "brush_colour"));
        assert!(backend.draws.is_empty());
    }

    #[test]
    fn unbound_texture_fails() {
        let mut backend = RecordingBackend::default();
        let mut target = view_target(&mut backend);
        let err = target
            .render(&mut backend, &Uniforms::new().with(view::TRANSFORM, Transform2D::identity()))
            .unwrap_err();
        assert!(matches!(err, RenderError::UnboundTexture { .. }));
    }

    #[test]
    fn uniforms_persist_between_renders() {
        let mut backend = RecordingBackend::default();
        let mut target = view_target(&mut backend);
        let tex = target.framebuffer().texture().unwrap();
        target
            .render(&mut backend, &Uniforms::new().with(view::BASE_TEXTURE, tex))
            .unwrap();
        target.render(&mut backend, &Uniforms::new()).unwrap();
        assert_eq!(backend.draws[1].textures, vec![tex]);
    }

    #[test]
    fn repeated_renders_draw_with_their_own_uniforms() {
        let mut backend = RecordingBackend::default();
        let mut target = view_target(&mut backend);
        let tex = target.framebuffer().texture().unwrap();

        let mut first = Transform2D::identity();
        first.translate(3.0, 0.0, 0.0);
        let mut second = Transform2D::identity();
        second.translate(7.0, 0.0, 0.0);

        for t in [first, second] {
            target
                .render(&mut backend, &Uniforms::new().with(view::TRANSFORM, t).with(view::BASE_TEXTURE, tex))
                .unwrap();
        }

        // Column 3, row 0 holds the x translation.
        assert_eq!(backend.read_f32(&backend.draws[0], view::TRANSFORM, 12), 3.0);
        assert_eq!(backend.read_f32(&backend.draws[1], view::TRANSFORM, 12), 7.0);
    }
}
