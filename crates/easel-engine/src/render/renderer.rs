use crate::canvas::DualFramebuffer;
use crate::coords::PixelSize;
use crate::math::{Transform2D, multiply};
use crate::paint::Color;
use crate::view::ViewController;

use super::backend::{GpuBackend, PixelFormat, TextureDesc, TextureHandle};
use super::cursor::{CursorInput, cursor_diameter};
use super::error::RenderError;
use super::geometry::QuadGeometry;
use super::program::{screen, view};
use super::target::{Framebuffer, RenderTarget};
use super::uniform::Uniforms;

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Initial window size in physical pixels.
    pub window_size: PixelSize,
    /// Canvas size, fixed for the session.
    pub canvas_size: PixelSize,
    /// Initial canvas contents.
    pub canvas_clear: Color,
    /// Background of the view surface around the canvas.
    pub view_clear: Color,
    /// Display clear color behind the composited view.
    pub screen_clear: Color,
    pub canvas_format: PixelFormat,
    /// Storage format of the window-sized view surface.
    pub view_format: PixelFormat,
}

impl RendererConfig {
    pub fn new(window_size: PixelSize, canvas_size: PixelSize) -> Self {
        Self {
            window_size,
            canvas_size,
            canvas_clear: Color::gray(0.5),
            view_clear: Color::gray(0.4),
            screen_clear: Color::gray(0.2),
            canvas_format: PixelFormat::Rgba8Unorm,
            view_format: PixelFormat::Rgba16Float,
        }
    }
}

/// Two-pass compositor: canvas → view surface → display with cursor overlay.
///
/// Resource creation and reallocation go through the backend passed to each
/// call; the renderer itself holds only handles and CPU-side state.
#[derive(Debug)]
pub struct Renderer {
    window_size: PixelSize,
    projection: Transform2D,
    canvas: DualFramebuffer,
    view: RenderTarget,
    view_texture: TextureHandle,
    screen: RenderTarget,
    view_controller: ViewController,
}

impl Renderer {
    pub fn new<B: GpuBackend>(backend: &mut B, config: &RendererConfig) -> Result<Self, RenderError> {
        let window_size = PixelSize::new(config.window_size.width, config.window_size.height)?;
        let canvas_size = PixelSize::new(config.canvas_size.width, config.canvas_size.height)?;

        let projection = Transform2D::orthographic(window_size.width_f64(), window_size.height_f64());

        let canvas = DualFramebuffer::new(backend, canvas_size, config.canvas_format, config.canvas_clear)?;

        let view_texture = backend.create_texture(&TextureDesc {
            label: "easel view surface",
            size: window_size,
            format: config.view_format,
            clear: config.view_clear,
        })?;
        let view_fb = Framebuffer::from_texture(view_texture, window_size, Some(config.view_clear));
        let view = RenderTarget::new(backend, &view::SOURCE, &QuadGeometry::canvas(canvas_size), view_fb)?;

        let view_controller = ViewController::new(window_size, canvas_size);

        let screen = RenderTarget::new(
            backend,
            &screen::SOURCE,
            &QuadGeometry::fullscreen(),
            Framebuffer::display(window_size, config.screen_clear),
        )?;

        log::info!(
            "renderer ready: window {window_size}, canvas {canvas_size} ({:?}), view surface {:?}",
            config.canvas_format, config.view_format
        );

        Ok(Self {
            window_size,
            projection,
            canvas,
            view,
            view_texture,
            screen,
            view_controller,
        })
    }

    /// Draws one frame: canvas into the view surface, then the view surface
    /// plus cursor onto the display.
    pub fn render_frame<B: GpuBackend>(&mut self, backend: &mut B, input: &CursorInput) -> Result<(), RenderError> {
        let screen_transform = multiply(self.view_controller.state().transform(), &self.projection);

        self.view.render(
            backend,
            &Uniforms::new()
                .with(view::BASE_TEXTURE, self.canvas.front_texture())
                .with(view::TRANSFORM, screen_transform),
        )?;

        let uniforms = self.screen_uniforms(input);
        self.screen.render(backend, &uniforms)
    }

    /// Uniforms for the display pass; reads nothing but `input` and view state.
    pub fn screen_uniforms(&self, input: &CursorInput) -> Uniforms<'static> {
        let brush = &input.brush;
        let (w, h) = (self.window_size.width_f64(), self.window_size.height_f64());
        let pointer = [(input.pointer.x / w) as f32, (input.pointer.y / h) as f32];

        Uniforms::new()
            .with(screen::BRUSH_COLOR, brush.color)
            .with(screen::OPACITY, brush.opacity)
            .with(screen::DIAMETER, cursor_diameter(brush.size, self.view_controller.scale_amount()))
            .with(screen::POINTER, pointer)
            .with(screen::WINDOW_SIZE, self.window_size.to_array_f32())
            .with(screen::BASE_TEXTURE, self.view_texture)
            .with(screen::SHOW_COLOR, brush.show_color)
            .with(screen::SOFTNESS, brush.softness)
    }

    /// Reflows to a new window size.
    ///
    /// Reallocates the view surface, rebuilds the projection and resets the
    /// view: pan, zoom, rotation and mirror are all discarded.
    pub fn resize_window<B: GpuBackend>(&mut self, backend: &mut B, size: PixelSize) -> Result<(), RenderError> {
        let size = PixelSize::new(size.width, size.height)?;
        backend.reallocate_texture(self.view_texture, size)?;
        log::debug!("view surface reallocated: {size}");

        self.window_size = size;
        self.projection = Transform2D::orthographic(size.width_f64(), size.height_f64());
        self.view.set_size(size);
        self.screen.set_size(size);
        self.view_controller.set_window_size(size);
        Ok(())
    }

    #[inline]
    pub fn window_size(&self) -> PixelSize {
        self.window_size
    }

    #[inline]
    pub fn projection(&self) -> &Transform2D {
        &self.projection
    }

    #[inline]
    pub fn view_controller(&self) -> &ViewController {
        &self.view_controller
    }

    #[inline]
    pub fn view_controller_mut(&mut self) -> &mut ViewController {
        &mut self.view_controller
    }

    #[inline]
    pub fn canvas(&self) -> &DualFramebuffer {
        &self.canvas
    }

    /// Mutable canvas access for the drawing side (publishing strokes).
    #[inline]
    pub fn canvas_mut(&mut self) -> &mut DualFramebuffer {
        &mut self.canvas
    }

    #[inline]
    pub fn view_target(&self) -> &RenderTarget {
        &self.view
    }

    #[inline]
    pub fn screen_target(&self) -> &RenderTarget {
        &self.screen
    }
}
