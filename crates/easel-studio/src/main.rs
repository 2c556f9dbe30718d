mod config;
mod controls;

use anyhow::{Context, Result};
use winit::event::WindowEvent;
use winit::window::WindowId;

use easel_engine::coords::PixelSize;
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::device::GpuInit;
use easel_engine::logging::{LoggingConfig, init_logging};
use easel_engine::render::{CursorInput, Renderer, RendererConfig, WgpuBackend};
use easel_engine::window::{Runtime, RuntimeConfig};

use controls::{Controls, Outcome, view_title};

/// GPU-side state, created on the first frame once a device exists.
struct Session {
    backend: WgpuBackend,
    renderer: Renderer,
}

struct Studio {
    canvas_size: PixelSize,
    session: Option<Session>,
    /// Latest non-zero size from `Resized`, applied before the next frame.
    pending_resize: Option<PixelSize>,
    controls: Controls,
    title: String,
}

impl Studio {
    fn new(canvas_size: PixelSize) -> Self {
        Self {
            canvas_size,
            session: None,
            pending_resize: None,
            controls: Controls::default(),
            title: String::new(),
        }
    }

    fn start_session(&mut self, ctx: &FrameCtx<'_, '_>) -> Result<Option<Session>> {
        let size = ctx.gpu.size();
        let Ok(window_size) = PixelSize::new(size.width, size.height) else {
            return Ok(None);
        };

        let mut backend = WgpuBackend::new(&ctx.render_ctx());
        let renderer = Renderer::new(&mut backend, &RendererConfig::new(window_size, self.canvas_size))
            .context("failed to build renderer")?;
        Ok(Some(Session { backend, renderer }))
    }
}

impl App for Studio {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::Resized(size) = event {
            // Minimized windows report zero; keep the last drawable size.
            if let Ok(size) = PixelSize::new(size.width, size.height) {
                self.pending_resize = Some(size);
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.session.is_none() {
            match self.start_session(ctx) {
                Ok(session) => self.session = session,
                Err(e) => {
                    log::error!("{e:#}");
                    return AppControl::Exit;
                }
            }
            // Built at the current size already.
            self.pending_resize = None;
        }
        let Some(Session { backend, renderer }) = self.session.as_mut() else {
            return AppControl::Continue;
        };

        if let Some(size) = self.pending_resize.take() {
            if size != renderer.window_size() {
                if let Err(e) = renderer.resize_window(backend, size) {
                    log::error!("resize failed: {e}");
                    return AppControl::Exit;
                }
            }
        }

        if self.controls.update(ctx.input, ctx.input_frame, renderer.view_controller_mut()) == Outcome::Exit {
            return AppControl::Exit;
        }

        let title = view_title(renderer.view_controller());
        if title != self.title {
            ctx.runtime.set_title(title.clone());
            self.title = title;
        }

        let input = CursorInput {
            pointer: ctx.input.pointer_or_origin(),
            brush: self.controls.brush(),
        };

        ctx.present(|view, format| {
            backend.begin_frame(view, format);
            let result = renderer.render_frame(backend, &input);
            backend.end_frame();
            result.context("render frame failed")
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let canvas_size = config::canvas_size_from_env()?;
    log::info!("canvas {canvas_size}");

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), Studio::new(canvas_size))
}
