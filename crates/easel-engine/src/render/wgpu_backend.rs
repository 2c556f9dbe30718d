//! [`GpuBackend`] implementation on top of wgpu.
//!
//! Draws are recorded into one command encoder per frame, opened by
//! [`WgpuBackend::begin_frame`] and submitted by [`WgpuBackend::end_frame`].
//! Resource creation and reallocation may happen outside a frame.

use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use crate::coords::PixelSize;
use crate::paint::Color;

use super::backend::{
    DrawCall, FramebufferTarget, GeometryHandle, GpuBackend, PixelFormat, ProgramHandle,
    TextureDesc, TextureHandle,
};
use super::ctx::RenderCtx;
use super::error::RenderError;
use super::geometry::{QuadGeometry, QuadVertex};
use super::program::{FRAGMENT_ENTRY, ProgramSource, VERTEX_ENTRY};
use super::uniform::UniformLayout;

impl PixelFormat {
    pub fn to_wgpu(self) -> wgpu::TextureFormat {
        match self {
            PixelFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            PixelFormat::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
        }
    }
}

struct ProgramEntry {
    label: String,
    module: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: Option<wgpu::Buffer>,
    texture_count: usize,

    // Built lazily for the format of the target drawn into.
    pipeline: Option<(wgpu::TextureFormat, wgpu::RenderPipeline)>,
}

struct GeometryEntry {
    vbo: wgpu::Buffer,
    vertex_count: u32,
}

struct TextureEntry {
    label: String,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    format: PixelFormat,
    clear: Color,
}

struct FrameTarget {
    encoder: wgpu::CommandEncoder,
    display: wgpu::TextureView,
    display_format: wgpu::TextureFormat,
}

/// wgpu-backed resource store and per-frame command recorder.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    sampler: wgpu::Sampler,

    programs: Vec<ProgramEntry>,
    geometries: Vec<GeometryEntry>,
    textures: Vec<TextureEntry>,

    frame: Option<FrameTarget>,
}

impl WgpuBackend {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("easel linear sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            sampler,
            programs: Vec::new(),
            geometries: Vec::new(),
            textures: Vec::new(),
            frame: None,
        }
    }

    /// Opens a frame whose `DisplaySurface` is `display`.
    ///
    /// An unfinished previous frame is submitted first.
    pub fn begin_frame(&mut self, display: &wgpu::TextureView, display_format: wgpu::TextureFormat) {
        if self.frame.is_some() {
            log::warn!("begin_frame called with a frame still open; submitting it");
            self.end_frame();
        }

        let encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("easel frame encoder"),
        });
        self.frame = Some(FrameTarget {
            encoder,
            display: display.clone(),
            display_format,
        });
    }

    /// Submits everything recorded since [`begin_frame`](Self::begin_frame).
    pub fn end_frame(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.queue.submit(std::iter::once(frame.encoder.finish()));
        }
    }

    fn texture_entry(&self, handle: TextureHandle) -> Result<&TextureEntry, RenderError> {
        self.textures
            .get(handle.raw() as usize)
            .ok_or(RenderError::UnknownHandle { kind: "texture", id: handle.raw() })
    }

    fn allocate(&self, label: &str, size: PixelSize, format: PixelFormat) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: format.to_wgpu(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    /// Fills a freshly allocated texture with its clear color.
    fn clear_now(&self, view: &wgpu::TextureView, color: Color) {
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("easel texture clear"),
        });
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("easel texture clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

/// Pipeline for `format`, rebuilt when the program is drawn into a target of
/// another format.
fn ensure_pipeline<'p>(
    device: &wgpu::Device,
    slot: &'p mut Option<(wgpu::TextureFormat, wgpu::RenderPipeline)>,
    label: &str,
    layout: &wgpu::PipelineLayout,
    module: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
) -> &'p wgpu::RenderPipeline {
    if slot.as_ref().is_some_and(|(built_for, _)| *built_for != format) {
        log::debug!("program `{label}`: rebuilding pipeline for {format:?}");
        *slot = None;
    }
    let (_, pipeline) = slot.get_or_insert_with(|| (format, create_pipeline(device, label, layout, module, format)));
    pipeline
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    module: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

impl GpuBackend for WgpuBackend {
    fn create_program(
        &mut self,
        source: &ProgramSource<'_>,
        layout: &UniformLayout,
    ) -> Result<ProgramHandle, RenderError> {
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.label),
            source: wgpu::ShaderSource::Wgsl(source.wgsl.into()),
        });

        let buffer_size = layout.buffer_size() as u64;
        let mut entries = Vec::with_capacity(1 + 2 * layout.texture_count());
        if buffer_size > 0 {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(buffer_size),
                },
                count: None,
            });
        }
        for i in 0..layout.texture_count() as u32 {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding: 1 + 2 * i,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            });
            entries.push(wgpu::BindGroupLayoutEntry {
                binding: 2 + 2 * i,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            });
        }

        let bind_group_layout = self.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(source.label),
            entries: &entries,
        });

        let pipeline_layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(source.label),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let uniform_buffer = (buffer_size > 0).then(|| {
            self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(source.label),
                size: buffer_size,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        self.programs.push(ProgramEntry {
            label: source.label.to_string(),
            module,
            bind_group_layout,
            pipeline_layout,
            uniform_buffer,
            texture_count: layout.texture_count(),
            pipeline: None,
        });
        log::debug!("program `{}` created ({} bytes of uniforms)", source.label, buffer_size);
        Ok(ProgramHandle::from_raw(self.programs.len() as u32 - 1))
    }

    fn create_geometry(&mut self, geometry: &QuadGeometry) -> Result<GeometryHandle, RenderError> {
        let vbo = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("easel quad vbo"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        self.geometries.push(GeometryEntry {
            vbo,
            vertex_count: geometry.vertex_count(),
        });
        Ok(GeometryHandle::from_raw(self.geometries.len() as u32 - 1))
    }

    fn create_texture(&mut self, desc: &TextureDesc<'_>) -> Result<TextureHandle, RenderError> {
        let size = PixelSize::new(desc.size.width, desc.size.height)?;
        let (texture, view) = self.allocate(desc.label, size, desc.format);
        self.clear_now(&view, desc.clear);

        self.textures.push(TextureEntry {
            label: desc.label.to_string(),
            texture,
            view,
            format: desc.format,
            clear: desc.clear,
        });
        Ok(TextureHandle::from_raw(self.textures.len() as u32 - 1))
    }

    fn reallocate_texture(&mut self, handle: TextureHandle, size: PixelSize) -> Result<(), RenderError> {
        let size = PixelSize::new(size.width, size.height)?;
        let entry = self.texture_entry(handle)?;
        let (label, format, clear) = (entry.label.clone(), entry.format, entry.clear);

        let (texture, view) = self.allocate(&label, size, format);
        self.clear_now(&view, clear);

        let entry = &mut self.textures[handle.raw() as usize];
        entry.texture.destroy();
        entry.texture = texture;
        entry.view = view;
        Ok(())
    }

    fn draw(&mut self, call: &DrawCall<'_>) -> Result<(), RenderError> {
        // Split borrows: the frame encoder is mutated while resources are read.
        let Self {
            device,
            sampler,
            programs,
            geometries,
            textures,
            frame,
            ..
        } = self;
        let frame = frame.as_mut().ok_or(RenderError::NoActiveFrame)?;

        let lookup = |t: TextureHandle| {
            textures
                .get(t.raw() as usize)
                .ok_or(RenderError::UnknownHandle { kind: "texture", id: t.raw() })
        };

        let (output_view, output_format) = match call.output {
            FramebufferTarget::Offscreen(t) => {
                let entry = lookup(t)?;
                (&entry.view, entry.format.to_wgpu())
            }
            FramebufferTarget::DisplaySurface => (&frame.display, frame.display_format),
        };

        let geometry = geometries
            .get(call.geometry.raw() as usize)
            .ok_or(RenderError::UnknownHandle { kind: "geometry", id: call.geometry.raw() })?;

        let program = programs
            .get_mut(call.program.raw() as usize)
            .ok_or(RenderError::UnknownHandle { kind: "program", id: call.program.raw() })?;
        debug_assert_eq!(call.textures.len(), program.texture_count);

        // Staged through the encoder so each draw reads its own values even
        // when a program is drawn several times per frame.
        if let Some(ubo) = program.uniform_buffer.as_ref() {
            let staging = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("easel uniform staging"),
                contents: call.uniform_bytes,
                usage: wgpu::BufferUsages::COPY_SRC,
            });
            frame
                .encoder
                .copy_buffer_to_buffer(&staging, 0, ubo, 0, call.uniform_bytes.len() as u64);
        }

        let mut bound = Vec::with_capacity(call.textures.len());
        for t in call.textures {
            bound.push(&lookup(*t)?.view);
        }

        let mut entries = Vec::with_capacity(1 + 2 * bound.len());
        if let Some(ubo) = program.uniform_buffer.as_ref() {
            entries.push(wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            });
        }
        for (i, view) in bound.iter().enumerate() {
            let i = i as u32;
            entries.push(wgpu::BindGroupEntry {
                binding: 1 + 2 * i,
                resource: wgpu::BindingResource::TextureView(view),
            });
            entries.push(wgpu::BindGroupEntry {
                binding: 2 + 2 * i,
                resource: wgpu::BindingResource::Sampler(&*sampler),
            });
        }

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(program.label.as_str()),
            layout: &program.bind_group_layout,
            entries: &entries,
        });

        let pipeline = ensure_pipeline(
            device,
            &mut program.pipeline,
            &program.label,
            &program.pipeline_layout,
            &program.module,
            output_format,
        );

        let load = match call.clear {
            Some(c) => wgpu::LoadOp::Clear(c.to_wgpu()),
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(program.label.as_str()),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.set_vertex_buffer(0, geometry.vbo.slice(..));
        rpass.draw(0..geometry.vertex_count, 0..1);
        Ok(())
    }
}
