//! In-memory `GpuBackend` that records every call, for tests.

use crate::coords::PixelSize;
use crate::paint::Color;

use super::backend::{
    DrawCall, FramebufferTarget, GeometryHandle, GpuBackend, PixelFormat, ProgramHandle,
    TextureDesc, TextureHandle,
};
use super::error::RenderError;
use super::geometry::QuadGeometry;
use super::program::ProgramSource;
use super::uniform::UniformLayout;

#[derive(Debug, Clone)]
pub(crate) struct RecordedTexture {
    pub label: String,
    pub size: PixelSize,
    pub format: PixelFormat,
    pub clear: Color,
    pub reallocations: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedDraw {
    pub program: ProgramHandle,
    pub output: FramebufferTarget,
    pub clear: Option<Color>,
    pub uniform_bytes: Vec<u8>,
    pub textures: Vec<TextureHandle>,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub programs: Vec<UniformLayout>,
    pub geometries: Vec<QuadGeometry>,
    pub textures: Vec<RecordedTexture>,
    pub draws: Vec<RecordedDraw>,
}

impl RecordingBackend {
    pub fn program_label(&self, program: ProgramHandle) -> &str {
        self.programs[program.raw() as usize].program()
    }

    pub fn texture(&self, handle: TextureHandle) -> &RecordedTexture {
        &self.textures[handle.raw() as usize]
    }

    /// Reads a float-typed uniform (or one lane of a vector) from a recorded draw.
    pub fn read_f32(&self, draw: &RecordedDraw, name: &str, lane: usize) -> f32 {
        let layout = &self.programs[draw.program.raw() as usize];
        let offset = layout.offset_of(name).expect("buffer uniform") + lane * 4;
        f32::from_le_bytes(draw.uniform_bytes[offset..offset + 4].try_into().unwrap())
    }

    pub fn read_i32(&self, draw: &RecordedDraw, name: &str) -> i32 {
        let layout = &self.programs[draw.program.raw() as usize];
        let offset = layout.offset_of(name).expect("buffer uniform");
        i32::from_le_bytes(draw.uniform_bytes[offset..offset + 4].try_into().unwrap())
    }

    fn check_texture(&self, handle: TextureHandle) -> Result<(), RenderError> {
        if (handle.raw() as usize) < self.textures.len() {
            Ok(())
        } else {
            Err(RenderError::UnknownHandle { kind: "texture", id: handle.raw() })
        }
    }
}

impl GpuBackend for RecordingBackend {
    fn create_program(
        &mut self,
        _source: &ProgramSource<'_>,
        layout: &UniformLayout,
    ) -> Result<ProgramHandle, RenderError> {
        self.programs.push(layout.clone());
        Ok(ProgramHandle::from_raw(self.programs.len() as u32 - 1))
    }

    fn create_geometry(&mut self, geometry: &QuadGeometry) -> Result<GeometryHandle, RenderError> {
        self.geometries.push(*geometry);
        Ok(GeometryHandle::from_raw(self.geometries.len() as u32 - 1))
    }

    fn create_texture(&mut self, desc: &TextureDesc<'_>) -> Result<TextureHandle, RenderError> {
        self.textures.push(RecordedTexture {
            label: desc.label.to_string(),
            size: desc.size,
            format: desc.format,
            clear: desc.clear,
            reallocations: 0,
        });
        Ok(TextureHandle::from_raw(self.textures.len() as u32 - 1))
    }

    fn reallocate_texture(&mut self, texture: TextureHandle, size: PixelSize) -> Result<(), RenderError> {
        self.check_texture(texture)?;
        let t = &mut self.textures[texture.raw() as usize];
        t.size = size;
        t.reallocations += 1;
        Ok(())
    }

    fn draw(&mut self, call: &DrawCall<'_>) -> Result<(), RenderError> {
        let layout = self
            .programs
            .get(call.program.raw() as usize)
            .ok_or(RenderError::UnknownHandle { kind: "program", id: call.program.raw() })?;
        assert_eq!(call.uniform_bytes.len(), layout.buffer_size());
        assert_eq!(call.textures.len(), layout.texture_count());

        if call.geometry.raw() as usize >= self.geometries.len() {
            return Err(RenderError::UnknownHandle { kind: "geometry", id: call.geometry.raw() });
        }
        for t in call.textures {
            self.check_texture(*t)?;
        }
        if let FramebufferTarget::Offscreen(t) = call.output {
            self.check_texture(t)?;
        }

        self.draws.push(RecordedDraw {
            program: call.program,
            output: call.output,
            clear: call.clear,
            uniform_bytes: call.uniform_bytes.to_vec(),
            textures: call.textures.to_vec(),
        });
        Ok(())
    }
}
