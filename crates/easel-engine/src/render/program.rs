//! Shader program sources and validation.

use super::error::RenderError;
use super::uniform::{UniformDecl, UniformKind};

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// WGSL source plus the uniform contract the caller will use with it.
#[derive(Debug, Copy, Clone)]
pub struct ProgramSource<'a> {
    pub label: &'a str,
    pub wgsl: &'a str,
    pub uniforms: &'a [UniformDecl],
}

impl ProgramSource<'_> {
    /// Parses and validates the WGSL and checks both entry points exist.
    ///
    /// Run before handing the source to a backend so a broken shader is a
    /// returned error rather than a device-level failure.
    pub fn validate(&self) -> Result<naga::Module, RenderError> {
        let module = naga::front::wgsl::parse_str(self.wgsl).map_err(|e| {
            RenderError::ShaderCompile {
                program: self.label.to_string(),
                message: e.emit_to_string(self.wgsl),
            }
        })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .map_err(|e| RenderError::ShaderCompile {
            program: self.label.to_string(),
            message: e.as_inner().to_string(),
        })?;

        for (entry, stage) in [
            (VERTEX_ENTRY, naga::ShaderStage::Vertex),
            (FRAGMENT_ENTRY, naga::ShaderStage::Fragment),
        ] {
            let found = module
                .entry_points
                .iter()
                .any(|ep| ep.name == entry && ep.stage == stage);
            if !found {
                return Err(RenderError::MissingEntryPoint {
                    program: self.label.to_string(),
                    entry,
                });
            }
        }

        Ok(module)
    }
}

/// Canvas → view surface program.
pub mod view {
    use super::*;

    pub const TRANSFORM: &str = "transform";
    pub const BASE_TEXTURE: &str = "base_texture";

    pub const UNIFORMS: &[UniformDecl] = &[
        UniformDecl::new(TRANSFORM, UniformKind::Mat4),
        UniformDecl::new(BASE_TEXTURE, UniformKind::Texture),
    ];

    pub const SOURCE: ProgramSource<'static> = ProgramSource {
        label: "easel view",
        wgsl: include_str!("shaders/view.wgsl"),
        uniforms: UNIFORMS,
    };
}

/// View surface → display program with the brush cursor overlay.
pub mod screen {
    use super::*;

    pub const BRUSH_COLOR: &str = "brush_color";
    pub const WINDOW_SIZE: &str = "window_size";
    pub const POINTER: &str = "pointer";
    pub const OPACITY: &str = "opacity";
    pub const DIAMETER: &str = "diameter";
    pub const SOFTNESS: &str = "softness";
    pub const SHOW_COLOR: &str = "show_color";
    pub const BASE_TEXTURE: &str = "base_texture";

    // Order matches `ScreenUniforms` in screen.wgsl.
    pub const UNIFORMS: &[UniformDecl] = &[
        UniformDecl::new(BRUSH_COLOR, UniformKind::Vec4),
        UniformDecl::new(WINDOW_SIZE, UniformKind::Vec2),
        UniformDecl::new(POINTER, UniformKind::Vec2),
        UniformDecl::new(OPACITY, UniformKind::Float),
        UniformDecl::new(DIAMETER, UniformKind::Float),
        UniformDecl::new(SOFTNESS, UniformKind::Float),
        UniformDecl::new(SHOW_COLOR, UniformKind::Int),
        UniformDecl::new(BASE_TEXTURE, UniformKind::Texture),
    ];

    pub const SOURCE: ProgramSource<'static> = ProgramSource {
        label: "easel screen",
        wgsl: include_str!("shaders/screen.wgsl"),
        uniforms: UNIFORMS,
    };
}
