use super::uniform::UniformKind;

/// Configuration errors raised while building or driving the render passes.
///
/// None of these are recoverable inside the core: a broken shader, uniform
/// contract or surface size cannot produce meaningful partial output, so they
/// propagate to the caller at startup, resize or on the first bad frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid surface size {width}x{height}: both dimensions must be non-zero")]
    InvalidSize { width: u32, height: u32 },

    #[error("shader `{program}` failed to compile:\n{message}")]
    ShaderCompile { program: String, message: String },

    #[error("shader `{program}` has no `{entry}` entry point")]
    MissingEntryPoint { program: String, entry: &'static str },

    #[error("uniform `{name}` is declared twice in program `{program}`")]
    DuplicateUniform { program: String, name: String },

    #[error("program `{program}` has no uniform named `{name}`")]
    UnknownUniform { program: String, name: String },

    #[error("uniform `{name}` of program `{program}` expects {expected:?}, got {found:?}")]
    UniformType {
        program: String,
        name: String,
        expected: UniformKind,
        found: UniformKind,
    },

    #[error("texture uniform `{name}` of program `{program}` was never bound")]
    UnboundTexture { program: String, name: String },

    #[error("unknown {kind} handle {id}")]
    UnknownHandle { kind: &'static str, id: u32 },

    #[error("no active frame: draws must happen between begin_frame and end_frame")]
    NoActiveFrame,
}
