//! Named uniform values and their packing into a uniform buffer.
//!
//! A program declares its uniforms as an ordered list of [`UniformDecl`]s.
//! Non-texture uniforms are packed in declaration order using the WGSL
//! uniform address-space rules, so the shader's uniform struct must declare
//! the same fields in the same order. Textures are bound separately.

use crate::math::Transform2D;
use crate::paint::Color;

use super::backend::TextureHandle;
use super::error::RenderError;

/// Type of a declared uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UniformKind {
    Float,
    Int,
    Vec2,
    Vec4,
    Mat4,
    Texture,
}

impl UniformKind {
    /// `(align, size)` in bytes; `None` for textures.
    fn packing(self) -> Option<(usize, usize)> {
        match self {
            UniformKind::Float | UniformKind::Int => Some((4, 4)),
            UniformKind::Vec2 => Some((8, 8)),
            UniformKind::Vec4 => Some((16, 16)),
            UniformKind::Mat4 => Some((16, 64)),
            UniformKind::Texture => None,
        }
    }
}

/// A value passed to [`RenderTarget::render`](super::RenderTarget::render).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
    Mat4([[f32; 4]; 4]),
    Texture(TextureHandle),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Int(_) => UniformKind::Int,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec4(_) => UniformKind::Vec4,
            UniformValue::Mat4(_) => UniformKind::Mat4,
            UniformValue::Texture(_) => UniformKind::Texture,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        UniformValue::Int(v)
    }
}

/// Booleans are passed to shaders as `0` / `1` integers.
impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        UniformValue::Int(v as i32)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<Color> for UniformValue {
    fn from(c: Color) -> Self {
        UniformValue::Vec4(c.to_array())
    }
}

impl From<Transform2D> for UniformValue {
    fn from(t: Transform2D) -> Self {
        UniformValue::Mat4(t.to_cols_array_f32())
    }
}

impl From<TextureHandle> for UniformValue {
    fn from(t: TextureHandle) -> Self {
        UniformValue::Texture(t)
    }
}

/// Name → value mapping for a single `render` call.
///
/// Setting the same name twice keeps the last value.
#[derive(Debug, Clone, Default)]
pub struct Uniforms<'a> {
    values: Vec<(&'a str, UniformValue)>,
}

impl<'a> Uniforms<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &'a str, value: impl Into<UniformValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &'a str, value: impl Into<UniformValue>) {
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, UniformValue)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Declaration of one shader uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformDecl {
    pub name: &'static str,
    pub kind: UniformKind,
}

impl UniformDecl {
    pub const fn new(name: &'static str, kind: UniformKind) -> Self {
        Self { name, kind }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Slot {
    Buffer { offset: usize },
    Texture { index: usize },
}

#[derive(Debug, Clone)]
struct LayoutEntry {
    decl: UniformDecl,
    slot: Slot,
}

/// Resolved placement of every uniform a program declares.
#[derive(Debug, Clone)]
pub struct UniformLayout {
    program: String,
    entries: Vec<LayoutEntry>,
    buffer_size: usize,
    texture_count: usize,
}

impl UniformLayout {
    pub fn new(program: &str, decls: &[UniformDecl]) -> Result<Self, RenderError> {
        let mut entries: Vec<LayoutEntry> = Vec::with_capacity(decls.len());
        let mut cursor = 0usize;
        let mut texture_count = 0usize;

        for decl in decls {
            if entries.iter().any(|e| e.decl.name == decl.name) {
                return Err(RenderError::DuplicateUniform {
                    program: program.to_string(),
                    name: decl.name.to_string(),
                });
            }

            let slot = match decl.kind.packing() {
                Some((align, size)) => {
                    let offset = cursor.next_multiple_of(align);
                    cursor = offset + size;
                    Slot::Buffer { offset }
                }
                None => {
                    texture_count += 1;
                    Slot::Texture { index: texture_count - 1 }
                }
            };
            entries.push(LayoutEntry { decl: *decl, slot });
        }

        Ok(Self {
            program: program.to_string(),
            entries,
            // Uniform structs are padded to 16 bytes.
            buffer_size: cursor.next_multiple_of(16),
            texture_count,
        })
    }

    #[inline]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Size of the packed uniform buffer; `0` when only textures are declared.
    #[inline]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    #[inline]
    pub fn texture_count(&self) -> usize {
        self.texture_count
    }

    /// Byte offset of a buffer uniform.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        match self.find(name)?.slot {
            Slot::Buffer { offset } => Some(offset),
            Slot::Texture { .. } => None,
        }
    }

    fn find(&self, name: &str) -> Option<&LayoutEntry> {
        self.entries.iter().find(|e| e.decl.name == name)
    }
}

/// CPU-side uniform state of one program.
///
/// Values persist between calls: a uniform not present in a later
/// [`Uniforms`] keeps what it was last set to.
#[derive(Debug, Clone)]
pub struct UniformBlock {
    bytes: Vec<u8>,
    textures: Vec<Option<TextureHandle>>,
}

impl UniformBlock {
    pub fn new(layout: &UniformLayout) -> Self {
        Self {
            bytes: vec![0; layout.buffer_size],
            textures: vec![None; layout.texture_count],
        }
    }

    /// Validates every value against `layout`, then writes them.
    ///
    /// Nothing is written if any name is unknown or any type mismatches.
    pub fn apply(&mut self, layout: &UniformLayout, uniforms: &Uniforms<'_>) -> Result<(), RenderError> {
        let mut resolved = Vec::with_capacity(uniforms.len());
        for (name, value) in uniforms.iter() {
            let entry = layout.find(name).ok_or_else(|| RenderError::UnknownUniform {
                program: layout.program.clone(),
                name: name.to_string(),
            })?;
            if entry.decl.kind != value.kind() {
                return Err(RenderError::UniformType {
                    program: layout.program.clone(),
                    name: name.to_string(),
                    expected: entry.decl.kind,
                    found: value.kind(),
                });
            }
            resolved.push((entry.slot, value));
        }

        for (slot, value) in resolved {
            match (slot, value) {
                (Slot::Texture { index }, UniformValue::Texture(t)) => self.textures[index] = Some(t),
                (Slot::Buffer { offset }, v) => self.write(offset, v),
                (Slot::Texture { .. }, _) => unreachable!("kind checked above"),
            }
        }
        Ok(())
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bound textures in declaration order.
    pub fn bound_textures(&self, layout: &UniformLayout) -> Result<Vec<TextureHandle>, RenderError> {
        let mut names = layout
            .entries
            .iter()
            .filter(|e| matches!(e.slot, Slot::Texture { .. }))
            .map(|e| e.decl.name);

        self.textures
            .iter()
            .map(|t| {
                let name = names.next().unwrap_or_default();
                t.ok_or_else(|| RenderError::UnboundTexture {
                    program: layout.program.clone(),
                    name: name.to_string(),
                })
            })
            .collect()
    }

    fn write(&mut self, offset: usize, value: UniformValue) {
        let src: &[u8] = match &value {
            UniformValue::Float(v) => bytemuck::bytes_of(v),
            UniformValue::Int(v) => bytemuck::bytes_of(v),
            UniformValue::Vec2(v) => bytemuck::bytes_of(v),
            UniformValue::Vec4(v) => bytemuck::bytes_of(v),
            UniformValue::Mat4(v) => bytemuck::bytes_of(v),
            UniformValue::Texture(_) => return,
        };
        self.bytes[offset..offset + src.len()].copy_from_slice(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECLS: &[UniformDecl] = &[
        UniformDecl::new("color", UniformKind::Vec4),
        UniformDecl::new("size", UniformKind::Vec2),
        UniformDecl::new("pos", UniformKind::Vec2),
        UniformDecl::new("alpha", UniformKind::Float),
        UniformDecl::new("tex", UniformKind::Texture),
        UniformDecl::new("flag", UniformKind::Int),
        UniformDecl::new("m", UniformKind::Mat4),
    ];

    fn layout() -> UniformLayout {
        UniformLayout::new("test", DECLS).unwrap()
    }

    fn f32_at(bytes: &[u8], offset: usize) -> f32 {
        f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn offsets_follow_wgsl_alignment() {
        let l = layout();
        assert_eq!(l.offset_of("color"), Some(0));
        assert_eq!(l.offset_of("size"), Some(16));
        assert_eq!(l.offset_of("pos"), Some(24));
        assert_eq!(l.offset_of("alpha"), Some(32));
        assert_eq!(l.offset_of("flag"), Some(36));
        // mat4 realigns to 16.
        assert_eq!(l.offset_of("m"), Some(48));
        assert_eq!(l.offset_of("tex"), None);
        assert_eq!(l.buffer_size(), 112);
        assert_eq!(l.texture_count(), 1);
    }

    #[test]
    fn buffer_size_rounds_up_to_16() {
        let l = UniformLayout::new("t", &[UniformDecl::new("x", UniformKind::Float)]).unwrap();
        assert_eq!(l.buffer_size(), 16);
    }

    #[test]
    fn texture_only_layout_has_no_buffer() {
        let l = UniformLayout::new("t", &[UniformDecl::new("tex", UniformKind::Texture)]).unwrap();
        assert_eq!(l.buffer_size(), 0);
        assert_eq!(l.texture_count(), 1);
    }

    #[test]
    fn duplicate_declaration_is_rejected() {
        let err = UniformLayout::new(
            "dup",
            &[
                UniformDecl::new("x", UniformKind::Float),
                UniformDecl::new("x", UniformKind::Vec2),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::DuplicateUniform { .. }));
    }

    // ── apply ─────────────────────────────────────────────────────────────

    #[test]
    fn values_are_written_at_their_offsets() {
        let l = layout();
        let mut block = UniformBlock::new(&l);
        block
            .apply(
                &l,
                &Uniforms::new()
                    .with("color", [0.1f32, 0.2, 0.3, 0.4])
                    .with("pos", [5.0f32, 6.0])
                    .with("alpha", 0.75f32)
                    .with("flag", true),
            )
            .unwrap();

        let b = block.bytes();
        assert_eq!(f32_at(b, 4), 0.2);
        assert_eq!(f32_at(b, 24), 5.0);
        assert_eq!(f32_at(b, 28), 6.0);
        assert_eq!(f32_at(b, 32), 0.75);
        assert_eq!(i32::from_le_bytes(b[36..40].try_into().unwrap()), 1);
    }

    #[test]
    fn unknown_name_is_a_configuration_error() {
        let l = layout();
        let mut block = UniformBlock::new(&l);
        let err = block
            .apply(&l, &Uniforms::new().with("alpha", 1.0f32).with("colour", [0.0f32; 4]))
            .unwrap_err();
        match err {
            RenderError::UnknownUniform { program, name } => {
                assert_eq!(program, "test");
                assert_eq!(name, "colour");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Nothing was written.
        assert_eq!(f32_at(block.bytes(), 32), 0.0);
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let l = layout();
        let mut block = UniformBlock::new(&l);
        let err = block.apply(&l, &Uniforms::new().with("alpha", [1.0f32, 2.0])).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UniformType { expected: UniformKind::Float, found: UniformKind::Vec2, .. }
        ));
    }

    #[test]
    fn values_persist_across_calls() {
        let l = layout();
        let mut block = UniformBlock::new(&l);
        block.apply(&l, &Uniforms::new().with("alpha", 0.5f32)).unwrap();
        block.apply(&l, &Uniforms::new().with("pos", [1.0f32, 1.0])).unwrap();
        assert_eq!(f32_at(block.bytes(), 32), 0.5);
    }

    #[test]
    fn unbound_texture_is_reported_by_name() {
        let l = layout();
        let block = UniformBlock::new(&l);
        match block.bound_textures(&l).unwrap_err() {
            RenderError::UnboundTexture { name, .. } => assert_eq!(name, "tex"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bound_texture_is_returned() {
        let l = layout();
        let mut block = UniformBlock::new(&l);
        let tex = TextureHandle::from_raw(7);
        block.apply(&l, &Uniforms::new().with("tex", tex)).unwrap();
        assert_eq!(block.bound_textures(&l).unwrap(), vec![tex]);
    }

    #[test]
    fn setting_twice_keeps_last_value() {
        let u = Uniforms::new().with("alpha", 0.1f32).with("alpha", 0.9f32);
        assert_eq!(u.len(), 1);
        assert_eq!(u.get("alpha"), Some(UniformValue::Float(0.9)));
    }
}
