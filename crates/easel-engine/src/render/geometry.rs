use bytemuck::{Pod, Zeroable};

use crate::coords::PixelSize;

/// Interleaved quad vertex: position + texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Four vertices drawn as a triangle strip.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadGeometry {
    pub vertices: [QuadVertex; 4],
}

impl QuadGeometry {
    pub fn from_parts(positions: [[f32; 3]; 4], uvs: [[f32; 2]; 4]) -> Self {
        let mut vertices = [QuadVertex::zeroed(); 4];
        for (v, (pos, uv)) in vertices.iter_mut().zip(positions.into_iter().zip(uvs)) {
            *v = QuadVertex { pos, uv };
        }
        Self { vertices }
    }

    /// Canvas-space quad covering `(0, 0)..(width, height)`.
    ///
    /// UV `(0, 0)` is the canvas' top-left texel.
    pub fn canvas(size: PixelSize) -> Self {
        let (w, h) = (size.width as f32, size.height as f32);
        Self::from_parts(
            [[0.0, 0.0, 0.0], [0.0, h, 0.0], [w, 0.0, 0.0], [w, h, 0.0]],
            [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]],
        )
    }

    /// Clip-space quad covering the whole output.
    ///
    /// NDC `y = +1` is the top row, which is texture row `v = 0`.
    pub fn fullscreen() -> Self {
        Self::from_parts(
            [[-1.0, -1.0, 0.0], [-1.0, 1.0, 0.0], [1.0, -1.0, 0.0], [1.0, 1.0, 0.0]],
            [[0.0, 1.0], [0.0, 0.0], [1.0, 1.0], [1.0, 0.0]],
        )
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}
