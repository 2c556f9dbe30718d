/// An acquired swapchain image.
///
/// Holding it blocks acquisition of the next one; hand it back through
/// [`Gpu::present`](super::Gpu::present) once its commands are submitted.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}
