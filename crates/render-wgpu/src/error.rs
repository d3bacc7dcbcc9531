/// Errors from GPU setup and frame submission.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(
        "no compatible GPU adapter found; this viewer needs WebGPU, WebGL2, \
         Vulkan, Metal or DirectX 12"
    )]
    NoAdapter,
    #[error("cannot create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("cannot create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
