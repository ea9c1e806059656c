use thiserror::Error;

/// Everything that can go wrong while bringing up or running a demo.
///
/// There is no recovery story: initialization errors abort startup, and a
/// per-frame error freezes the render loop (logged, never re-armed).
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to acquire a frame: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("window creation failed: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
