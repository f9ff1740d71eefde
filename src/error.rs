//! Startup errors
//!
//! Gameplay itself has no failure modes; only acquiring the page elements and
//! the GPU can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("browser window is not available")]
    NoWindow,

    #[error("document is not available")]
    NoDocument,

    #[error("canvas element #{0} not found")]
    NoCanvas(String),

    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
