//! Rendering error types.

use thiserror::Error;

/// Errors that can occur while creating GPU resources for the slice renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// The slice mesh has more vertices than one draw call can address.
    #[error("slice mesh of {0} vertices exceeds a single draw call")]
    MeshTooLarge(usize),

    /// The volume does not fit in a 3D texture on this device.
    #[error("volume {width}x{height}x{depth} exceeds the 3D texture limit of {limit}")]
    TextureTooLarge {
        width: u32,
        height: u32,
        depth: u32,
        limit: u32,
    },
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
