//! volslice: view-aligned slice-based volume rendering geometry.
//!
//! A volume is drawn as a stack of semi-transparent polygons perpendicular
//! to the view direction. Each frame the unit cube that bounds the volume is
//! cut by evenly spaced planes; the resulting polygons carry 3D texture
//! coordinates into the voxel data and are fanned into a triangle list.
//!
//! # Quick Start
//!
//! ```no_run
//! use volslice::*;
//!
//! fn main() -> Result<()> {
//!     init();
//!
//!     let mut scene = VolumeScene::new(Options::default())?;
//!     scene.apply(CameraCommand::RotateLeft);
//!
//!     let mesh = scene.frame();
//!     println!("{} triangles", mesh.triangle_count());
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! - `volslice-core`: cube tables, slicing pipeline, raw volumes, options
//! - `volslice-render`: camera, vertex buffer and 3D texture upload

mod scene;

pub use scene::VolumeScene;

// Re-export core types
pub use volslice_core::{
    slice_depths, AnglePivot, CubeGeometry, CubeVertex, Edge, FrameContext, Mat4, Options,
    OutputMesh, RawVolume, Result, SliceBuilder, SliceOrder, SliceSettings, SliceSpan, SliceStats,
    SliceVertex, TexCoordConvention, Vec2, Vec3, Vec4, ViewSpaceCube, VolsliceError, VolumeDims,
    VolumeSlicer, VolumeSource, Winding, CUBE_EDGES, CUBE_POSITIONS, DEFAULT_SLICE_STEP,
    MAX_SLICE_PLANES, MIN_SLICE_STEP,
};

// Re-export render types
pub use volslice_render::{
    request_headless_device, vertex_layout, Camera, CameraCommand, RenderError,
    RenderResult, SliceVertexBuffer, VolumeTexture,
};

/// Installs the `env_logger` backend for the `log` macros.
///
/// Calling it more than once is harmless.
pub fn init() {
    let _ = env_logger::try_init();
    log::info!("volslice initialized");
}
