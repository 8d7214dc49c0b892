//! GPU-side collaborators of the volslice pipeline.
//!
//! This crate provides:
//! - the orbit [`Camera`] that supplies the view matrix each frame
//! - the vertex layout and dynamic vertex buffer the slice mesh is drawn from
//! - upload of the raw voxel data as a 3D texture

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod buffer;
pub mod camera;
pub mod device;
pub mod error;
pub mod volume_texture;

pub use buffer::{grown_capacity, vertex_layout, SliceVertexBuffer, SLICE_VERTEX_ATTRIBUTES};
pub use camera::{Camera, CameraCommand};
pub use device::request_headless_device;
pub use error::{RenderError, RenderResult};
pub use volume_texture::VolumeTexture;
