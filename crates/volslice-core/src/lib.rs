//! Core of volslice: the CPU side of a view-aligned slice-based volume renderer.
//!
//! Every frame the unit bounding cube of the volume is moved into view space
//! and cut by a stack of planes perpendicular to the view axis. Each cut is a
//! convex polygon whose corners carry interpolated 3D texture coordinates;
//! the polygons are fanned into triangles and collected in an [`OutputMesh`]
//! ready for a single triangle-list draw.
//!
//! - [`cube`]: fixed corner/edge tables
//! - [`view`]: view transform stage and depth range
//! - [`slicer`]: edge intersection, angular ordering, fan triangulation
//! - [`frame`]: the per-frame [`VolumeSlicer`] entry point
//! - [`volume`]: raw voxel data
//! - [`options`]: serializable configuration

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod cube;
pub mod error;
pub mod frame;
pub mod mesh;
pub mod options;
pub mod slicer;
pub mod view;
pub mod volume;

pub use cube::{CubeGeometry, CubeVertex, Edge, TexCoordConvention, CUBE_EDGES, CUBE_POSITIONS};
pub use error::{Result, VolsliceError};
pub use frame::{FrameContext, VolumeSlicer};
pub use mesh::{OutputMesh, SliceSpan, SliceVertex};
pub use options::{Options, VolumeSource};
pub use slicer::{
    slice_depths, AnglePivot, SliceBuilder, SliceOrder, SliceSettings, SliceStats, Winding,
    DEFAULT_SLICE_STEP, MAX_SLICE_PLANES, MIN_SLICE_STEP,
};
pub use view::ViewSpaceCube;
pub use volume::{RawVolume, VolumeDims};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
