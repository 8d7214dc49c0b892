//! Per-frame entry point: view matrix in, slice mesh out.

use glam::Mat4;

use crate::cube::CubeGeometry;
use crate::mesh::OutputMesh;
use crate::slicer::{SliceBuilder, SliceSettings, SliceStats};
use crate::view::ViewSpaceCube;

/// Everything one slicing pass reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Current camera view matrix.
    pub view: Mat4,
    pub settings: SliceSettings,
}

impl FrameContext {
    #[must_use]
    pub fn new(view: Mat4, settings: SliceSettings) -> Self {
        Self { view, settings }
    }
}

/// Owns the cube tables and the reusable buffers of the slicing pipeline.
///
/// Each call to [`VolumeSlicer::slice`] rebuilds the mesh from scratch in the
/// same allocation.
#[derive(Debug, Clone, Default)]
pub struct VolumeSlicer {
    geometry: CubeGeometry,
    builder: SliceBuilder,
    mesh: OutputMesh,
    last_stats: SliceStats,
}

impl VolumeSlicer {
    #[must_use]
    pub fn new(geometry: CubeGeometry) -> Self {
        Self {
            geometry,
            builder: SliceBuilder::new(),
            mesh: OutputMesh::new(),
            last_stats: SliceStats::default(),
        }
    }

    #[must_use]
    pub fn geometry(&self) -> &CubeGeometry {
        &self.geometry
    }

    /// Runs the view transform and slice builder for one frame.
    pub fn slice(&mut self, frame: &FrameContext) -> &OutputMesh {
        let cube = ViewSpaceCube::transform(&self.geometry, frame.view);
        self.last_stats = self
            .builder
            .build(&self.geometry, &cube, &frame.settings, &mut self.mesh);
        &self.mesh
    }

    /// Mesh from the most recent frame.
    #[must_use]
    pub fn mesh(&self) -> &OutputMesh {
        &self.mesh
    }

    /// Counters from the most recent frame.
    #[must_use]
    pub fn last_stats(&self) -> SliceStats {
        self.last_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::TexCoordConvention;
    use glam::Vec3;

    #[test]
    fn test_slice_frame() {
        let mut slicer = VolumeSlicer::default();
        let frame = FrameContext::new(Mat4::IDENTITY, SliceSettings::with_step(0.25));
        let mesh = slicer.slice(&frame);
        assert_eq!(mesh.triangle_count(), 16);
        assert_eq!(slicer.last_stats().slices, 4);
    }

    #[test]
    fn test_signed_tex_coords() {
        let mut slicer = VolumeSlicer::new(CubeGeometry::new(TexCoordConvention::Signed));
        let frame = FrameContext::new(Mat4::IDENTITY, SliceSettings::with_step(0.25));
        let mesh = slicer.slice(&frame);
        for v in mesh.vertices() {
            assert!(v.tex_coord().abs().max_element() <= 1.0);
        }
        // Depth -0.5 maps to texture w = -1.
        assert_eq!(mesh.vertices()[0].tex_coord[2], -1.0);
    }

    #[test]
    fn test_frames_do_not_accumulate() {
        let mut slicer = VolumeSlicer::default();
        let settings = SliceSettings::with_step(0.1);
        let rotated = FrameContext::new(Mat4::from_rotation_y(0.5), settings);
        let flat = FrameContext::new(Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0)), settings);

        assert!(!slicer.slice(&rotated).is_empty());
        assert!(slicer.slice(&flat).is_empty());
        assert_eq!(slicer.last_stats().planes, 0);
    }
}
