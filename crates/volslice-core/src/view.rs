//! View transform stage: moves the cube corners into view space and finds
//! the depth range the slicing planes must cover.

use glam::{Mat4, Vec3};

use crate::cube::{CubeGeometry, CORNER_COUNT};

/// The eight cube corners after applying the view matrix.
///
/// Recomputed every frame and never retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSpaceCube {
    positions: [Vec3; CORNER_COUNT],
    min_index: usize,
    max_index: usize,
}

impl ViewSpaceCube {
    /// Transforms the cube corners by `view`.
    ///
    /// The matrix is expected to be affine, so w is taken as 1 and no
    /// perspective divide happens. Ties for the nearest/farthest corner
    /// resolve to the lowest index.
    #[must_use]
    pub fn transform(geometry: &CubeGeometry, view: Mat4) -> Self {
        let positions = geometry
            .corners()
            .map(|corner| view.transform_point3(corner.position));

        let mut min_index = 0;
        let mut max_index = 0;
        for (i, p) in positions.iter().enumerate() {
            if p.z < positions[min_index].z {
                min_index = i;
            }
            if p.z > positions[max_index].z {
                max_index = i;
            }
        }

        Self {
            positions,
            min_index,
            max_index,
        }
    }

    #[must_use]
    pub fn positions(&self) -> &[Vec3; CORNER_COUNT] {
        &self.positions
    }

    /// Index of the corner with the smallest view-space z.
    #[must_use]
    pub fn min_index(&self) -> usize {
        self.min_index
    }

    /// Index of the corner with the largest view-space z.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.max_index
    }

    #[must_use]
    pub fn min_depth(&self) -> f32 {
        self.positions[self.min_index].z
    }

    #[must_use]
    pub fn max_depth(&self) -> f32 {
        self.positions[self.max_index].z
    }

    /// Distance between the farthest and nearest corner along the view axis.
    #[must_use]
    pub fn depth_extent(&self) -> f32 {
        self.max_depth() - self.min_depth()
    }
}
