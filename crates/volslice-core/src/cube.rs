//! Fixed bounding-cube geometry that gets sliced every frame.
//!
//! The volume occupies the unit cube centred at the origin. Each corner
//! carries a texture coordinate locating it in the volume texture, and the
//! twelve wireframe edges are what the slicing planes are intersected with.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Number of cube corners.
pub const CORNER_COUNT: usize = 8;

/// Number of cube edges.
pub const EDGE_COUNT: usize = 12;

/// Object-space corners of the unit cube.
///
/// Bit layout of the index: x is set for 2, 3, 6, 7; y for 1, 3, 5, 7;
/// z for 4..8.
pub const CUBE_POSITIONS: [Vec3; CORNER_COUNT] = [
    Vec3::new(-0.5, -0.5, -0.5), // left bottom back
    Vec3::new(-0.5, 0.5, -0.5),  // left top back
    Vec3::new(0.5, -0.5, -0.5),  // right bottom back
    Vec3::new(0.5, 0.5, -0.5),   // right top back
    Vec3::new(-0.5, -0.5, 0.5),  // left bottom front
    Vec3::new(-0.5, 0.5, 0.5),   // left top front
    Vec3::new(0.5, -0.5, 0.5),   // right bottom front
    Vec3::new(0.5, 0.5, 0.5),    // right top front
];

/// An unordered pair of corner indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// The twelve wireframe edges of the cube.
pub const CUBE_EDGES: [Edge; EDGE_COUNT] = [
    // back face
    Edge::new(0, 1),
    Edge::new(2, 3),
    Edge::new(0, 2),
    Edge::new(1, 3),
    // front face
    Edge::new(4, 5),
    Edge::new(6, 7),
    Edge::new(4, 6),
    Edge::new(5, 7),
    // back to front
    Edge::new(0, 4),
    Edge::new(1, 5),
    Edge::new(2, 6),
    Edge::new(3, 7),
];

/// Range the corner texture coordinates are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TexCoordConvention {
    /// Corners map to [-1, 1]³.
    Signed,
    /// Corners map to [0, 1]³, the range texture samplers address.
    #[default]
    Normalized,
}

impl TexCoordConvention {
    /// Returns the texture coordinate of an object-space cube corner.
    #[must_use]
    pub fn tex_coord(self, position: Vec3) -> Vec3 {
        match self {
            TexCoordConvention::Signed => position * 2.0,
            TexCoordConvention::Normalized => position + Vec3::splat(0.5),
        }
    }
}

/// A cube corner with its location in the volume texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeVertex {
    pub position: Vec3,
    pub tex_coord: Vec3,
}

/// Corner and edge tables of the bounding cube.
///
/// Built once and handed to the slicer by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeGeometry {
    corners: [CubeVertex; CORNER_COUNT],
    edges: [Edge; EDGE_COUNT],
    convention: TexCoordConvention,
}

impl CubeGeometry {
    /// Creates the unit cube with texture coordinates in the given convention.
    #[must_use]
    pub fn new(convention: TexCoordConvention) -> Self {
        let corners = CUBE_POSITIONS.map(|position| CubeVertex {
            position,
            tex_coord: convention.tex_coord(position),
        });
        Self {
            corners,
            edges: CUBE_EDGES,
            convention,
        }
    }

    /// The unit cube with normalized texture coordinates.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(TexCoordConvention::Normalized)
    }

    #[must_use]
    pub fn corners(&self) -> &[CubeVertex; CORNER_COUNT] {
        &self.corners
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge; EDGE_COUNT] {
        &self.edges
    }

    #[must_use]
    pub fn convention(&self) -> TexCoordConvention {
        self.convention
    }

    /// Returns the two corners joined by edge `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= EDGE_COUNT`.
    #[must_use]
    pub fn edge_endpoints(&self, index: usize) -> (CubeVertex, CubeVertex) {
        let edge = self.edges[index];
        (self.corners[edge.a], self.corners[edge.b])
    }
}

impl Default for CubeGeometry {
    fn default() -> Self {
        Self::unit()
    }
}
