//! Output mesh produced by one slicing pass.

use glam::Vec3;

/// A vertex of the slice mesh: view-space position plus volume texture
/// coordinate.
///
/// The layout is what the GPU vertex buffer expects: two tightly packed
/// `vec3<f32>` attributes, 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SliceVertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 3],
}

impl SliceVertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    #[must_use]
    pub fn new(position: Vec3, tex_coord: Vec3) -> Self {
        Self {
            position: position.to_array(),
            tex_coord: tex_coord.to_array(),
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[must_use]
    pub fn tex_coord(&self) -> Vec3 {
        Vec3::from_array(self.tex_coord)
    }
}

/// Where one slice's triangle fan lives inside the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceSpan {
    /// View-space depth of the slicing plane.
    pub depth: f32,
    /// Index of the first vertex of the fan.
    pub first_vertex: usize,
    /// Number of vertices in the fan (three per triangle).
    pub vertex_count: usize,
    /// Number of polygon corners the fan was built from.
    pub polygon_len: usize,
}

impl SliceSpan {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count / 3
    }
}

/// Triangle-list mesh of all slices for one frame.
///
/// Vertices are grouped in consecutive triples, slices appear in draw order.
/// The buffers are truncated rather than freed between frames.
#[derive(Debug, Clone, Default)]
pub struct OutputMesh {
    vertices: Vec<SliceVertex>,
    spans: Vec<SliceSpan>,
}

impl OutputMesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with room for `vertices` vertices and `slices` slices.
    #[must_use]
    pub fn with_capacity(vertices: usize, slices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            spans: Vec::with_capacity(slices),
        }
    }

    /// Empties the mesh, keeping its allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.spans.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn vertices(&self) -> &[SliceVertex] {
        &self.vertices
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Iterates the triangles in draw order.
    pub fn triangles(&self) -> impl Iterator<Item = [SliceVertex; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    #[must_use]
    pub fn spans(&self) -> &[SliceSpan] {
        &self.spans
    }

    #[must_use]
    pub fn slice_count(&self) -> usize {
        self.spans.len()
    }

    /// Returns the fan vertices belonging to `span`.
    ///
    /// # Panics
    ///
    /// Panics if `span` does not come from this mesh's [`spans`] and reaches
    /// past the end of the vertices.
    ///
    /// [`spans`]: OutputMesh::spans
    #[must_use]
    pub fn slice_vertices(&self, span: &SliceSpan) -> &[SliceVertex] {
        &self.vertices[span.first_vertex..span.first_vertex + span.vertex_count]
    }

    /// Raw bytes of the vertex data, ready for a vertex buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Total capacity currently reserved for vertices.
    #[must_use]
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.capacity()
    }

    /// Appends the fan `(polygon[i], polygon[i + 1], centroid)` for a closed
    /// polygon and records its span.
    pub(crate) fn push_fan(&mut self, depth: f32, polygon: &[SliceVertex], centroid: SliceVertex) {
        let first_vertex = self.vertices.len();
        let n = polygon.len();
        for (i, &vertex) in polygon.iter().enumerate() {
            self.vertices.push(vertex);
            self.vertices.push(polygon[(i + 1) % n]);
            self.vertices.push(centroid);
        }
        self.spans.push(SliceSpan {
            depth,
            first_vertex,
            vertex_count: 3 * n,
            polygon_len: n,
        });
    }
}
