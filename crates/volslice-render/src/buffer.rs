//! Dynamic vertex buffer for the per-frame slice mesh.

use volslice_core::{OutputMesh, SliceVertex};

use crate::error::{RenderError, RenderResult};

/// Smallest buffer allocated, in vertices.
const MIN_CAPACITY: usize = 1024;

/// Vertex attributes of [`SliceVertex`]: position at location 0, texture
/// coordinate at location 1.
pub const SLICE_VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    // position (vec3)
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    // tex_coord (vec3)
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
];

/// Vertex buffer layout matching [`SliceVertex`].
#[must_use]
pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: SliceVertex::STRIDE as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &SLICE_VERTEX_ATTRIBUTES,
    }
}

/// Capacity to allocate so that `required` vertices fit.
///
/// Grows to the next power of two so a slowly rotating camera does not
/// reallocate every frame; never shrinks.
#[must_use]
pub fn grown_capacity(current: usize, required: usize) -> usize {
    if required <= current {
        current
    } else {
        required.next_power_of_two().max(MIN_CAPACITY)
    }
}

/// GPU copy of the slice mesh, rewritten every frame.
pub struct SliceVertexBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    vertex_count: u32,
}

impl SliceVertexBuffer {
    /// Creates an empty buffer with room for `capacity` vertices.
    #[must_use]
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let capacity = grown_capacity(0, capacity.max(1));
        Self {
            buffer: create_buffer(device, capacity),
            capacity,
            vertex_count: 0,
        }
    }

    /// Uploads this frame's mesh, growing the buffer when it no longer fits.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mesh: &OutputMesh,
    ) -> RenderResult<()> {
        let count = mesh.vertex_count();
        let vertex_count =
            u32::try_from(count).map_err(|_| RenderError::MeshTooLarge(count))?;

        let capacity = grown_capacity(self.capacity, count);
        if capacity != self.capacity {
            log::debug!(
                "growing slice vertex buffer from {} to {} vertices",
                self.capacity,
                capacity
            );
            self.buffer = create_buffer(device, capacity);
            self.capacity = capacity;
        }

        if !mesh.is_empty() {
            queue.write_buffer(&self.buffer, 0, mesh.as_bytes());
        }
        self.vertex_count = vertex_count;
        Ok(())
    }

    /// Issues the triangle-list draw for the last uploaded mesh.
    ///
    /// The caller binds a pipeline using [`vertex_layout`] first.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        let bytes = u64::from(self.vertex_count) * SliceVertex::STRIDE as u64;
        pass.set_vertex_buffer(0, self.buffer.slice(..bytes));
        pass.draw(0..self.vertex_count, 0..1);
    }

    /// Returns the vertex buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of vertices in the last upload.
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Vertices the buffer can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn create_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("slice vertices"),
        size: (capacity * SliceVertex::STRIDE) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
