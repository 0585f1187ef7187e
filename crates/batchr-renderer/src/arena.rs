//! Vertex arena and the static quad index template.

use bytemuck::Zeroable;
use glam::{Mat4, Vec4};

/// Vertices written per quad.
pub const VERTICES_PER_QUAD: usize = 4;

/// Indices consumed per quad (two triangles).
pub const INDICES_PER_QUAD: u32 = 6;

/// Texture coordinates of the four corners, in append order.
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Unit quad centred on the origin, in the same corner order as [`QUAD_UVS`].
pub const UNIT_QUAD: [Vec4; 4] = [
    Vec4::new(-0.5, -0.5, 0.0, 1.0),
    Vec4::new(0.5, -0.5, 0.0, 1.0),
    Vec4::new(0.5, 0.5, 0.0, 1.0),
    Vec4::new(-0.5, 0.5, 0.0, 1.0),
];

/// One corner of a quad as uploaded to the GPU.
///
/// Layout: 10 × 4 bytes = 40 bytes, no padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Post-transform position.
    pub position: [f32; 3],
    /// RGBA color, each component 0.0..=1.0.
    pub color: [f32; 4],
    pub uv: [f32; 2],
    /// Texture unit sampled by this quad. 0 is the reserved white texture.
    pub texture_slot: u32,
}

impl Vertex {
    /// Build the four corners of `transform` applied to the unit quad.
    pub fn quad(transform: &Mat4, color: [f32; 4], texture_slot: u32) -> [Vertex; 4] {
        std::array::from_fn(|i| Vertex {
            position: (*transform * UNIT_QUAD[i]).truncate().to_array(),
            color,
            uv: QUAD_UVS[i],
            texture_slot,
        })
    }
}

/// The index pattern for `max_quads` quads: `{4i, 4i+1, 4i+2, 4i+2, 4i+3, 4i}`.
///
/// Content-independent; built once and uploaded once.
pub fn quad_indices(max_quads: u32) -> Vec<u32> {
    (0..max_quads)
        .flat_map(|quad| {
            let base = quad * VERTICES_PER_QUAD as u32;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect()
}

/// Fixed-capacity vertex storage reused for every batch.
///
/// Capacity is never checked here: the batch renderer flushes before an
/// append could run past the end.
pub struct QuadArena {
    vertices: Box<[Vertex]>,
    cursor: usize,
}

impl QuadArena {
    pub fn new(max_quads: u32) -> Self {
        Self {
            vertices: vec![Vertex::zeroed(); max_quads as usize * VERTICES_PER_QUAD]
                .into_boxed_slice(),
            cursor: 0,
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn append(&mut self, quad: [Vertex; 4]) {
        let end = self.cursor + VERTICES_PER_QUAD;
        self.vertices[self.cursor..end].copy_from_slice(&quad);
        self.cursor = end;
    }

    /// Vertices written since the last reset.
    pub fn written(&self) -> &[Vertex] {
        &self.vertices[..self.cursor]
    }

    /// The written range as raw bytes, ready for upload.
    pub fn written_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.written())
    }

    pub fn vertex_count(&self) -> usize {
        self.cursor
    }

    pub fn quad_count(&self) -> usize {
        self.cursor / VERTICES_PER_QUAD
    }

    pub fn capacity_quads(&self) -> usize {
        self.vertices.len() / VERTICES_PER_QUAD
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }
}
