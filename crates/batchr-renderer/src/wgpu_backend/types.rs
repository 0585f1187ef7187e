use std::mem::{offset_of, size_of};

use crate::arena::Vertex;

/// Offscreen color target format. Texture uploads use the same format.
pub(crate) const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Texture copies to buffers must pad each row to this many bytes.
pub(crate) const COPY_ROW_ALIGNMENT: u32 = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

/// Uniform buffer for the camera.
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub(crate) struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view_projection: glam::Mat4) -> Self {
        Self {
            view_projection: view_projection.to_cols_array_2d(),
        }
    }
}

pub(crate) const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 4] = [
    // position: vec3<f32>
    wgpu::VertexAttribute {
        offset: offset_of!(Vertex, position) as u64,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    },
    // color: vec4<f32>
    wgpu::VertexAttribute {
        offset: offset_of!(Vertex, color) as u64,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x4,
    },
    // uv: vec2<f32>
    wgpu::VertexAttribute {
        offset: offset_of!(Vertex, uv) as u64,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32x2,
    },
    // texture_slot: u32
    wgpu::VertexAttribute {
        offset: offset_of!(Vertex, texture_slot) as u64,
        shader_location: 3,
        format: wgpu::VertexFormat::Uint32,
    },
];

/// Bytes per row of a `width`-pixel RGBA8 image once padded for a
/// texture-to-buffer copy.
pub(crate) fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    unpadded.div_ceil(COPY_ROW_ALIGNMENT) * COPY_ROW_ALIGNMENT
}

pub(crate) fn vertex_buffer_size(max_quads: u64) -> u64 {
    max_quads * 4 * size_of::<Vertex>() as u64
}
