//! The seam between the batcher and whatever actually talks to the GPU.

mod recording;

pub use recording::{BackendCall, DrawRecord, RecordingBackend};

use glam::Mat4;

use crate::gpu::RendererError;
use crate::texture::{Texture, TextureId};

/// Rendering backend consumed by [`BatchRenderer`](crate::BatchRenderer).
///
/// Only texture creation can fail. Every other call is fire-and-forget: a
/// backend that hits a driver error logs it and carries on, so failures
/// never unwind through the batcher.
pub trait RenderBackend {
    /// Upload an RGBA8 image and return a handle with a fresh identity.
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Texture, RendererError>;

    fn destroy_texture(&mut self, texture: TextureId);

    /// One-time upload of the static quad index template.
    fn upload_indices(&mut self, indices: &[u32]);

    /// One-time assignment of sampler units `0..n` to the shader's
    /// texture array.
    fn set_sampler_slots(&mut self, slots: &[i32]);

    /// Called once per frame, before any draw.
    fn set_view_projection(&mut self, view_projection: Mat4);

    fn set_viewport(&mut self, width: u32, height: u32);

    /// Replace the vertex buffer contents with the written arena range.
    fn upload_vertices(&mut self, bytes: &[u8]);

    fn bind_texture(&mut self, texture: TextureId, unit: u32);

    /// Draw the first `index_count` entries of the index template.
    fn draw_indexed(&mut self, index_count: u32);

    fn begin_frame(&mut self) {}

    fn end_frame(&mut self) {}
}
