//! In-memory backend that records every call instead of rendering.

use std::collections::HashSet;

use glam::Mat4;
use tracing::warn;

use crate::arena::Vertex;
use crate::gpu::RendererError;
use crate::texture::{Texture, TextureId};

use super::RenderBackend;

/// A single call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateTexture {
        texture: TextureId,
        width: u32,
        height: u32,
    },
    DestroyTexture(TextureId),
    UploadIndices(usize),
    SetSamplerSlots(Vec<i32>),
    SetViewProjection(Mat4),
    SetViewport {
        width: u32,
        height: u32,
    },
    UploadVertices(usize),
    BindTexture {
        texture: TextureId,
        unit: u32,
    },
    DrawIndexed(u32),
    BeginFrame,
    EndFrame,
}

/// What one draw call would have rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub index_count: u32,
    /// Vertices uploaded before the draw. Empty when capture is off.
    pub vertices: Vec<Vertex>,
    /// `(unit, texture)` pairs bound before the draw.
    pub bound: Vec<(u32, TextureId)>,
}

impl DrawRecord {
    pub fn quad_count(&self) -> u32 {
        self.index_count / 6
    }

    /// Texture bound to `unit` for this draw.
    pub fn texture_at(&self, unit: u32) -> Option<TextureId> {
        self.bound
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|(_, texture)| *texture)
    }
}

/// Records every backend call and a decoded snapshot of each draw.
///
/// Used by tests and by the binary's dry-run mode; needs no GPU.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    draws: Vec<DrawRecord>,
    indices: Vec<u32>,
    sampler_slots: Vec<i32>,
    view_projection: Option<Mat4>,
    pending_vertices: Vec<Vertex>,
    pending_bound: Vec<(u32, TextureId)>,
    live_textures: HashSet<TextureId>,
    next_texture: u64,
    summary_only: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that keeps draw snapshots without vertex data and records
    /// only `DrawIndexed` calls.
    pub fn without_vertex_capture() -> Self {
        Self {
            summary_only: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn sampler_slots(&self) -> &[i32] {
        &self.sampler_slots
    }

    pub fn view_projection(&self) -> Option<Mat4> {
        self.view_projection
    }

    pub fn live_textures(&self) -> usize {
        self.live_textures.len()
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    /// Forget recorded calls and draws. Textures and the index template stay.
    pub fn clear(&mut self) {
        self.calls.clear();
        self.draws.clear();
    }

    fn record(&mut self, call: BackendCall) {
        if !self.summary_only || matches!(call, BackendCall::DrawIndexed(_)) {
            self.calls.push(call);
        }
    }
}

impl RenderBackend for RecordingBackend {
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Texture, RendererError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(RendererError::TextureError(format!(
                "{width}x{height} texture needs {expected} bytes, got {}",
                rgba.len()
            )));
        }

        let id = TextureId::new(self.next_texture);
        self.next_texture += 1;
        self.live_textures.insert(id);
        self.record(BackendCall::CreateTexture {
            texture: id,
            width,
            height,
        });
        Ok(Texture::new(id, width, height))
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        if !self.live_textures.remove(&texture) {
            warn!("destroy of unknown texture {texture}");
        }
        self.record(BackendCall::DestroyTexture(texture));
    }

    fn upload_indices(&mut self, indices: &[u32]) {
        self.indices = indices.to_vec();
        self.record(BackendCall::UploadIndices(indices.len()));
    }

    fn set_sampler_slots(&mut self, slots: &[i32]) {
        self.sampler_slots = slots.to_vec();
        self.record(BackendCall::SetSamplerSlots(slots.to_vec()));
    }

    fn set_view_projection(&mut self, view_projection: Mat4) {
        self.view_projection = Some(view_projection);
        self.record(BackendCall::SetViewProjection(view_projection));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.record(BackendCall::SetViewport { width, height });
    }

    fn upload_vertices(&mut self, bytes: &[u8]) {
        if !self.summary_only {
            self.pending_vertices = bytemuck::pod_collect_to_vec(bytes);
        }
        self.record(BackendCall::UploadVertices(bytes.len()));
    }

    fn bind_texture(&mut self, texture: TextureId, unit: u32) {
        if !self.live_textures.contains(&texture) {
            warn!("bind of unknown texture {texture} to unit {unit}");
        }
        self.pending_bound.push((unit, texture));
        self.record(BackendCall::BindTexture { texture, unit });
    }

    fn draw_indexed(&mut self, index_count: u32) {
        if index_count as usize > self.indices.len() {
            warn!(
                "draw of {index_count} indices exceeds the {}-entry template",
                self.indices.len()
            );
        }
        self.draws.push(DrawRecord {
            index_count,
            vertices: std::mem::take(&mut self.pending_vertices),
            bound: std::mem::take(&mut self.pending_bound),
        });
        self.record(BackendCall::DrawIndexed(index_count));
    }

    fn begin_frame(&mut self) {
        self.record(BackendCall::BeginFrame);
    }

    fn end_frame(&mut self) {
        self.record(BackendCall::EndFrame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_ids_are_unique() {
        let mut backend = RecordingBackend::new();
        let a = backend.create_texture(1, 1, &[255; 4]).unwrap();
        let b = backend.create_texture(1, 1, &[255; 4]).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(backend.live_textures(), 2);
    }

    #[test]
    fn create_texture_rejects_wrong_size() {
        let mut backend = RecordingBackend::new();
        let err = backend.create_texture(2, 2, &[0; 4]).unwrap_err();
        assert!(err.to_string().contains("needs 16 bytes"));
    }

    #[test]
    fn destroy_texture_releases_it() {
        let mut backend = RecordingBackend::new();
        let t = backend.create_texture(1, 1, &[0; 4]).unwrap();
        backend.destroy_texture(t.id());
        assert_eq!(backend.live_textures(), 0);
    }

    #[test]
    fn draw_snapshots_uploaded_vertices_and_bindings() {
        let mut backend = RecordingBackend::new();
        let t = backend.create_texture(1, 1, &[0; 4]).unwrap();
        let vertices = [Vertex {
            position: [1.0, 2.0, 3.0],
            color: [1.0; 4],
            uv: [0.0, 1.0],
            texture_slot: 1,
        }; 4];

        backend.upload_vertices(bytemuck::cast_slice(&vertices));
        backend.bind_texture(t.id(), 1);
        backend.draw_indexed(6);

        let draw = &backend.draws()[0];
        assert_eq!(draw.index_count, 6);
        assert_eq!(draw.quad_count(), 1);
        assert_eq!(draw.vertices, vertices.to_vec());
        assert_eq!(draw.texture_at(1), Some(t.id()));
        assert_eq!(draw.texture_at(0), None);
    }

    #[test]
    fn pending_state_does_not_leak_into_next_draw() {
        let mut backend = RecordingBackend::new();
        let t = backend.create_texture(1, 1, &[0; 4]).unwrap();
        backend.bind_texture(t.id(), 0);
        backend.draw_indexed(6);
        backend.draw_indexed(6);
        assert!(backend.draws()[1].bound.is_empty());
        assert!(backend.draws()[1].vertices.is_empty());
    }

    #[test]
    fn without_capture_keeps_only_draw_calls() {
        let mut backend = RecordingBackend::without_vertex_capture();
        backend.upload_indices(&[0, 1, 2, 2, 3, 0]);
        backend.upload_vertices(&[0u8; 160]);
        backend.draw_indexed(6);
        assert_eq!(backend.calls(), &[BackendCall::DrawIndexed(6)]);
        assert!(backend.draws()[0].vertices.is_empty());
        assert_eq!(backend.indices().len(), 6);
    }
}
