use batchr_common::Color;
use glam::{Mat4, Vec2, Vec3};
use tracing::{debug, info, trace};

use super::types::{quad_transform, BatchLimits, BatchStats};
use crate::arena::{quad_indices, QuadArena, Vertex, INDICES_PER_QUAD};
use crate::backend::RenderBackend;
use crate::camera::Camera;
use crate::gpu::RendererError;
use crate::slots::TextureSlotTable;
use crate::texture::{Texture, TextureId};

/// Single opaque white texel backing slot 0.
const WHITE_TEXEL: [u8; 4] = [0xff; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchState {
    Idle,
    BatchOpen,
}

/// Batches quad submissions into indexed draw calls on a [`RenderBackend`].
///
/// Usage per frame is `begin` → any number of `draw_*` calls → `end`.
/// Quads are drawn in submission order. A batch is flushed early only when
/// the next quad would overflow the vertex arena or needs a texture slot
/// that is no longer available.
///
/// Calling `draw_*` or `begin` out of order is a programmer error caught by
/// debug assertions.
pub struct BatchRenderer<B: RenderBackend> {
    backend: B,
    limits: BatchLimits,
    arena: QuadArena,
    slots: TextureSlotTable,
    white_texture: Texture,
    index_count: u32,
    state: BatchState,
    stats: BatchStats,
}

impl<B: RenderBackend> BatchRenderer<B> {
    /// Allocate the arena and slot table, upload the index template and
    /// create the reserved white texture.
    pub fn init(mut backend: B, limits: BatchLimits) -> Result<Self, RendererError> {
        limits.check()?;

        backend.upload_indices(&quad_indices(limits.max_quads));

        let white_texture = backend.create_texture(1, 1, &WHITE_TEXEL)?;

        let samplers: Vec<i32> = (0..limits.max_texture_slots as i32).collect();
        backend.set_sampler_slots(&samplers);

        info!(
            max_quads = limits.max_quads,
            max_texture_slots = limits.max_texture_slots,
            arena_bytes = limits.max_quads as usize * 4 * std::mem::size_of::<Vertex>(),
            "batch renderer initialized"
        );

        Ok(Self {
            backend,
            limits,
            arena: QuadArena::new(limits.max_quads),
            slots: TextureSlotTable::new(white_texture.id(), limits.max_texture_slots),
            white_texture,
            index_count: 0,
            state: BatchState::Idle,
            stats: BatchStats::default(),
        })
    }

    /// Release the white texture and hand the backend back.
    pub fn shutdown(mut self) -> B {
        debug_assert_eq!(
            self.state,
            BatchState::Idle,
            "shutdown called while a batch is open"
        );
        self.backend.destroy_texture(self.white_texture.id());
        info!("batch renderer shut down");
        self.backend
    }

    /// Open a frame using `camera`'s view-projection.
    pub fn begin<C: Camera + ?Sized>(&mut self, camera: &C) {
        debug_assert_eq!(
            self.state,
            BatchState::Idle,
            "begin called while a batch is open"
        );

        self.backend.begin_frame();
        self.backend.set_view_projection(camera.view_projection());
        self.stats = BatchStats::default();
        self.start_batch();
        self.state = BatchState::BatchOpen;
    }

    /// Flush whatever is pending and close the frame.
    ///
    /// Calling `end` again without a `begin` issues no further draw calls.
    pub fn end(&mut self) {
        if self.state == BatchState::Idle {
            trace!("end called with no open batch");
            return;
        }

        self.flush();
        self.start_batch();
        self.state = BatchState::Idle;
        self.backend.end_frame();

        debug!(
            draw_calls = self.stats.draw_calls,
            quads = self.stats.quads,
            arena_flushes = self.stats.arena_flushes,
            slot_flushes = self.stats.slot_flushes,
            "frame complete"
        );
    }

    /// Untextured quad: `transform` applied to the unit quad, filled with
    /// `color`.
    pub fn draw_quad(&mut self, transform: &Mat4, color: Color) {
        self.debug_assert_open();
        self.reserve_quad();
        self.push_quad(transform, color, 0);
    }

    /// Textured quad tinted by `color`. Pass [`Color::WHITE`] for no tint.
    pub fn draw_textured_quad(&mut self, transform: &Mat4, texture: &Texture, color: Color) {
        self.debug_assert_open();
        self.reserve_quad();
        let slot = self.resolve_slot(texture.id());
        self.push_quad(transform, color, slot);
    }

    /// Axis-aligned colored rectangle centred at `position`.
    pub fn draw_rect(&mut self, position: Vec3, size: Vec2, color: Color) {
        self.draw_quad(&quad_transform(position, size, 0.0), color);
    }

    /// Untinted sprite centred at `position`, rotated by `rotation` radians.
    pub fn draw_sprite(&mut self, position: Vec3, size: Vec2, rotation: f32, texture: &Texture) {
        self.draw_textured_quad(
            &quad_transform(position, size, rotation),
            texture,
            Color::WHITE,
        );
    }

    pub fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Texture, RendererError> {
        self.backend.create_texture(width, height, rgba)
    }

    pub fn create_texture_from_image(
        &mut self,
        image: &image::RgbaImage,
    ) -> Result<Texture, RendererError> {
        self.backend
            .create_texture(image.width(), image.height(), image.as_raw())
    }

    pub fn destroy_texture(&mut self, texture: Texture) {
        debug_assert_ne!(
            texture.id(),
            self.white_texture.id(),
            "the reserved white texture is owned by the renderer"
        );
        self.backend.destroy_texture(texture.id());
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.set_viewport(width, height);
    }

    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    pub fn limits(&self) -> BatchLimits {
        self.limits
    }

    pub fn white_texture(&self) -> Texture {
        self.white_texture
    }

    /// Indices accumulated in the current batch.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn is_batch_open(&self) -> bool {
        self.state == BatchState::BatchOpen
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn start_batch(&mut self) {
        self.index_count = 0;
        self.arena.reset();
        self.slots.reset();
    }

    fn next_batch(&mut self) {
        self.flush();
        self.start_batch();
    }

    /// Upload the arena, bind the slot table and issue one draw call.
    fn flush(&mut self) {
        if self.index_count == 0 {
            return;
        }

        self.backend.upload_vertices(self.arena.written_bytes());
        self.slots.bind_all(&mut self.backend);
        self.backend.draw_indexed(self.index_count);
        self.stats.draw_calls += 1;

        trace!(
            index_count = self.index_count,
            slots = self.slots.len(),
            "flushed batch"
        );
    }

    /// Start a new batch if one more quad would not fit in the arena.
    fn reserve_quad(&mut self) {
        if self.index_count + INDICES_PER_QUAD > self.limits.max_indices() {
            debug!(quads = self.arena.quad_count(), "vertex arena full, breaking batch");
            self.stats.arena_flushes += 1;
            self.next_batch();
        }
    }

    fn resolve_slot(&mut self, texture: TextureId) -> u32 {
        loop {
            if let Some(slot) = self.slots.resolve_or_reserve(texture) {
                return slot;
            }
            // A fresh table always has room, so this runs at most once.
            debug!(
                %texture,
                capacity = self.slots.capacity(),
                "texture slots full, breaking batch"
            );
            self.stats.slot_flushes += 1;
            self.next_batch();
        }
    }

    fn push_quad(&mut self, transform: &Mat4, color: Color, slot: u32) {
        self.arena
            .append(Vertex::quad(transform, color.to_array(), slot));
        self.index_count += INDICES_PER_QUAD;
        self.stats.quads += 1;
    }

    fn debug_assert_open(&self) {
        debug_assert_eq!(
            self.state,
            BatchState::BatchOpen,
            "draw called outside begin/end"
        );
    }
}
