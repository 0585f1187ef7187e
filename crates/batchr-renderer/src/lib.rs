//! 2D batched quad renderer.
//!
//! Accumulates transformed, optionally textured quads into a fixed vertex
//! arena and emits one indexed draw call per batch. A batch is broken only
//! when the arena or the texture slot table would overflow.

pub mod arena;
pub mod backend;
pub mod batch;
pub mod camera;
pub mod gpu;
pub mod slots;
pub mod texture;
pub mod wgpu_backend;

pub use arena::{quad_indices, QuadArena, Vertex};
pub use backend::{BackendCall, DrawRecord, RecordingBackend, RenderBackend};
pub use batch::{quad_transform, BatchLimits, BatchRenderer, BatchStats};
pub use camera::{Camera, OrthographicCamera2D};
pub use gpu::{GpuContext, PhysicalSize, RendererError};
pub use slots::TextureSlotTable;
pub use texture::{Texture, TextureId};
pub use wgpu_backend::WgpuBackend;

/// Texture units the batch shader declares. Upper bound for
/// [`BatchLimits::max_texture_slots`].
pub const MAX_TEXTURE_SLOTS: u32 = batchr_config::validation::MAX_TEXTURE_SLOTS_LIMIT;

/// Upper bound for [`BatchLimits::max_quads`], shared with config validation.
pub const MAX_QUADS: u32 = batchr_config::validation::MAX_QUADS_LIMIT;
