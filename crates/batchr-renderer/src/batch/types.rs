use batchr_config::BatchConfig;
use glam::{Mat4, Quat, Vec2, Vec3};

use crate::arena::INDICES_PER_QUAD;
use crate::gpu::RendererError;
use crate::{MAX_QUADS, MAX_TEXTURE_SLOTS};

/// Capacity of a single batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLimits {
    /// Quads per draw call.
    pub max_quads: u32,
    /// Texture units per draw call, including the reserved white texture.
    pub max_texture_slots: u32,
}

impl BatchLimits {
    pub fn max_indices(&self) -> u32 {
        self.max_quads * INDICES_PER_QUAD
    }

    pub(crate) fn check(&self) -> Result<(), RendererError> {
        if !(1..=MAX_QUADS).contains(&self.max_quads) {
            return Err(RendererError::InvalidLimits(format!(
                "max_quads = {} is out of range [1, {MAX_QUADS}]",
                self.max_quads
            )));
        }
        if !(2..=MAX_TEXTURE_SLOTS).contains(&self.max_texture_slots) {
            return Err(RendererError::InvalidLimits(format!(
                "max_texture_slots = {} is out of range [2, {MAX_TEXTURE_SLOTS}]",
                self.max_texture_slots
            )));
        }
        Ok(())
    }
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_quads: 20_000,
            max_texture_slots: MAX_TEXTURE_SLOTS,
        }
    }
}

impl From<&BatchConfig> for BatchLimits {
    fn from(config: &BatchConfig) -> Self {
        Self {
            max_quads: config.max_quads,
            max_texture_slots: config.max_texture_slots,
        }
    }
}

/// Counters for the frame opened by the last `begin`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Draw calls issued.
    pub draw_calls: u32,
    /// Quads submitted.
    pub quads: u32,
    /// Batch breaks caused by a full vertex arena.
    pub arena_flushes: u32,
    /// Batch breaks caused by a full texture slot table.
    pub slot_flushes: u32,
}

impl BatchStats {
    pub fn vertices(&self) -> u32 {
        self.quads * 4
    }

    pub fn indices(&self) -> u32 {
        self.quads * INDICES_PER_QUAD
    }
}

/// Transform mapping the unit quad onto a `size` rectangle centred at
/// `position`, rotated by `rotation` radians about Z.
pub fn quad_transform(position: Vec3, size: Vec2, rotation: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        size.extend(1.0),
        Quat::from_rotation_z(rotation),
        position,
    )
}
