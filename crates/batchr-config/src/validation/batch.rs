//! Batch capacity validation.

use crate::schema::BatchrConfig;

use super::helpers::validate_range;

/// Upper bound on quads per draw call. Keeps `4 * max_quads` vertices and
/// `6 * max_quads` indices well inside `u32`.
pub const MAX_QUADS_LIMIT: u32 = 1_000_000;

/// Texture units the batch shader declares.
pub const MAX_TEXTURE_SLOTS_LIMIT: u32 = 16;

pub(crate) fn validate_batch(errors: &mut Vec<String>, config: &BatchrConfig) {
    validate_range(
        errors,
        "batch.max_quads",
        config.batch.max_quads,
        1,
        MAX_QUADS_LIMIT,
    );
    // Slot 0 is the white texture, so at least one more is needed.
    validate_range(
        errors,
        "batch.max_texture_slots",
        config.batch.max_texture_slots,
        2,
        MAX_TEXTURE_SLOTS_LIMIT,
    );
}
