//! Batch capacity configuration.

use serde::{Deserialize, Serialize};

/// Capacity limits for the quad batcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Quads per draw call (valid range: 1-1000000).
    pub max_quads: u32,
    /// Texture units per draw call, including the reserved white texture
    /// (valid range: 2-16).
    pub max_texture_slots: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_quads: 20_000,
            max_texture_slots: 16,
        }
    }
}
