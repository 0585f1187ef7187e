//! Render target configuration.

use serde::{Deserialize, Serialize};

/// Offscreen target size and clear color.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// `#rrggbb` or `#rrggbbaa`.
    pub clear_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            clear_color: "#1e1e2e".into(),
        }
    }
}
