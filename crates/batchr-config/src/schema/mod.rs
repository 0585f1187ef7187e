//! Configuration schema types for batchr.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod batch;
mod logging;
mod render;

pub use batch::*;
pub use logging::*;
pub use render::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BatchrConfig {
    pub batch: BatchConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: BatchrConfig = toml::from_str("").unwrap();
        assert_eq!(config.batch.max_quads, 20_000);
        assert_eq!(config.batch.max_texture_slots, 16);
        assert_eq!(config.render.width, 1280);
        assert_eq!(config.render.height, 720);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: BatchrConfig = toml::from_str("[batch]\nmax_quads = 64\n").unwrap();
        assert_eq!(config.batch.max_quads, 64);
        assert_eq!(config.batch.max_texture_slots, 16);
    }

    #[test]
    fn log_level_parses_lowercase() {
        let config: BatchrConfig = toml::from_str("[logging]\nlevel = \"trace\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Trace);
        assert_eq!(config.logging.level.as_directive(), "trace");
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let result: Result<BatchrConfig, _> = toml::from_str("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());
    }
}
