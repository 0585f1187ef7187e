//! batchr configuration system.
//!
//! TOML-based configuration for the batch renderer and the `batchr`
//! binary. Every section uses serde defaults so partial configs work
//! out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use batchr_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{BatchConfig, BatchrConfig, LogLevel, LoggingConfig, RenderConfig};
pub use toml_loader::{load_default, load_from_path};

use batchr_common::ConfigError;

/// Load config from the platform default path and validate it strictly.
///
/// Creates a default file if none exists.
pub fn load_config() -> Result<BatchrConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BatchrConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = BatchrConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"batch\""));
        assert!(json.contains("\"render\""));
        assert!(json.contains("\"logging\""));
        assert!(json.contains("\"max_quads\": 20000"));
        assert!(json.contains("\"max_texture_slots\": 16"));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = BatchrConfig::default();
        let json = config_to_json(&config);
        let parsed: BatchrConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.batch.max_quads, 20_000);
        assert_eq!(parsed.render.clear_color, "#1e1e2e");
        assert_eq!(parsed.logging.level, LogLevel::Info);
    }
}
