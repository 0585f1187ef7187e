//! Full configuration validation.
//!
//! Validates numeric ranges and color formats. Each section has its own
//! check; this orchestrator runs them all and collects the errors into a
//! single `ConfigError`.

mod batch;
mod helpers;
mod render;


use crate::schema::BatchrConfig;
use batchr_common::ConfigError;

pub use batch::{MAX_QUADS_LIMIT, MAX_TEXTURE_SLOTS_LIMIT};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BatchrConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    batch::validate_batch(&mut errors, config);
    render::validate_render(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
