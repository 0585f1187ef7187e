//! Reading `BatchrConfig` from disk.

use std::io::ErrorKind;
use std::path::Path;

use batchr_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::BatchrConfig;
use crate::validation;

/// Read and parse the TOML file at `path`.
///
/// Absent keys fall back to their defaults. Out-of-range values are
/// reported with `warn!` but do not fail the load; callers that need a
/// usable config run [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<BatchrConfig, ConfigError> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "{} is unreadable: {e}",
                path.display()
            )));
        }
    };

    let config = parse(&source, path)?;
    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e} (in {})", path.display());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load `batchr/config.toml` under the platform config directory, writing
/// the commented template there first if it is missing.
pub fn load_default() -> Result<BatchrConfig, ConfigError> {
    let path = default_config_path()?;
    load_from_path(&path).or_else(|e| match e {
        ConfigError::FileNotFound(_) => {
            info!("no config at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(BatchrConfig::default())
        }
        other => Err(other),
    })
}

fn parse(source: &str, path: &Path) -> Result<BatchrConfig, ConfigError> {
    toml::from_str(source)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))
}
