//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::BatchrConfig;
use batchr_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_batchr_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[batch]
max_quads = 512

[render]
clear_color = "#ff0000"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.batch.max_quads, 512);
    assert_eq!(config.render.clear_color, "#ff0000");
    // Defaults preserved
    assert_eq!(config.batch.max_texture_slots, 16);
    assert_eq!(config.render.width, 1280);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_still_returns_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[batch]\nmax_texture_slots = 64\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.batch.max_texture_slots, 64);
}

#[test]
fn create_default_config_writes_loadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    let defaults = BatchrConfig::default();
    assert_eq!(config.batch.max_quads, defaults.batch.max_quads);
    assert_eq!(config.render.clear_color, defaults.render.clear_color);
}

#[test]
fn default_config_path_ends_with_batchr_config() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("batchr/config.toml"));
    }
}

#[test]
fn load_directory_reports_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_path(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(ref msg) if msg.contains("unreadable")));
}

#[test]
fn parse_error_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[batch]\nmax_quads = \"many\"\n").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}
