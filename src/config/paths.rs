//! File locations for the dataset and the settings file.
//!
//! Both can be overridden through the environment (or a `.env` file loaded
//! with `dotenvy` before these are read).

use std::path::PathBuf;

/// Environment variable naming the dataset JSON file
pub const DATASET_PATH_VAR: &str = "QUALITY_DATASET_PATH";

/// Environment variable naming the settings TOML file
pub const CONFIG_PATH_VAR: &str = "QUALITY_CONFIG_PATH";

/// Dataset location used when [`DATASET_PATH_VAR`] is unset
pub const DEFAULT_DATASET_PATH: &str = "data/data.json";

/// Settings location used when [`CONFIG_PATH_VAR`] is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Gets the dataset path from the environment or returns the default.
#[must_use]
pub fn dataset_path() -> PathBuf {
    resolve(std::env::var(DATASET_PATH_VAR).ok(), DEFAULT_DATASET_PATH)
}

/// Gets the settings file path from the environment or returns the default.
#[must_use]
pub fn config_path() -> PathBuf {
    resolve(std::env::var(CONFIG_PATH_VAR).ok(), DEFAULT_CONFIG_PATH)
}

/// Picks `value` unless it is missing or blank.
fn resolve(value: Option<String>, default: &str) -> PathBuf {
    value
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| PathBuf::from(default), PathBuf::from)
}
