/// Dataset and settings file locations from environment variables
pub mod paths;

/// Tunable settings loaded from config.toml
pub mod settings;
