//! Settings loading from config.toml
//!
//! Every key is optional. A missing file means all defaults; a file that exists
//! but cannot be read or parsed is an error, as is a value out of range.

use crate::core::metrics::{DEFAULT_OVERDUE_CAP, DEFAULT_TRAINING_DELTA, WEEKLY_WINDOW_DAYS};
use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Tunable settings for the cockpit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Upper bound on overdue days counted into a CAPA's risk score
    pub overdue_cap: u32,
    /// Progress points added per training assignment (1-100)
    pub training_delta: u8,
    /// Length of the test report window in days
    pub pass_rate_window_days: u32,
    /// Seconds between escalation runs; 0 runs once and exits
    pub escalation_interval_secs: u64,
    /// Where to write the HTML report, if anywhere
    pub html_report: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overdue_cap: DEFAULT_OVERDUE_CAP,
            training_delta: DEFAULT_TRAINING_DELTA,
            pass_rate_window_days: u32::try_from(WEEKLY_WINDOW_DAYS).unwrap_or(7),
            escalation_interval_secs: 0,
            html_report: None,
        }
    }
}

impl Settings {
    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `training_delta` is outside 1-100 or the
    /// report window is zero days.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.training_delta) {
            return Err(Error::Config {
                message: format!(
                    "training_delta must be between 1 and 100, got {}",
                    self.training_delta
                ),
            });
        }
        if self.pass_rate_window_days == 0 {
            return Err(Error::Config {
                message: "pass_rate_window_days must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Start of the test report window ending at `now`.
    #[must_use]
    pub fn pass_rate_window(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.pass_rate_window_days))
    }
}

/// Parses and validates settings from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] on invalid TOML, unknown keys or out-of-range values.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Loads settings from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(Settings)` - Parsed settings, or the defaults when the file does not exist
/// * `Err(Error)` - The file exists but could not be read, parsed or validated
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        debug!("No settings file at {:?}, using defaults", path_ref);
        return Ok(Settings::default());
    }

    debug!("Loading settings from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_settings(&contents)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::fixed_now;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.overdue_cap, 7);
        assert_eq!(settings.training_delta, 25);
        assert_eq!(settings.pass_rate_window_days, 7);
        assert_eq!(settings.escalation_interval_secs, 0);
    }

    #[test]
    fn test_parse_all_keys() {
        let toml_str = r#"
            overdue_cap = 5
            training_delta = 10
            pass_rate_window_days = 14
            escalation_interval_secs = 3600
            html_report = "out/report.html"
        "#;
        let settings = parse_settings(toml_str).unwrap();
        assert_eq!(settings.overdue_cap, 5);
        assert_eq!(settings.training_delta, 10);
        assert_eq!(settings.pass_rate_window_days, 14);
        assert_eq!(settings.escalation_interval_secs, 3600);
        assert_eq!(settings.html_report, Some(PathBuf::from("out/report.html")));
    }

    #[test]
    fn test_out_of_range_delta_is_rejected() {
        assert!(matches!(
            parse_settings("training_delta = 0"),
            Err(Error::Config { .. })
        ));
        assert!(parse_settings("training_delta = 101").is_err());
        assert!(parse_settings("training_delta = 100").is_ok());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(parse_settings("overdue_kap = 3").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "overdue_cap = \"seven\"").unwrap();
        assert!(matches!(load_settings(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn test_pass_rate_window() {
        let settings = Settings {
            pass_rate_window_days: 2,
            ..Settings::default()
        };
        assert_eq!(
            settings.pass_rate_window(fixed_now()),
            fixed_now() - Duration::days(2)
        );
    }
}
