//! Test environment entity. Environments are keyed by name.
//!
//! The status is kept exactly as written in the dataset; [`Environment::state`]
//! classifies it for badges and charts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status written when an environment is reserved
pub const IN_USE_STATUS: &str = "in use";

/// Known environment states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentState {
    /// Free to reserve
    Available,
    /// Reserved by someone
    InUse,
    /// Down for maintenance
    Maintenance,
}

impl EnvironmentState {
    /// All states in display order.
    pub const ALL: [Self; 3] = [Self::Available, Self::InUse, Self::Maintenance];

    /// Classifies a raw status; German and English spellings are accepted.
    #[must_use]
    pub fn from_status(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "verfügbar" | "available" => Some(Self::Available),
            "in benutzung" | "in use" | "in_use" => Some(Self::InUse),
            "wartung" | "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InUse => "In use",
            Self::Maintenance => "Maintenance",
        }
    }
}

/// A shared test environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique name
    pub name: String,
    /// Status as written in the dataset
    pub status: String,
    /// Deployed version
    #[serde(default)]
    pub version: String,
    /// Who currently uses it
    #[serde(default)]
    pub user: Option<String>,
    /// Last status change
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    /// End of the current reservation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_until: Option<DateTime<Utc>>,
}

impl Environment {
    /// Known state of this environment, `None` for an unrecognised status.
    #[must_use]
    pub fn state(&self) -> Option<EnvironmentState> {
        EnvironmentState::from_status(&self.status)
    }
}

/// Input for reserving an environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Who reserves it
    pub user: String,
    /// Reservation length in hours, at least 1
    pub hours: u32,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_state_accepts_german_and_english() {
        assert_eq!(
            EnvironmentState::from_status("verfügbar"),
            Some(EnvironmentState::Available)
        );
        assert_eq!(
            EnvironmentState::from_status("In Benutzung"),
            Some(EnvironmentState::InUse)
        );
        assert_eq!(
            EnvironmentState::from_status("maintenance"),
            Some(EnvironmentState::Maintenance)
        );
        assert_eq!(EnvironmentState::from_status("retired"), None);
    }

    #[test]
    fn test_status_string_survives_round_trip() {
        let json = r#"{"name": "QA-2", "status": "in Benutzung", "version": "2.5.0",
            "user": "Anna", "last_updated": "2024-06-15T07:00:00Z"}"#;
        let env: Environment = serde_json::from_str(json).unwrap();
        assert_eq!(env.state(), Some(EnvironmentState::InUse));

        let written = serde_json::to_string(&env).unwrap();
        assert!(written.contains("\"status\":\"in Benutzung\""));
        assert!(!written.contains("reserved_until"));
    }

    #[test]
    fn test_only_name_and_status_are_required() {
        let env: Environment =
            serde_json::from_str(r#"{"name": "QA-1", "status": "available"}"#).unwrap();
        assert_eq!(env.version, "");
        assert_eq!(env.user, None);
        assert_eq!(env.last_updated, None);
    }
}
