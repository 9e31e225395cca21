//! Team member entity. Members are keyed by name.
//!
//! The status is free text and is written back exactly as it was read.
//! Only "active" (in any case) and the German "Aktiv" count as active.

use serde::{Deserialize, Serialize};

/// English spelling of the active status
pub const ACTIVE_STATUS: &str = "active";

/// A quality team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique name
    pub name: String,
    /// Area of responsibility
    #[serde(default)]
    pub responsibility: String,
    /// Status as written in the dataset (e.g. "Aktiv", "Urlaub", "active")
    pub status: String,
    /// Training progress in percent, 0-100
    pub training_progress: u8,
}

impl TeamMember {
    /// True when the status reads as active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        is_active_status(&self.status)
    }
}

/// True for "active" or "Aktiv", ignoring case and padding.
fn is_active_status(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.eq_ignore_ascii_case(ACTIVE_STATUS) || trimmed.eq_ignore_ascii_case("aktiv")
}

/// Partial update of a member; the name is the key and cannot change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberUpdate {
    /// New responsibility
    pub responsibility: Option<String>,
    /// New status, stored verbatim
    pub status: Option<String>,
    /// New progress (clamped to 100)
    pub training_progress: Option<u8>,
}

impl MemberUpdate {
    /// Applies every present field to `member`.
    pub fn apply_to(self, member: &mut TeamMember) {
        if let Some(responsibility) = self.responsibility {
            member.responsibility = responsibility;
        }
        if let Some(status) = self.status {
            member.status = status;
        }
        if let Some(progress) = self.training_progress {
            member.training_progress = progress.min(100);
        }
    }
}
