//! Audit entity with its ordered list of findings.

use super::serde_helpers::flexible_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Audit lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// Scheduled, not started
    Planned,
    /// Running
    InProgress,
    /// Finished
    Completed,
}

impl AuditStatus {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

/// One finding raised during an audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// What was found
    pub description: String,
    /// Severity as entered by the auditor (e.g. "minor", "major", "critical")
    pub severity: String,
    /// When the finding was recorded
    pub created_at: DateTime<Utc>,
}

/// An internal or external audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    /// Unique id, assigned by the store's audit sequence
    pub id: u64,
    /// Title
    pub title: String,
    /// Audit type (e.g. "internal", "external", "process")
    #[serde(rename = "type")]
    pub audit_type: String,
    /// Scheduled date
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    /// Lead auditor
    pub responsible: String,
    /// What the audit covers
    #[serde(default)]
    pub scope: String,
    /// Findings in the order they were recorded
    #[serde(default)]
    pub findings: Vec<Finding>,
    /// Lifecycle state
    pub status: AuditStatus,
}

/// Input for scheduling an audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAudit {
    /// Title
    pub title: String,
    /// Audit type
    pub audit_type: String,
    /// Scheduled date
    pub date: NaiveDate,
    /// Lead auditor
    pub responsible: String,
    /// Scope
    pub scope: String,
}

/// Input for recording a finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFinding {
    /// What was found
    pub description: String,
    /// Severity
    pub severity: String,
}
