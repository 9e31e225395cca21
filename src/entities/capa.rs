//! Corrective and preventive action (CAPA) entity.
//!
//! A CAPA is a tracked remediation item. Its status moves along
//! `open -> in_progress -> closed`; its priority can additionally be forced to
//! `high` by the overdue escalation rule without touching the status.

use super::serde_helpers::flexible_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Workflow state of a CAPA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapaStatus {
    /// Raised, nobody working on it yet
    Open,
    /// Being worked on
    InProgress,
    /// Done
    Closed,
}

impl CapaStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    /// Next state in the workflow. `Closed` is terminal.
    #[must_use]
    pub const fn advance(self) -> Self {
        match self {
            Self::Open => Self::InProgress,
            Self::InProgress | Self::Closed => Self::Closed,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In progress",
            Self::Closed => "Closed",
        }
    }
}

/// CAPA priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

impl Priority {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// A corrective action as stored in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectiveAction {
    /// Unique id, assigned by the store's CAPA sequence
    pub id: u64,
    /// Short title
    pub title: String,
    /// Longer description of the problem and the intended fix
    pub description: String,
    /// Workflow state
    pub status: CapaStatus,
    /// Current priority
    pub priority: Priority,
    /// Name of the responsible team member
    pub responsible: String,
    /// Date by which the action must be closed
    #[serde(with = "flexible_date")]
    pub due_date: NaiveDate,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Input for creating a CAPA. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCapa {
    /// Short title
    pub title: String,
    /// Description
    pub description: String,
    /// Initial status
    pub status: CapaStatus,
    /// Initial priority
    pub priority: Priority,
    /// Responsible team member
    pub responsible: String,
    /// Due date
    pub due_date: NaiveDate,
}

/// Partial update of an existing CAPA; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapaUpdate {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New status
    pub status: Option<CapaStatus>,
    /// New priority
    pub priority: Option<Priority>,
    /// New responsible member
    pub responsible: Option<String>,
    /// New due date
    pub due_date: Option<NaiveDate>,
}

impl CapaUpdate {
    /// Applies every present field to `capa`. `id` and `created_at` never change.
    pub fn apply_to(self, capa: &mut CorrectiveAction) {
        if let Some(title) = self.title {
            capa.title = title;
        }
        if let Some(description) = self.description {
            capa.description = description;
        }
        if let Some(status) = self.status {
            capa.status = status;
        }
        if let Some(priority) = self.priority {
            capa.priority = priority;
        }
        if let Some(responsible) = self.responsible {
            capa.responsible = responsible;
        }
        if let Some(due_date) = self.due_date {
            capa.due_date = due_date;
        }
    }
}
