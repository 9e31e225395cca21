//! Training assignment and test plan entities.

use super::serde_helpers::flexible_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Status written for freshly assigned trainings
pub const PLANNED_TRAINING_STATUS: &str = "planned";

/// A training scheduled for a team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingAssignment {
    /// Member name
    pub member: String,
    /// Training topic
    pub topic: String,
    /// First day
    #[serde(with = "flexible_date")]
    pub start: NaiveDate,
    /// Last day
    #[serde(with = "flexible_date")]
    pub end: NaiveDate,
    /// Whether the training ends with a certification
    #[serde(default)]
    pub certification: bool,
    /// Whether the member finished it
    #[serde(default)]
    pub completed: bool,
    /// Free-text status
    #[serde(default = "planned_status")]
    pub status: String,
}

fn planned_status() -> String {
    PLANNED_TRAINING_STATUS.to_string()
}

/// Input for assigning a training
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingRequest {
    /// Training topic
    pub topic: String,
    /// First day
    pub start: NaiveDate,
    /// Last day
    pub end: NaiveDate,
    /// Whether it ends with a certification
    pub certification: bool,
}

/// A recurring test plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPlan {
    /// Unique id, assigned by the store's test plan sequence
    pub id: u64,
    /// Kind of testing (e.g. "regression", "load")
    #[serde(rename = "type")]
    pub plan_type: String,
    /// How often it runs
    pub frequency: String,
    /// Owner
    pub responsible: String,
    /// What it covers
    #[serde(default)]
    pub scope: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Input for creating a test plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestPlan {
    /// Kind of testing
    pub plan_type: String,
    /// How often it runs
    pub frequency: String,
    /// Owner
    pub responsible: String,
    /// What it covers
    pub scope: String,
}
