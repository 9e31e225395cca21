//! Root-cause analysis entity.

use super::serde_helpers::flexible_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Status written for a freshly started analysis
pub const RCA_STARTED_STATUS: &str = "in progress";

/// A root-cause analysis of one problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootCauseAnalysis {
    /// Unique id, assigned by the store's analysis sequence
    pub id: u64,
    /// The problem being analysed
    pub problem: String,
    /// When the problem occurred
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    /// Responsible team member
    pub responsible: String,
    /// Method, e.g. "Ishikawa" or "5-Why"
    #[serde(rename = "type")]
    pub method: String,
    /// Status as written in the dataset
    pub status: String,
    /// When the analysis was started
    pub created_at: DateTime<Utc>,
    /// Contributing factors found so far
    #[serde(default)]
    pub factors: Vec<String>,
    /// Agreed solution, empty until one is found
    #[serde(default)]
    pub solution: String,
}

/// Input for starting an analysis. The store assigns `id`, `status` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRca {
    /// The problem
    pub problem: String,
    /// When it occurred
    pub date: NaiveDate,
    /// Responsible team member
    pub responsible: String,
    /// Analysis method
    pub method: String,
}
