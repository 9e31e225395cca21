//! KPI snapshot entity - one daily sample of build and code-quality figures.

use super::serde_helpers::number_or_string;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily KPI sample. Datasets list snapshots newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    /// Build success rate in percent
    pub build_success: f64,
    /// Test coverage in percent
    pub test_coverage: f64,
    /// Defects per 1000 lines
    #[serde(with = "number_or_string")]
    pub defect_density: f64,
    /// Maintainability index in percent
    pub maintainability: f64,
    /// Sample time
    pub timestamp: DateTime<Utc>,
}
