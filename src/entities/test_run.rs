//! Test run entity - one recorded execution of an automated test.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome of a single test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// The test passed
    Passed,
    /// The test failed
    Failed,
}

impl TestStatus {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }
}

impl FromStr for TestStatus {
    type Err = Error;

    /// Accepts the wire values `passed` / `failed`, ignoring case and padding.
    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            other => Err(Error::validation(format!(
                "test status must be 'passed' or 'failed', got '{other}'"
            ))),
        }
    }
}

/// A recorded test execution. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRun {
    /// Implementation language of the code under test (e.g. "COBOL", "Java")
    pub language: String,
    /// Name of the test case
    pub test_name: String,
    /// Pass/fail outcome
    pub status: TestStatus,
    /// When the run finished
    pub timestamp: DateTime<Utc>,
}

impl TestRun {
    /// True when the run passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// Input for recording a test run, as entered by hand. The store stamps the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestRun {
    /// Language of the code under test
    pub language: String,
    /// Test case name
    pub test_name: String,
    /// Raw outcome, `passed` or `failed`
    pub status: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_status_parses_wire_values() {
        assert_eq!("passed".parse::<TestStatus>().unwrap(), TestStatus::Passed);
        assert_eq!(" Failed ".parse::<TestStatus>().unwrap(), TestStatus::Failed);
    }

    #[test]
    fn test_unknown_status_is_validation_error() {
        let err = "skipped".parse::<TestStatus>().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
