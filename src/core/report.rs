//! Report generation business logic.
//!
//! This module builds the dashboard key figures and the weekly test report.
//! All functions are framework-agnostic and return structured data that the
//! caller formats.

use crate::core::metrics::{
    TestOutcomes, active_member_count, average_training_progress, open_capa_count, pass_rate,
    test_outcomes,
};
use crate::core::table::Tone;
use crate::entities::{CorrectiveAction, TeamMember, TestRun};
use chrono::{DateTime, Utc};
use std::fmt;

/// Key figures shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Number of team members
    pub total_members: usize,
    /// Members with status active
    pub active_members: usize,
    /// Mean training progress in percent
    pub average_training: u8,
    /// Pass rate over all test runs, rounded to whole percent
    pub test_pass_rate: u8,
    /// CAPAs that are not closed
    pub open_capas: usize,
}

/// Builds the dashboard key figures from the live collections.
#[must_use]
pub fn dashboard_summary(
    members: &[TeamMember],
    tests: &[TestRun],
    capas: &[CorrectiveAction],
) -> DashboardSummary {
    DashboardSummary {
        total_members: members.len(),
        active_members: active_member_count(members),
        average_training: average_training_progress(members),
        test_pass_rate: rounded_percent(pass_rate(tests, None)),
        open_capas: open_capa_count(capas),
    }
}

// Cast safety: the rate is clamped to [0, 100] before rounding.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded_percent(rate: f64) -> u8 {
    rate.clamp(0.0, 100.0).round() as u8
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Team members:       {}", self.total_members)?;
        writeln!(f, "Active members:     {}", self.active_members)?;
        writeln!(f, "Avg. training:      {}%", self.average_training)?;
        writeln!(f, "Test pass rate:     {}%", self.test_pass_rate)?;
        write!(f, "Open CAPAs:         {}", self.open_capas)
    }
}

/// Test statistics over a reporting window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestReport {
    /// Start of the window, `None` for all runs
    pub window_start: Option<DateTime<Utc>>,
    /// Passed/failed tally
    pub outcomes: TestOutcomes,
    /// Pass rate in percent
    pub pass_rate: f64,
}

/// Tallies the runs in the window starting at `window_start`.
#[must_use]
pub fn build_test_report(tests: &[TestRun], window_start: Option<DateTime<Utc>>) -> TestReport {
    let outcomes = test_outcomes(tests, window_start);
    TestReport {
        window_start,
        outcomes,
        pass_rate: outcomes.rate(),
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total tests:        {}", self.outcomes.total())?;
        writeln!(f, "Passed:             {}", self.outcomes.passed)?;
        writeln!(f, "Failed:             {}", self.outcomes.failed)?;
        write!(f, "Pass rate:          {}", format_rate(self.pass_rate))
    }
}

/// Formats a percentage with one decimal, e.g. `87.5%`.
#[must_use]
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}

/// Traffic-light tone for a pass rate: above 90 good, above 75 warning.
#[must_use]
pub fn pass_rate_tone(rate: f64) -> Tone {
    if rate > 90.0 {
        Tone::Success
    } else if rate > 75.0 {
        Tone::Warning
    } else {
        Tone::Danger
    }
}

/// The first `n` CAPAs in dataset order.
#[must_use]
pub fn top_capas(capas: &[CorrectiveAction], n: usize) -> &[CorrectiveAction] {
    &capas[..n.min(capas.len())]
}
