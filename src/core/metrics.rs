//! Derived quality metrics.
//!
//! Every function here recomputes its result from the collection it is given;
//! nothing is cached between calls. All functions are total over well-formed
//! records: empty inputs yield 0 rather than NaN, and no function returns an
//! error. Record validation happens when the dataset is loaded, before any
//! record can reach this module.

use crate::entities::{
    CapaStatus, CorrectiveAction, Priority, TeamMember, TestRun, serde_helpers::start_of_day,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::debug;

/// Maximum number of risk points granted for lateness.
pub const DEFAULT_OVERDUE_CAP: u32 = 7;

/// Progress added by one training assignment.
pub const DEFAULT_TRAINING_DELTA: u8 = 25;

/// Ceiling for `training_progress`.
pub const MAX_TRAINING_PROGRESS: u8 = 100;

/// Length of the reporting window used for the weekly pass rate.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Passed/failed tally over a set of test runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestOutcomes {
    /// Runs with status `passed`
    pub passed: usize,
    /// Runs with status `failed`
    pub failed: usize,
}

impl TestOutcomes {
    /// Total number of runs counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// `passed / total * 100`, or 0 when nothing was counted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.passed as f64 / total as f64 * 100.0
    }
}

/// Number of CAPAs per status. Every bucket is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// CAPAs in `open`
    pub open: usize,
    /// CAPAs in `in_progress`
    pub in_progress: usize,
    /// CAPAs in `closed`
    pub closed: usize,
}

impl StatusCounts {
    /// Count for one status
    #[must_use]
    pub const fn get(&self, status: CapaStatus) -> usize {
        match status {
            CapaStatus::Open => self.open,
            CapaStatus::InProgress => self.in_progress,
            CapaStatus::Closed => self.closed,
        }
    }

    /// Sum over all buckets
    #[must_use]
    pub const fn total(&self) -> usize {
        self.open + self.in_progress + self.closed
    }
}

/// Start of the weekly reporting window ending at `now`.
#[must_use]
pub fn weekly_window(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(WEEKLY_WINDOW_DAYS)
}

/// Counts passed and failed runs with `timestamp >= window_start` (all runs when `None`).
#[must_use]
pub fn test_outcomes(tests: &[TestRun], window_start: Option<DateTime<Utc>>) -> TestOutcomes {
    tests
        .iter()
        .filter(|t| window_start.is_none_or(|start| t.timestamp >= start))
        .fold(TestOutcomes::default(), |mut acc, t| {
            if t.passed() {
                acc.passed += 1;
            } else {
                acc.failed += 1;
            }
            acc
        })
}

/// Percentage of passed runs in the window, 0 when the window is empty.
#[must_use]
pub fn pass_rate(tests: &[TestRun], window_start: Option<DateTime<Utc>>) -> f64 {
    test_outcomes(tests, window_start).rate()
}

/// Buckets CAPAs by status.
#[must_use]
pub fn status_counts(capas: &[CorrectiveAction]) -> StatusCounts {
    capas
        .iter()
        .fold(StatusCounts::default(), |mut counts, capa| {
            match capa.status {
                CapaStatus::Open => counts.open += 1,
                CapaStatus::InProgress => counts.in_progress += 1,
                CapaStatus::Closed => counts.closed += 1,
            }
            counts
        })
}

/// Number of CAPAs that are not closed.
#[must_use]
pub fn open_capa_count(capas: &[CorrectiveAction]) -> usize {
    capas
        .iter()
        .filter(|c| c.status != CapaStatus::Closed)
        .count()
}

/// Base risk points for a priority.
#[must_use]
pub const fn priority_base(priority: Priority) -> u32 {
    match priority {
        Priority::High => 3,
        Priority::Medium => 2,
        Priority::Low => 1,
    }
}

/// True when the due date (midnight UTC) lies strictly before `now`.
#[must_use]
pub fn is_overdue(due_date: NaiveDate, now: DateTime<Utc>) -> bool {
    start_of_day(due_date) < now
}

/// Whole days between the due date and `now`, rounded down; 0 when not overdue.
#[must_use]
pub fn days_overdue(due_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due = start_of_day(due_date);
    if due >= now {
        return 0;
    }
    // Positive span, so truncation equals floor.
    (now - due).num_days()
}

/// Priority base plus `min(days_overdue, overdue_cap)`.
#[must_use]
pub fn risk_score(capa: &CorrectiveAction, now: DateTime<Utc>, overdue_cap: u32) -> u32 {
    let overdue = u32::try_from(days_overdue(capa.due_date, now)).unwrap_or(u32::MAX);
    priority_base(capa.priority) + overdue.min(overdue_cap)
}

/// Forces `priority = High` on every non-closed CAPA whose due date has passed.
///
/// Status is never touched. Returns how many CAPAs changed, so a second run
/// over the same collection returns 0.
pub fn escalate_overdue(capas: &mut [CorrectiveAction], now: DateTime<Utc>) -> usize {
    let mut escalated = 0;
    for capa in capas
        .iter_mut()
        .filter(|c| c.status != CapaStatus::Closed && is_overdue(c.due_date, now))
    {
        if capa.priority != Priority::High {
            debug!(
                capa_id = capa.id,
                from = capa.priority.label(),
                "Escalating overdue CAPA to high priority"
            );
            capa.priority = Priority::High;
            escalated += 1;
        }
    }
    escalated
}

/// Mean training progress rounded to the nearest integer (halves round up), 0 for no members.
#[must_use]
pub fn average_training_progress(members: &[TeamMember]) -> u8 {
    if members.is_empty() {
        return 0;
    }
    let len = members.len() as u64;
    let sum: u64 = members
        .iter()
        .map(|m| u64::from(m.training_progress))
        .sum();
    // round(sum / len) for non-negative integers
    let mean = (2 * sum + len) / (2 * len);
    u8::try_from(mean).unwrap_or(u8::MAX)
}

/// Adds `delta` to the member's progress, clamped at 100. Never lowers progress.
pub fn assign_training(member: &mut TeamMember, delta: u8) -> u8 {
    let raised = member
        .training_progress
        .saturating_add(delta)
        .min(MAX_TRAINING_PROGRESS);
    member.training_progress = member.training_progress.max(raised);
    member.training_progress
}

/// Number of members with status active.
#[must_use]
pub fn active_member_count(members: &[TeamMember]) -> usize {
    members.iter().filter(|m| m.is_active()).count()
}

/// Number of runs per language, in order of first appearance.
#[must_use]
pub fn language_distribution(tests: &[TestRun]) -> Vec<(String, usize)> {
    let mut distribution: Vec<(String, usize)> = Vec::new();
    for test in tests {
        match distribution.iter_mut().find(|(lang, _)| *lang == test.language) {
            Some((_, count)) => *count += 1,
            None => distribution.push((test.language.clone(), 1)),
        }
    }
    distribution
}
