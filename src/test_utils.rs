//! Shared test utilities for the quality cockpit.
//!
//! This module provides fixture builders with sensible defaults so unit tests
//! can focus on the one field they care about.

use crate::entities::team_member::ACTIVE_STATUS;
use crate::entities::{
    CapaStatus, CorrectiveAction, Environment, KnowledgeArticle, LegacyModule, Priority,
    TeamMember, TestRun, TestStatus,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Fixed "now" used across tests: 2024-06-15 12:00:00 UTC.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// The calendar date `days` days before [`fixed_now`].
#[must_use]
pub fn days_ago(days: i64) -> NaiveDate {
    (fixed_now() - Duration::days(days)).date_naive()
}

/// Creates a CAPA with the given priority, status and due date.
///
/// # Defaults
/// * `title`: "CAPA {id}"
/// * `responsible`: "Anna"
/// * `created_at`: 30 days before [`fixed_now`]
#[must_use]
pub fn capa(id: u64, priority: Priority, status: CapaStatus, due_date: NaiveDate) -> CorrectiveAction {
    CorrectiveAction {
        id,
        title: format!("CAPA {id}"),
        description: "Test corrective action".to_string(),
        status,
        priority,
        responsible: "Anna".to_string(),
        due_date,
        created_at: fixed_now() - Duration::days(30),
    }
}

/// Creates an active member with the given training progress.
#[must_use]
pub fn member(name: &str, training_progress: u8) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        responsibility: "Testing".to_string(),
        status: ACTIVE_STATUS.to_string(),
        training_progress,
    }
}

/// Creates a test run in language "Java" that finished `hours_ago` hours before [`fixed_now`].
#[must_use]
pub fn test_run(status: TestStatus, hours_ago: i64) -> TestRun {
    test_run_in("Java", status, hours_ago)
}

/// Like [`test_run`] but with an explicit language.
#[must_use]
pub fn test_run_in(language: &str, status: TestStatus, hours_ago: i64) -> TestRun {
    TestRun {
        language: language.to_string(),
        test_name: format!("{language} test"),
        status,
        timestamp: fixed_now() - Duration::hours(hours_ago),
    }
}

/// Creates an article with no views.
#[must_use]
pub fn article(id: u64, title: &str, content: &str, tags: &[&str]) -> KnowledgeArticle {
    KnowledgeArticle {
        id,
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        created_at: fixed_now() - Duration::days(10),
        views: 0,
        last_accessed: None,
    }
}

/// Creates a legacy module with the given coverage, debt and maintainability.
#[must_use]
pub fn legacy_module(name: &str, coverage: u8, debt: u32, maintainability: u8) -> LegacyModule {
    LegacyModule {
        name: name.to_string(),
        language: "COBOL".to_string(),
        complexity: 7,
        coverage,
        debt,
        maintainability,
    }
}

/// Creates an environment with the given raw status and no user.
#[must_use]
pub fn environment(name: &str, status: &str) -> Environment {
    Environment {
        name: name.to_string(),
        status: status.to_string(),
        version: "1.0.0".to_string(),
        user: None,
        last_updated: Some(fixed_now() - Duration::days(1)),
        reserved_until: None,
    }
}

/// A small dataset document exercising every typed collection.
pub const SAMPLE_DATASET: &str = r#"{
    "tests": [
        {"language": "Java", "test_name": "login", "status": "passed", "timestamp": "2024-06-14T10:00:00Z"},
        {"language": "Java", "test_name": "logout", "status": "failed", "timestamp": "2024-06-13T10:00:00Z"},
        {"language": "COBOL", "test_name": "batch", "status": "passed", "timestamp": "2024-05-01T10:00:00Z"}
    ],
    "correctiveActions": [
        {"id": 1, "title": "Stabilise nightly build", "description": "Flaky", "status": "open",
         "priority": "medium", "responsible": "Anna", "due_date": "2024-06-10",
         "created_at": "2024-05-01T08:00:00Z"},
        {"id": 4, "title": "Document rollback", "description": "Missing", "status": "closed",
         "priority": "low", "responsible": "Ben", "due_date": "2024-05-01",
         "created_at": "2024-04-01T08:00:00Z"}
    ],
    "team": [
        {"name": "Anna", "responsibility": "Automation", "status": "Aktiv", "training_progress": 80},
        {"name": "Ben", "responsibility": "Audits", "status": "Urlaub", "training_progress": 40}
    ],
    "kpis": [
        {"build_success": 92, "test_coverage": 81, "defect_density": "0.12", "maintainability": 77,
         "timestamp": "2024-06-15T00:00:00Z"}
    ],
    "legacyModules": [
        {"name": "Billing", "language": "COBOL", "complexity": 8, "coverage": 35, "debt": 120, "maintainability": 38}
    ],
    "audits": [
        {"id": 2, "title": "ISO 9001 surveillance", "type": "external", "date": "2024-07-01",
         "responsible": "Ben", "scope": "QMS", "findings": [], "status": "planned"}
    ],
    "knowledgeBase": [
        {"id": 1, "title": "Writing stable UI tests", "content": "Prefer explicit waits",
         "tags": ["selenium", "flaky"], "created_at": "2024-01-01T00:00:00Z", "views": 3,
         "last_accessed": null}
    ],
    "testplans": [
        {"id": 1, "type": "regression", "frequency": "nightly", "responsible": "Anna",
         "scope": "core", "created_at": "2024-02-01T00:00:00Z"}
    ],
    "environments": [
        {"name": "QA-1", "status": "verfügbar", "version": "2.4.1", "user": null,
         "last_updated": "2024-06-14T08:00:00Z"},
        {"name": "QA-2", "status": "in Benutzung", "version": "2.5.0", "user": "Anna",
         "last_updated": "2024-06-15T07:00:00Z"}
    ],
    "rootCauseAnalysis": [
        {"id": 1, "problem": "Nightly build breaks on Mondays", "date": "2024-06-03",
         "responsible": "Anna", "type": "5-Why", "status": "in Bearbeitung",
         "created_at": "2024-06-03T09:00:00Z", "factors": ["cron overlap"], "solution": ""}
    ]
}"#;
