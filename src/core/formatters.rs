//! Standard column sets and row formatters for each record type.
//!
//! Formatters turn one record into one row of [`Cell`]s for
//! [`crate::core::table::build_grid`] / [`crate::core::table::Layout::render`].

use crate::core::legacy::maintainability_level;
use crate::core::metrics::risk_score;
use crate::core::table::{Cell, Tone};
use crate::entities::{
    Audit, AuditStatus, CapaStatus, CorrectiveAction, Environment, EnvironmentState,
    KnowledgeArticle, LegacyModule, Priority, RootCauseAnalysis, TeamMember, TestPlan, TestRun,
    TestStatus,
};
use chrono::{DateTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// CAPA table columns
pub const CAPA_HEADERS: [&str; 5] = ["Priority", "Title", "Responsible", "Due", "Status"];

/// CAPA table columns with the derived risk score
pub const CAPA_RISK_HEADERS: [&str; 6] = ["Priority", "Title", "Responsible", "Due", "Status", "Risk"];

/// Team table columns
pub const TEAM_HEADERS: [&str; 4] = ["Name", "Responsibility", "Status", "Training"];

/// Audit table columns
pub const AUDIT_HEADERS: [&str; 7] = [
    "ID",
    "Title",
    "Type",
    "Date",
    "Responsible",
    "Status",
    "Findings",
];

/// Knowledge-base table columns
pub const ARTICLE_HEADERS: [&str; 5] = ["ID", "Title", "Tags", "Views", "Last accessed"];

/// Test plan table columns
pub const TEST_PLAN_HEADERS: [&str; 5] = ["ID", "Type", "Frequency", "Responsible", "Created"];

/// Legacy module table columns
pub const LEGACY_HEADERS: [&str; 6] = [
    "Module",
    "Language",
    "Complexity",
    "Coverage",
    "Debt",
    "Maintainability",
];

/// Test run table columns
pub const TEST_RUN_HEADERS: [&str; 4] = ["Language", "Test", "Status", "Time"];

/// Environment table columns
pub const ENVIRONMENT_HEADERS: [&str; 5] = ["Name", "Status", "Version", "User", "Last update"];

/// Root-cause analysis table columns
pub const RCA_HEADERS: [&str; 5] = ["ID", "Problem", "Method", "Responsible", "Status"];

/// Badge for a CAPA priority
#[must_use]
pub fn priority_badge(priority: Priority) -> Cell {
    let tone = match priority {
        Priority::High => Tone::Danger,
        Priority::Medium => Tone::Warning,
        Priority::Low => Tone::Success,
    };
    Cell::badge(priority.label(), tone)
}

/// Badge for a CAPA status
#[must_use]
pub fn capa_status_badge(status: CapaStatus) -> Cell {
    let tone = match status {
        CapaStatus::Open => Tone::Warning,
        CapaStatus::InProgress => Tone::Info,
        CapaStatus::Closed => Tone::Success,
    };
    Cell::badge(status.label(), tone)
}

/// Badge for an audit status
#[must_use]
pub fn audit_status_badge(status: AuditStatus) -> Cell {
    let tone = match status {
        AuditStatus::Planned => Tone::Warning,
        AuditStatus::InProgress => Tone::Info,
        AuditStatus::Completed => Tone::Success,
    };
    Cell::badge(status.label(), tone)
}

/// Badge for a test outcome
#[must_use]
pub fn test_status_badge(status: TestStatus) -> Cell {
    let tone = match status {
        TestStatus::Passed => Tone::Success,
        TestStatus::Failed => Tone::Danger,
    };
    Cell::badge(status.label(), tone)
}

/// Badge showing an environment's raw status, toned by its known state
#[must_use]
pub fn environment_status_badge(environment: &Environment) -> Cell {
    let tone = match environment.state() {
        Some(EnvironmentState::Available) => Tone::Success,
        Some(EnvironmentState::InUse) => Tone::Info,
        Some(EnvironmentState::Maintenance) | None => Tone::Warning,
    };
    Cell::badge(environment.status.as_str(), tone)
}

/// Badge showing an analysis' raw status.
///
/// Started analyses are a warning, finished ones a success, anything else info.
#[must_use]
pub fn rca_status_badge(status: &str) -> Cell {
    let tone = match status.trim().to_lowercase().as_str() {
        "in bearbeitung" | "in progress" => Tone::Warning,
        "abgeschlossen" | "closed" | "completed" => Tone::Success,
        _ => Tone::Info,
    };
    Cell::badge(status, tone)
}

/// Row for [`TEST_RUN_HEADERS`]
#[must_use]
pub fn test_run_row(run: &TestRun) -> Vec<Cell> {
    vec![
        Cell::badge(run.language.as_str(), Tone::Info),
        Cell::plain(run.test_name.as_str()),
        test_status_badge(run.status),
        Cell::plain(run.timestamp.format(DATE_TIME_FORMAT).to_string()),
    ]
}

/// Row for [`ENVIRONMENT_HEADERS`]
#[must_use]
pub fn environment_row(environment: &Environment) -> Vec<Cell> {
    let last_update = environment.last_updated.map_or_else(
        || "-".to_string(),
        |at| at.format(DATE_FORMAT).to_string(),
    );
    vec![
        Cell::plain(environment.name.as_str()),
        environment_status_badge(environment),
        Cell::plain(environment.version.as_str()),
        Cell::plain(environment.user.as_deref().unwrap_or("-")),
        Cell::plain(last_update),
    ]
}

/// Row for [`RCA_HEADERS`]
#[must_use]
pub fn rca_row(rca: &RootCauseAnalysis) -> Vec<Cell> {
    vec![
        Cell::plain(rca.id.to_string()),
        Cell::plain(rca.problem.as_str()),
        Cell::plain(rca.method.as_str()),
        Cell::plain(rca.responsible.as_str()),
        rca_status_badge(&rca.status),
    ]
}

/// Row for [`CAPA_HEADERS`]
#[must_use]
pub fn capa_row(capa: &CorrectiveAction) -> Vec<Cell> {
    vec![
        priority_badge(capa.priority),
        Cell::plain(capa.title.as_str()),
        Cell::plain(capa.responsible.as_str()),
        Cell::plain(capa.due_date.format(DATE_FORMAT).to_string()),
        capa_status_badge(capa.status),
    ]
}

/// Row formatter for [`CAPA_RISK_HEADERS`], scoring against `now` with one fixed cap.
pub fn capa_risk_row(
    now: DateTime<Utc>,
    overdue_cap: u32,
) -> impl Fn(&CorrectiveAction) -> Vec<Cell> {
    move |capa| {
        let mut row = capa_row(capa);
        row.push(Cell::plain(risk_score(capa, now, overdue_cap).to_string()));
        row
    }
}

/// Row for [`TEAM_HEADERS`]
#[must_use]
pub fn team_row(member: &TeamMember) -> Vec<Cell> {
    let status = if member.is_active() {
        Cell::badge("Active", Tone::Success)
    } else {
        Cell::badge("Inactive", Tone::Warning)
    };
    vec![
        Cell::plain(member.name.as_str()),
        Cell::plain(member.responsibility.as_str()),
        status,
        Cell::plain(format!("{}%", member.training_progress)),
    ]
}

/// Row for [`AUDIT_HEADERS`]
#[must_use]
pub fn audit_row(audit: &Audit) -> Vec<Cell> {
    vec![
        Cell::plain(audit.id.to_string()),
        Cell::plain(audit.title.as_str()),
        Cell::plain(audit.audit_type.as_str()),
        Cell::plain(audit.date.format(DATE_FORMAT).to_string()),
        Cell::plain(audit.responsible.as_str()),
        audit_status_badge(audit.status),
        Cell::plain(audit.findings.len().to_string()),
    ]
}

/// Row for [`ARTICLE_HEADERS`]
#[must_use]
pub fn article_row(article: &KnowledgeArticle) -> Vec<Cell> {
    let last_accessed = article.last_accessed.map_or_else(
        || "never".to_string(),
        |at| at.format(DATE_TIME_FORMAT).to_string(),
    );
    vec![
        Cell::plain(article.id.to_string()),
        Cell::plain(article.title.as_str()),
        Cell::plain(article.tags.join(", ")),
        Cell::plain(article.views.to_string()),
        Cell::plain(last_accessed),
    ]
}

/// Row for [`TEST_PLAN_HEADERS`]
#[must_use]
pub fn test_plan_row(plan: &TestPlan) -> Vec<Cell> {
    vec![
        Cell::plain(plan.id.to_string()),
        Cell::plain(plan.plan_type.as_str()),
        Cell::plain(plan.frequency.as_str()),
        Cell::plain(plan.responsible.as_str()),
        Cell::plain(plan.created_at.format(DATE_FORMAT).to_string()),
    ]
}

/// Row for [`LEGACY_HEADERS`]
#[must_use]
pub fn legacy_row(module: &LegacyModule) -> Vec<Cell> {
    let level = maintainability_level(module);
    vec![
        Cell::plain(module.name.as_str()),
        Cell::plain(module.language.as_str()),
        Cell::plain(format!("{}/10", module.complexity)),
        Cell::plain(format!("{}%", module.coverage)),
        Cell::plain(format!("{} days", module.debt)),
        Cell::badge(level.label(), level.tone()),
    ]
}
