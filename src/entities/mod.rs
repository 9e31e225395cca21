//! Entity module - record types for every collection in the quality dataset.
//! Each entity is a plain serde struct; identity is an integer id or, for team
//! members, the name.

/// Audits and their findings
pub mod audit;
/// Corrective and preventive actions
pub mod capa;
/// Shared test environments
pub mod environment;
/// Knowledge-base articles
pub mod knowledge_article;
/// Daily KPI snapshots
pub mod kpi;
/// Legacy module reference data
pub mod legacy_module;
/// Root-cause analyses
pub mod root_cause;
/// Lenient date and number codecs
pub mod serde_helpers;
/// Team members
pub mod team_member;
/// Recorded test runs
pub mod test_run;
/// Training assignments and test plans
pub mod training;

pub use audit::{Audit, AuditStatus, Finding, NewAudit, NewFinding};
pub use capa::{CapaStatus, CapaUpdate, CorrectiveAction, NewCapa, Priority};
pub use environment::{Environment, EnvironmentState, Reservation};
pub use knowledge_article::{KnowledgeArticle, NewArticle};
pub use kpi::KpiSnapshot;
pub use legacy_module::LegacyModule;
pub use root_cause::{NewRca, RootCauseAnalysis};
pub use team_member::{MemberUpdate, TeamMember};
pub use test_run::{NewTestRun, TestRun, TestStatus};
pub use training::{NewTestPlan, TestPlan, TrainingAssignment, TrainingRequest};
