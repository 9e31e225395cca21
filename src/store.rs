//! The quality dataset and the store that owns it.
//!
//! [`Dataset`] is the JSON document loaded at startup. [`QualityStore`] wraps
//! it as the single explicit handle pages read from and write through. Ids are
//! handed out by one [`IdSequence`] per entity type. Every mutating method
//! takes `&mut self`, so there is exactly one writer at a time.

use crate::core::{audit, knowledge, metrics};
use crate::entities::{
    Audit, CapaUpdate, CorrectiveAction, Environment, Finding, KnowledgeArticle, KpiSnapshot,
    LegacyModule, MemberUpdate, NewArticle, NewAudit, NewCapa, NewFinding, NewRca, NewTestPlan,
    NewTestRun, Reservation, RootCauseAnalysis, TeamMember, TestPlan, TestRun, TestStatus,
    TrainingAssignment, TrainingRequest, environment::IN_USE_STATUS,
    root_cause::RCA_STARTED_STATUS, training::PLANNED_TRAINING_STATUS,
};
use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, info};

/// Valid legacy module complexity ratings
const COMPLEXITY_RANGE: RangeInclusive<u8> = 1..=10;
/// Upper bound of every percentage field
const MAX_PERCENT: u8 = 100;

/// The full dataset document. Every top-level key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    /// Recorded test runs
    pub tests: Vec<TestRun>,
    /// CAPAs
    pub corrective_actions: Vec<CorrectiveAction>,
    /// Team members
    pub team: Vec<TeamMember>,
    /// Daily KPI snapshots, newest first
    pub kpis: Vec<KpiSnapshot>,
    /// Training assignments
    pub trainings: Vec<TrainingAssignment>,
    /// Test plans
    pub testplans: Vec<TestPlan>,
    /// Legacy module reference data
    pub legacy_modules: Vec<LegacyModule>,
    /// Audits
    pub audits: Vec<Audit>,
    /// Shared test environments
    pub environments: Vec<Environment>,
    /// Knowledge-base articles
    pub knowledge_base: Vec<KnowledgeArticle>,
    /// Root-cause analyses
    pub root_cause_analysis: Vec<RootCauseAnalysis>,
}

impl Dataset {
    /// Parses a dataset document and checks it with [`Dataset::validate`].
    ///
    /// Malformed records and out-of-range values are both rejected here.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json).map_err(|e| Error::Dataset {
            message: format!("Failed to parse dataset: {e}"),
        })?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Checks the invariants serde cannot express.
    ///
    /// # Errors
    /// Returns [`Error::Dataset`] naming the first violation:
    /// * a training progress above 100
    /// * a legacy complexity outside 1-10, or a coverage or maintainability above 100
    /// * a duplicate team member or environment name
    /// * a duplicate id among CAPAs, articles, audits, test plans or root-cause analyses
    pub fn validate(&self) -> Result<()> {
        if let Some(member) = self
            .team
            .iter()
            .find(|m| m.training_progress > metrics::MAX_TRAINING_PROGRESS)
        {
            return Err(invalid(format!(
                "team member '{}' has training_progress {} (max {})",
                member.name,
                member.training_progress,
                metrics::MAX_TRAINING_PROGRESS
            )));
        }

        for module in &self.legacy_modules {
            if !COMPLEXITY_RANGE.contains(&module.complexity) {
                return Err(invalid(format!(
                    "legacy module '{}' has complexity {} (expected 1-10)",
                    module.name, module.complexity
                )));
            }
            for (field, value) in [
                ("coverage", module.coverage),
                ("maintainability", module.maintainability),
            ] {
                if value > MAX_PERCENT {
                    return Err(invalid(format!(
                        "legacy module '{}' has {field} {value} (max {MAX_PERCENT})",
                        module.name
                    )));
                }
            }
        }

        unique("team member name", self.team.iter().map(|m| m.name.as_str()))?;
        unique("environment name", self.environments.iter().map(|e| e.name.as_str()))?;
        unique("CAPA id", self.corrective_actions.iter().map(|c| c.id))?;
        unique("article id", self.knowledge_base.iter().map(|a| a.id))?;
        unique("audit id", self.audits.iter().map(|a| a.id))?;
        unique("test plan id", self.testplans.iter().map(|p| p.id))?;
        unique("root-cause analysis id", self.root_cause_analysis.iter().map(|r| r.id))
    }

    /// Reads and parses a dataset file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        debug!("Loading dataset from: {:?}", path_ref);
        let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Dataset {
            message: format!("Failed to read dataset file {}: {e}", path_ref.display()),
        })?;
        Self::from_json_str(&contents)
    }

    /// Serializes the dataset back to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

/// Hands out ids for one entity type: `max(existing) + 1`, then counting up.
///
/// Removed ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Seeds the sequence past every id in `existing` (starts at 1 when empty).
    pub fn seeded<I: IntoIterator<Item = u64>>(existing: I) -> Self {
        Self {
            next: existing.into_iter().max().map_or(1, |max| max + 1),
        }
    }

    /// The id the next call to [`IdSequence::next_id`] will return
    #[must_use]
    pub const fn peek(&self) -> u64 {
        self.next
    }

    /// Takes the next id.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Owns the dataset and applies every mutation to it.
#[derive(Debug, Clone)]
pub struct QualityStore {
    data: Dataset,
    capa_ids: IdSequence,
    article_ids: IdSequence,
    audit_ids: IdSequence,
    test_plan_ids: IdSequence,
    rca_ids: IdSequence,
}

impl QualityStore {
    /// Wraps a loaded dataset, seeding one id sequence per entity type.
    #[must_use]
    pub fn new(data: Dataset) -> Self {
        let capa_ids = IdSequence::seeded(data.corrective_actions.iter().map(|c| c.id));
        let article_ids = IdSequence::seeded(data.knowledge_base.iter().map(|a| a.id));
        let audit_ids = IdSequence::seeded(data.audits.iter().map(|a| a.id));
        let test_plan_ids = IdSequence::seeded(data.testplans.iter().map(|p| p.id));
        let rca_ids = IdSequence::seeded(data.root_cause_analysis.iter().map(|r| r.id));
        Self {
            data,
            capa_ids,
            article_ids,
            audit_ids,
            test_plan_ids,
            rca_ids,
        }
    }

    /// Read access to the whole dataset
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Test runs
    #[must_use]
    pub fn tests(&self) -> &[TestRun] {
        &self.data.tests
    }

    /// CAPAs in insertion order
    #[must_use]
    pub fn corrective_actions(&self) -> &[CorrectiveAction] {
        &self.data.corrective_actions
    }

    /// Team members in insertion order
    #[must_use]
    pub fn team(&self) -> &[TeamMember] {
        &self.data.team
    }

    /// KPI snapshots
    #[must_use]
    pub fn kpis(&self) -> &[KpiSnapshot] {
        &self.data.kpis
    }

    /// Training assignments
    #[must_use]
    pub fn trainings(&self) -> &[TrainingAssignment] {
        &self.data.trainings
    }

    /// Test plans
    #[must_use]
    pub fn test_plans(&self) -> &[TestPlan] {
        &self.data.testplans
    }

    /// Legacy modules
    #[must_use]
    pub fn legacy_modules(&self) -> &[LegacyModule] {
        &self.data.legacy_modules
    }

    /// Audits
    #[must_use]
    pub fn audits(&self) -> &[Audit] {
        &self.data.audits
    }

    /// Knowledge-base articles
    #[must_use]
    pub fn articles(&self) -> &[KnowledgeArticle] {
        &self.data.knowledge_base
    }

    /// Test environments
    #[must_use]
    pub fn environments(&self) -> &[Environment] {
        &self.data.environments
    }

    /// Root-cause analyses
    #[must_use]
    pub fn root_cause_analyses(&self) -> &[RootCauseAnalysis] {
        &self.data.root_cause_analysis
    }

    /// Looks up a CAPA by id.
    #[must_use]
    pub fn capa(&self, id: u64) -> Option<&CorrectiveAction> {
        self.data.corrective_actions.iter().find(|c| c.id == id)
    }

    /// Looks up a member by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&TeamMember> {
        self.data.team.iter().find(|m| m.name == name)
    }

    /// Looks up an environment by name.
    #[must_use]
    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.data.environments.iter().find(|e| e.name == name)
    }

    /// Records a hand-entered test run stamped with `now`.
    pub fn add_test_run(&mut self, run: NewTestRun, now: DateTime<Utc>) -> Result<&TestRun> {
        require("language", &run.language)?;
        require("test name", &run.test_name)?;
        let status: TestStatus = run.status.parse()?;

        self.data.tests.push(TestRun {
            language: run.language.trim().to_string(),
            test_name: run.test_name.trim().to_string(),
            status,
            timestamp: now,
        });
        info!(language = %run.language.trim(), ?status, "Test run recorded");
        Ok(&self.data.tests[self.data.tests.len() - 1])
    }

    /// Creates a CAPA with the next CAPA id.
    pub fn add_capa(&mut self, capa: NewCapa, now: DateTime<Utc>) -> Result<&CorrectiveAction> {
        require("title", &capa.title)?;
        require("description", &capa.description)?;
        require("responsible", &capa.responsible)?;

        let id = self.capa_ids.next_id();
        self.data.corrective_actions.push(CorrectiveAction {
            id,
            title: capa.title.trim().to_string(),
            description: capa.description,
            status: capa.status,
            priority: capa.priority,
            responsible: capa.responsible,
            due_date: capa.due_date,
            created_at: now,
        });
        info!(capa_id = id, "CAPA created");
        Ok(&self.data.corrective_actions[self.data.corrective_actions.len() - 1])
    }

    /// Applies a partial update to an existing CAPA.
    pub fn update_capa(&mut self, id: u64, update: CapaUpdate) -> Result<&CorrectiveAction> {
        for (field, value) in [
            ("title", update.title.as_deref()),
            ("description", update.description.as_deref()),
            ("responsible", update.responsible.as_deref()),
        ] {
            if let Some(value) = value {
                require(field, value)?;
            }
        }

        let capa = self
            .data
            .corrective_actions
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::not_found("CAPA", id))?;
        update.apply_to(capa);
        info!(capa_id = id, "CAPA updated");
        Ok(capa)
    }

    /// Forces high priority on overdue open CAPAs; returns how many changed.
    pub fn escalate_overdue(&mut self, now: DateTime<Utc>) -> usize {
        let escalated = metrics::escalate_overdue(&mut self.data.corrective_actions, now);
        if escalated > 0 {
            info!(escalated, "Escalated overdue CAPAs to high priority");
        }
        escalated
    }

    /// Adds a member; names are unique.
    pub fn add_member(&mut self, member: TeamMember) -> Result<&TeamMember> {
        require("name", &member.name)?;
        if self.member(&member.name).is_some() {
            return Err(Error::validation(format!(
                "team member '{}' already exists",
                member.name
            )));
        }
        info!(member = %member.name, "Team member added");
        self.data.team.push(TeamMember {
            training_progress: member.training_progress.min(metrics::MAX_TRAINING_PROGRESS),
            ..member
        });
        Ok(&self.data.team[self.data.team.len() - 1])
    }

    /// Applies a partial update to a member.
    pub fn update_member(&mut self, name: &str, update: MemberUpdate) -> Result<&TeamMember> {
        let member = self.member_mut(name)?;
        update.apply_to(member);
        info!(member = name, status = %member.status, "Team member updated");
        Ok(member)
    }

    /// Records a planned training and raises the member's progress by `delta`.
    pub fn assign_training(
        &mut self,
        name: &str,
        request: TrainingRequest,
        delta: u8,
    ) -> Result<&TeamMember> {
        require("topic", &request.topic)?;
        if request.end < request.start {
            return Err(Error::validation("training end date is before its start date"));
        }

        let member = self.member_mut(name)?;
        let progress = metrics::assign_training(member, delta);
        info!(member = name, progress, "Training assigned");

        self.data.trainings.push(TrainingAssignment {
            member: name.to_string(),
            topic: request.topic,
            start: request.start,
            end: request.end,
            certification: request.certification,
            completed: false,
            status: PLANNED_TRAINING_STATUS.to_string(),
        });
        self.member(name).ok_or_else(|| Error::not_found("team member", name))
    }

    /// Creates an article with the next article id.
    pub fn add_article(&mut self, article: NewArticle, now: DateTime<Utc>) -> Result<&KnowledgeArticle> {
        require("title", &article.title)?;
        require("content", &article.content)?;

        let id = self.article_ids.next_id();
        self.data.knowledge_base.push(KnowledgeArticle {
            id,
            title: article.title,
            content: article.content,
            tags: article.tags,
            created_at: now,
            views: 0,
            last_accessed: None,
        });
        info!(article_id = id, "Article added");
        Ok(&self.data.knowledge_base[self.data.knowledge_base.len() - 1])
    }

    /// Opens an article: bumps its view counter and last-accessed time.
    pub fn view_article(&mut self, id: u64, now: DateTime<Utc>) -> Result<&KnowledgeArticle> {
        let article = self
            .data
            .knowledge_base
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::not_found("article", id))?;
        knowledge::record_view(article, now);
        Ok(article)
    }

    /// Schedules an audit with the next audit id.
    pub fn schedule_audit(&mut self, new: NewAudit) -> Result<&Audit> {
        require("title", &new.title)?;
        require("type", &new.audit_type)?;
        require("responsible", &new.responsible)?;
        require("scope", &new.scope)?;

        let id = self.audit_ids.next_id();
        self.data.audits.push(audit::new_audit(id, new));
        info!(audit_id = id, "Audit scheduled");
        Ok(&self.data.audits[self.data.audits.len() - 1])
    }

    /// Records a finding on an existing audit.
    pub fn add_finding(
        &mut self,
        audit_id: u64,
        finding: NewFinding,
        now: DateTime<Utc>,
    ) -> Result<&Finding> {
        require("description", &finding.description)?;
        require("severity", &finding.severity)?;

        let target = self
            .data
            .audits
            .iter_mut()
            .find(|a| a.id == audit_id)
            .ok_or_else(|| Error::not_found("audit", audit_id))?;
        info!(audit_id, "Finding recorded");
        Ok(audit::add_finding(target, finding, now))
    }

    /// Creates a test plan with the next test plan id.
    pub fn add_test_plan(&mut self, plan: NewTestPlan, now: DateTime<Utc>) -> Result<&TestPlan> {
        require("type", &plan.plan_type)?;
        require("frequency", &plan.frequency)?;
        require("responsible", &plan.responsible)?;

        let id = self.test_plan_ids.next_id();
        self.data.testplans.push(TestPlan {
            id,
            plan_type: plan.plan_type,
            frequency: plan.frequency,
            responsible: plan.responsible,
            scope: plan.scope,
            created_at: now,
        });
        info!(test_plan_id = id, "Test plan created");
        Ok(&self.data.testplans[self.data.testplans.len() - 1])
    }

    /// Deletes a test plan. Its id is not handed out again.
    pub fn remove_test_plan(&mut self, id: u64) -> Result<TestPlan> {
        let index = self
            .data
            .testplans
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::not_found("test plan", id))?;
        info!(test_plan_id = id, "Test plan removed");
        Ok(self.data.testplans.remove(index))
    }

    /// Reserves an environment for `reservation.hours` hours from `now`.
    pub fn reserve_environment(
        &mut self,
        name: &str,
        reservation: Reservation,
        now: DateTime<Utc>,
    ) -> Result<&Environment> {
        require("user", &reservation.user)?;
        if reservation.hours == 0 {
            return Err(Error::validation("reservation must last at least one hour"));
        }

        let environment = self
            .data
            .environments
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| Error::not_found("environment", name))?;
        environment.status = IN_USE_STATUS.to_string();
        environment.user = Some(reservation.user);
        environment.last_updated = Some(now);
        environment.reserved_until = Some(now + Duration::hours(i64::from(reservation.hours)));
        info!(environment = name, hours = reservation.hours, "Environment reserved");
        Ok(environment)
    }

    /// Starts a root-cause analysis with the next analysis id.
    pub fn add_rca(&mut self, rca: NewRca, now: DateTime<Utc>) -> Result<&RootCauseAnalysis> {
        require("problem", &rca.problem)?;
        require("responsible", &rca.responsible)?;
        require("method", &rca.method)?;

        let id = self.rca_ids.next_id();
        self.data.root_cause_analysis.push(RootCauseAnalysis {
            id,
            problem: rca.problem,
            date: rca.date,
            responsible: rca.responsible,
            method: rca.method,
            status: RCA_STARTED_STATUS.to_string(),
            created_at: now,
            factors: Vec::new(),
            solution: String::new(),
        });
        info!(rca_id = id, "Root-cause analysis started");
        Ok(&self.data.root_cause_analysis[self.data.root_cause_analysis.len() - 1])
    }

    fn member_mut(&mut self, name: &str) -> Result<&mut TeamMember> {
        self.data
            .team
            .iter_mut()
            .find(|m| m.name == name)
            .ok_or_else(|| Error::not_found("team member", name))
    }
}

fn invalid(message: String) -> Error {
    Error::Dataset { message }
}

/// Fails on the first key seen twice.
fn unique<K: Eq + Hash + Display>(what: &str, keys: impl IntoIterator<Item = K>) -> Result<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if seen.contains(&key) {
            return Err(invalid(format!("duplicate {what}: {key}")));
        }
        seen.insert(key);
    }
    Ok(())
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
