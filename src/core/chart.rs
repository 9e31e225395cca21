//! Chart series built from the same derived numbers the tables show, plus
//! named chart slots with destroy-before-recreate semantics.
//!
//! Drawing is left to whatever charting front end consumes [`ChartData`].

use crate::core::metrics::{StatusCounts, language_distribution, risk_score};
use crate::entities::{
    CapaStatus, CorrectiveAction, Environment, EnvironmentState, KpiSnapshot, LegacyModule,
    TeamMember, TestRun,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Titles longer than this are shortened on chart axes.
const MAX_AXIS_TITLE_CHARS: usize = 15;
/// Characters kept from a shortened title before the ellipsis.
const SHORTENED_TITLE_CHARS: usize = 12;
/// Number of KPI snapshots shown on the build chart.
const BUILD_CHART_SAMPLES: usize = 7;

/// Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Vertical bars
    Bar,
    /// Line over time
    Line,
    /// Ring chart of shares
    Doughnut,
    /// One spoke per category, one polygon per series
    Radar,
}

/// One named series of values, aligned with the chart's category labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Series label
    pub label: String,
    /// Values, one per category
    pub values: Vec<f64>,
}

/// A chart: category labels plus one or more series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Chart type
    pub kind: ChartKind,
    /// Category labels
    pub labels: Vec<String>,
    /// Series in drawing order
    pub series: Vec<Series>,
}

impl ChartData {
    fn new(kind: ChartKind, label: &str) -> Self {
        Self {
            kind,
            labels: Vec::new(),
            series: vec![Series {
                label: label.to_string(),
                values: Vec::new(),
            }],
        }
    }

    fn point(mut self, label: impl Into<String>, value: f64) -> Self {
        self.labels.push(label.into());
        if let Some(first) = self.series.first_mut() {
            first.values.push(value);
        }
        self
    }

    /// Values of the first series (empty for a chart without series)
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.series
            .first()
            .map(|s| s.values.as_slice())
            .unwrap_or_default()
    }
}

#[allow(clippy::cast_precision_loss)]
fn count_value(count: usize) -> f64 {
    count as f64
}

/// Shortens a title for an axis label: more than 15 chars become 12 chars + "...".
#[must_use]
pub fn axis_title(title: &str) -> String {
    if title.chars().count() > MAX_AXIS_TITLE_CHARS {
        let head: String = title.chars().take(SHORTENED_TITLE_CHARS).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

/// Doughnut of CAPAs per status; all three segments always present.
#[must_use]
pub fn capa_status_chart(counts: StatusCounts) -> ChartData {
    CapaStatus::ALL.into_iter().fold(
        ChartData::new(ChartKind::Doughnut, "CAPA status"),
        |chart, status| chart.point(status.label(), count_value(counts.get(status))),
    )
}

/// Bar chart of each CAPA's risk score, in dataset order.
#[must_use]
pub fn capa_risk_chart(
    capas: &[CorrectiveAction],
    now: DateTime<Utc>,
    overdue_cap: u32,
) -> ChartData {
    capas
        .iter()
        .fold(ChartData::new(ChartKind::Bar, "Risk score"), |chart, capa| {
            chart.point(
                axis_title(&capa.title),
                f64::from(risk_score(capa, now, overdue_cap)),
            )
        })
}

/// Bar chart of training progress per member.
#[must_use]
pub fn training_chart(members: &[TeamMember]) -> ChartData {
    members.iter().fold(
        ChartData::new(ChartKind::Bar, "Training progress (%)"),
        |chart, m| chart.point(m.name.as_str(), f64::from(m.training_progress)),
    )
}

/// Doughnut of passed vs failed runs.
#[must_use]
pub fn test_outcome_chart(passed: usize, failed: usize) -> ChartData {
    ChartData::new(ChartKind::Doughnut, "Test results")
        .point("Passed", count_value(passed))
        .point("Failed", count_value(failed))
}

/// Doughnut of runs per language.
#[must_use]
pub fn language_distribution_chart(tests: &[TestRun]) -> ChartData {
    language_distribution(tests).into_iter().fold(
        ChartData::new(ChartKind::Doughnut, "Tests per language"),
        |chart, (language, count)| chart.point(language, count_value(count)),
    )
}

/// Bar chart of coverage per legacy module.
#[must_use]
pub fn coverage_chart(modules: &[LegacyModule]) -> ChartData {
    modules.iter().fold(
        ChartData::new(ChartKind::Bar, "Test coverage (%)"),
        |chart, m| chart.point(m.name.as_str(), f64::from(m.coverage)),
    )
}

/// Line of build success over the latest seven snapshots, oldest first.
///
/// Snapshots are expected newest first, as the dataset stores them.
#[must_use]
pub fn build_success_chart(kpis: &[KpiSnapshot]) -> ChartData {
    kpis.iter().take(BUILD_CHART_SAMPLES).rev().fold(
        ChartData::new(ChartKind::Line, "Build success rate (%)"),
        |chart, k| chart.point(k.timestamp.format("%m-%d").to_string(), k.build_success),
    )
}

/// Doughnut of environments per state; all three segments always present.
///
/// Environments whose status matches no known state are left out.
#[must_use]
pub fn environment_status_chart(environments: &[Environment]) -> ChartData {
    EnvironmentState::ALL.into_iter().fold(
        ChartData::new(ChartKind::Doughnut, "Environments"),
        |chart, state| {
            let count = environments
                .iter()
                .filter(|e| e.state() == Some(state))
                .count();
            chart.point(state.label(), count_value(count))
        },
    )
}

/// Radar of complexity, coverage and maintainability per legacy module.
///
/// One spoke per module, one polygon per metric.
#[must_use]
pub fn maintainability_radar_chart(modules: &[LegacyModule]) -> ChartData {
    ChartData {
        kind: ChartKind::Radar,
        labels: modules.iter().map(|m| m.name.clone()).collect(),
        series: vec![
            module_series("Complexity (1-10)", modules, |m| m.complexity),
            module_series("Test coverage (%)", modules, |m| m.coverage),
            module_series("Maintainability (%)", modules, |m| m.maintainability),
        ],
    }
}

fn module_series(label: &str, modules: &[LegacyModule], value: fn(&LegacyModule) -> u8) -> Series {
    Series {
        label: label.to_string(),
        values: modules.iter().map(|m| f64::from(value(m))).collect(),
    }
}

/// Named chart slots.
///
/// A slot holds at most one chart; replacing it drops the previous chart first.
#[derive(Debug, Clone, Default)]
pub struct ChartSlots {
    slots: BTreeMap<String, ChartData>,
}

impl ChartSlots {
    /// No charts yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `chart` in `slot`, returning the chart it replaced.
    pub fn replace(&mut self, slot: &str, chart: ChartData) -> Option<ChartData> {
        let previous = self.slots.remove(slot);
        if previous.is_some() {
            debug!(slot, "Destroyed previous chart before recreating");
        }
        self.slots.insert(slot.to_string(), chart);
        previous
    }

    /// Chart currently in `slot`
    #[must_use]
    pub fn get(&self, slot: &str) -> Option<&ChartData> {
        self.slots.get(slot)
    }

    /// Number of occupied slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no slot is occupied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupied slots in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChartData)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }
}
