//! The cockpit page: every standard table and chart, refreshed from the store.
//!
//! [`Cockpit::refresh`] recomputes everything from the live collections each
//! time it is called; nothing derived is cached between refreshes. The page can
//! be printed as plain text or exported as a standalone HTML document.

use crate::config::settings::Settings;
use crate::core::chart::{self, ChartData, ChartSlots};
use crate::core::formatters::{
    ARTICLE_HEADERS, AUDIT_HEADERS, CAPA_RISK_HEADERS, ENVIRONMENT_HEADERS, LEGACY_HEADERS,
    RCA_HEADERS, TEAM_HEADERS, TEST_PLAN_HEADERS, TEST_RUN_HEADERS, article_row, audit_row,
    capa_risk_row, environment_row, legacy_row, rca_row, team_row, test_plan_row, test_run_row,
};
use crate::core::metrics::{status_counts, test_outcomes};
use crate::core::report::{
    DashboardSummary, TestReport, build_test_report, dashboard_summary, format_rate,
    pass_rate_tone,
};
use crate::core::table::{Grid, Layout, escape_html};
use crate::errors::Result;
use crate::store::QualityStore;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;
use tracing::{debug, info};

/// CAPA table with risk scores
pub const CAPA_REGION: &str = "capa-table";
/// Team table
pub const TEAM_REGION: &str = "team-table";
/// Audit table
pub const AUDIT_REGION: &str = "audit-table";
/// Knowledge-base table
pub const KNOWLEDGE_REGION: &str = "knowledge-table";
/// Test plan table
pub const TEST_PLAN_REGION: &str = "testplan-table";
/// Legacy module table
pub const LEGACY_REGION: &str = "legacy-table";
/// Recorded test runs
pub const TEST_RUN_REGION: &str = "test-table";
/// Test environments
pub const ENVIRONMENT_REGION: &str = "environments-table";
/// Root-cause analyses
pub const RCA_REGION: &str = "rca-table";

/// Regions in display order with their section titles.
const SECTIONS: [(&str, &str); 9] = [
    (CAPA_REGION, "Corrective actions"),
    (TEAM_REGION, "Team"),
    (TEST_RUN_REGION, "Test runs"),
    (AUDIT_REGION, "Audits"),
    (RCA_REGION, "Root-cause analyses"),
    (KNOWLEDGE_REGION, "Knowledge base"),
    (TEST_PLAN_REGION, "Test plans"),
    (ENVIRONMENT_REGION, "Environments"),
    (LEGACY_REGION, "Legacy modules"),
];

/// Everything one refresh produces
#[derive(Debug, Clone)]
pub struct Cockpit {
    layout: Layout,
    charts: ChartSlots,
    summary: Option<DashboardSummary>,
    test_report: Option<TestReport>,
}

impl Default for Cockpit {
    fn default() -> Self {
        Self::new()
    }
}

impl Cockpit {
    /// A page with all standard regions declared and nothing rendered yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layout: Layout::with_regions(SECTIONS.iter().map(|(region, _)| *region)),
            charts: ChartSlots::new(),
            summary: None,
            test_report: None,
        }
    }

    /// The table regions
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The chart slots
    #[must_use]
    pub const fn charts(&self) -> &ChartSlots {
        &self.charts
    }

    /// Key figures from the last refresh
    #[must_use]
    pub const fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    /// Test report from the last refresh
    #[must_use]
    pub const fn test_report(&self) -> Option<&TestReport> {
        self.test_report.as_ref()
    }

    /// Re-renders every table and chart from the store as of `now`.
    ///
    /// Returns the number of regions rendered.
    pub fn refresh(&mut self, store: &QualityStore, settings: &Settings, now: DateTime<Utc>) -> usize {
        let capas = store.corrective_actions();
        let tests = store.tests();

        let rendered = [
            self.layout.render(
                CAPA_REGION,
                &CAPA_RISK_HEADERS,
                capas,
                capa_risk_row(now, settings.overdue_cap),
            ),
            self.layout.render(TEAM_REGION, &TEAM_HEADERS, store.team(), team_row),
            self.layout.render(TEST_RUN_REGION, &TEST_RUN_HEADERS, tests, test_run_row),
            self.layout.render(AUDIT_REGION, &AUDIT_HEADERS, store.audits(), audit_row),
            self.layout.render(RCA_REGION, &RCA_HEADERS, store.root_cause_analyses(), rca_row),
            self.layout.render(KNOWLEDGE_REGION, &ARTICLE_HEADERS, store.articles(), article_row),
            self.layout.render(TEST_PLAN_REGION, &TEST_PLAN_HEADERS, store.test_plans(), test_plan_row),
            self.layout.render(
                ENVIRONMENT_REGION,
                &ENVIRONMENT_HEADERS,
                store.environments(),
                environment_row,
            ),
            self.layout.render(LEGACY_REGION, &LEGACY_HEADERS, store.legacy_modules(), legacy_row),
        ]
        .into_iter()
        .filter(|ok| *ok)
        .count();

        let window = test_outcomes(tests, Some(settings.pass_rate_window(now)));
        self.replace_chart("capa-status", chart::capa_status_chart(status_counts(capas)));
        self.replace_chart(
            "capa-risk",
            chart::capa_risk_chart(capas, now, settings.overdue_cap),
        );
        self.replace_chart("training", chart::training_chart(store.team()));
        self.replace_chart(
            "test-results",
            chart::test_outcome_chart(window.passed, window.failed),
        );
        self.replace_chart("test-languages", chart::language_distribution_chart(tests));
        self.replace_chart("legacy-coverage", chart::coverage_chart(store.legacy_modules()));
        self.replace_chart("build-success", chart::build_success_chart(store.kpis()));
        self.replace_chart(
            "kpi-maintainability",
            chart::maintainability_radar_chart(store.legacy_modules()),
        );
        self.replace_chart(
            "environment-status",
            chart::environment_status_chart(store.environments()),
        );

        self.summary = Some(dashboard_summary(store.team(), tests, capas));
        self.test_report = Some(build_test_report(
            tests,
            Some(settings.pass_rate_window(now)),
        ));

        debug!(rendered, charts = self.charts.len(), "Cockpit refreshed");
        rendered
    }

    fn replace_chart(&mut self, slot: &str, data: ChartData) {
        let _ = self.charts.replace(slot, data);
    }

    /// Plain-text rendering: summary, test report, then every rendered section.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(summary) = &self.summary {
            let _ = writeln!(out, "{summary}\n");
        }
        if let Some(report) = &self.test_report {
            let _ = writeln!(out, "{report}\n");
        }
        for (title, grid) in self.sections() {
            let _ = writeln!(out, "== {title} ==");
            out.push_str(&grid.to_text());
            out.push('\n');
        }
        out
    }

    /// Standalone HTML document with every section and the chart data as JSON.
    ///
    /// # Errors
    /// Returns an error if the chart data cannot be serialized.
    pub fn to_html(&self) -> Result<String> {
        let charts: BTreeMap<&str, &ChartData> = self.charts.iter().collect();
        let chart_json = serde_json::to_string(&charts)?;

        let mut html = String::from(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Quality cockpit</title></head><body>\n",
        );
        if let Some(summary) = &self.summary {
            let _ = writeln!(
                html,
                "<section id=\"summary\"><pre>{}</pre></section>",
                escape_html(&summary.to_string())
            );
        }
        if let Some(report) = &self.test_report {
            let _ = writeln!(
                html,
                "<section id=\"test-report\"><p>Pass rate: <span class=\"{}\">{}</span> ({} of {} runs)</p></section>",
                pass_rate_tone(report.pass_rate).css_class(),
                format_rate(report.pass_rate),
                report.outcomes.passed,
                report.outcomes.total()
            );
        }
        for (title, grid) in self.sections() {
            let _ = writeln!(
                html,
                "<section><h2>{}</h2><table>{}</table></section>",
                escape_html(title),
                grid.to_html()
            );
        }
        // `<` only occurs inside JSON strings, where \u003c is equivalent
        let _ = writeln!(
            html,
            "<script type=\"application/json\" id=\"charts\">{}</script>",
            chart_json.replace('<', "\\u003c")
        );
        html.push_str("</body></html>\n");
        Ok(html)
    }

    /// Writes [`Cockpit::to_html`] to `path`, creating missing parent directories.
    ///
    /// # Errors
    /// Returns an error if the directories or the file cannot be written.
    pub fn write_html(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_html()?)?;
        info!("HTML report written to {}", path.display());
        Ok(())
    }

    fn sections(&self) -> impl Iterator<Item = (&'static str, &Grid)> {
        SECTIONS
            .iter()
            .filter_map(|(region, title)| self.layout.grid(region).map(|grid| (*title, grid)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::table::NO_DATA_MESSAGE;
    use crate::store::Dataset;
    use crate::test_utils::*;

    fn sample_store() -> QualityStore {
        QualityStore::new(Dataset::from_json_str(SAMPLE_DATASET).unwrap())
    }

    #[test]
    fn test_refresh_renders_every_region_and_chart() {
        init_test_tracing();
        let mut cockpit = Cockpit::new();
        let rendered = cockpit.refresh(&sample_store(), &Settings::default(), fixed_now());

        assert_eq!(rendered, SECTIONS.len());
        assert_eq!(rendered, 9);
        assert_eq!(cockpit.charts().len(), 9);
        let capas = cockpit.layout().grid(CAPA_REGION).unwrap();
        assert_eq!(capas.rows().len(), 2);
        // Due 2024-06-10, five days overdue at fixed_now, medium priority
        assert_eq!(capas.rows()[0][5].text, "7");
    }

    #[test]
    fn test_refresh_renders_runs_environments_and_analyses() {
        let mut cockpit = Cockpit::new();
        cockpit.refresh(&sample_store(), &Settings::default(), fixed_now());

        let runs = cockpit.layout().grid(TEST_RUN_REGION).unwrap();
        assert_eq!(runs.rows().len(), 3);
        assert_eq!(runs.rows()[1][2].text, "Failed");

        let environments = cockpit.layout().grid(ENVIRONMENT_REGION).unwrap();
        assert_eq!(environments.rows().len(), 2);
        assert_eq!(environments.rows()[1][1].text, "in Benutzung");
        assert_eq!(environments.rows()[1][3].text, "Anna");

        let analyses = cockpit.layout().grid(RCA_REGION).unwrap();
        assert_eq!(analyses.rows()[0][2].text, "5-Why");

        let env_chart = cockpit.charts().get("environment-status").unwrap();
        assert_eq!(env_chart.values(), [1.0, 1.0, 0.0]);
        let radar = cockpit.charts().get("kpi-maintainability").unwrap();
        assert_eq!(radar.kind, chart::ChartKind::Radar);
        assert_eq!(radar.series.len(), 3);
        assert_eq!(radar.series[0].values, [8.0]);
    }

    #[test]
    fn test_added_test_run_and_analysis_show_after_refresh() {
        let mut store = sample_store();
        let mut cockpit = Cockpit::new();
        cockpit.refresh(&store, &Settings::default(), fixed_now());

        store
            .add_test_run(
                crate::entities::NewTestRun {
                    language: "C".to_string(),
                    test_name: "parser".to_string(),
                    status: "passed".to_string(),
                },
                fixed_now(),
            )
            .unwrap();
        store
            .add_rca(
                crate::entities::NewRca {
                    problem: "Slow reports".to_string(),
                    date: days_ago(1),
                    responsible: "Ben".to_string(),
                    method: "Ishikawa".to_string(),
                },
                fixed_now(),
            )
            .unwrap();
        cockpit.refresh(&store, &Settings::default(), fixed_now());

        assert_eq!(cockpit.layout().grid(TEST_RUN_REGION).unwrap().rows().len(), 4);
        assert_eq!(cockpit.layout().grid(RCA_REGION).unwrap().rows().len(), 2);
        assert_eq!(
            cockpit.charts().get("test-languages").unwrap().labels,
            ["Java", "COBOL", "C"]
        );
    }

    #[test]
    fn test_write_html_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.html");
        let mut cockpit = Cockpit::new();
        cockpit.refresh(&sample_store(), &Settings::default(), fixed_now());

        cockpit.write_html(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<h2>Environments</h2>"));
    }

    #[test]
    fn test_write_html_failure_leaves_cockpit_usable() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file cannot be used as a parent directory
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = sample_store();
        let mut cockpit = Cockpit::new();
        cockpit.refresh(&store, &Settings::default(), fixed_now());

        let err = cockpit.write_html(&blocker.join("report.html")).unwrap_err();
        assert!(matches!(err, crate::errors::Error::Io(_)));

        // The next cycle still refreshes and writes normally
        assert_eq!(cockpit.refresh(&store, &Settings::default(), fixed_now()), 9);
        cockpit.write_html(&dir.path().join("report.html")).unwrap();
    }

    #[test]
    fn test_refresh_uses_configured_window_for_test_report() {
        let store = sample_store();
        let mut cockpit = Cockpit::new();
        cockpit.refresh(&store, &Settings::default(), fixed_now());
        let report = cockpit.test_report().unwrap();
        assert_eq!(report.outcomes.total(), 2);
        assert_eq!(report.pass_rate, 50.0);

        let wide = Settings {
            pass_rate_window_days: 60,
            ..Settings::default()
        };
        cockpit.refresh(&store, &wide, fixed_now());
        assert_eq!(cockpit.test_report().unwrap().outcomes.total(), 3);
    }

    #[test]
    fn test_empty_store_shows_placeholders() {
        let mut cockpit = Cockpit::new();
        cockpit.refresh(&QualityStore::new(Dataset::default()), &Settings::default(), fixed_now());
        let team = cockpit.layout().grid(TEAM_REGION).unwrap();
        assert!(team.is_placeholder());
        assert!(cockpit.to_text().contains(NO_DATA_MESSAGE));
        assert_eq!(cockpit.summary().unwrap().test_pass_rate, 0);
    }

    #[test]
    fn test_refresh_reflects_mutations() {
        let mut store = sample_store();
        let mut cockpit = Cockpit::new();
        cockpit.refresh(&store, &Settings::default(), fixed_now());
        assert_eq!(cockpit.summary().unwrap().open_capas, 1);

        store
            .update_capa(
                1,
                crate::entities::CapaUpdate {
                    status: Some(crate::entities::CapaStatus::Closed),
                    ..Default::default()
                },
            )
            .unwrap();
        cockpit.refresh(&store, &Settings::default(), fixed_now());
        assert_eq!(cockpit.summary().unwrap().open_capas, 0);
    }

    #[test]
    fn test_html_export_escapes_and_embeds_charts() {
        let mut store = sample_store();
        store
            .add_member(member("<script>alert(1)</script>", 10))
            .unwrap();
        let mut cockpit = Cockpit::new();
        cockpit.refresh(&store, &Settings::default(), fixed_now());
        let html = cockpit.to_html().unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("<h2>Corrective actions</h2>"));
        assert!(html.contains("id=\"charts\""));
        assert!(html.contains("\"capa-status\""));
        // The member name also appears in the training chart JSON, escaped
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_text_output_keeps_section_order() {
        let mut cockpit = Cockpit::new();
        cockpit.refresh(&sample_store(), &Settings::default(), fixed_now());
        let text = cockpit.to_text();
        let capa_pos = text.find("== Corrective actions ==").unwrap();
        let legacy_pos = text.find("== Legacy modules ==").unwrap();
        assert!(capa_pos < legacy_pos);
    }
}
