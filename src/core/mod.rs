//! Core business logic - framework-agnostic metrics, table rendering and reports.
//!
//! Nothing in here owns data: every function works on the collections it is
//! handed and recomputes from them on each call.

/// Audit scheduling and findings
pub mod audit;
/// Chart series and named chart slots
pub mod chart;
/// Column sets and per-record row formatters
pub mod formatters;
/// Knowledge-base search and view tracking
pub mod knowledge;
/// Legacy module display values
pub mod legacy;
/// Derived metrics (pass rate, risk score, escalation, training)
pub mod metrics;
/// Dashboard and test reports
pub mod report;
/// Grid rendering into named display regions
pub mod table;
