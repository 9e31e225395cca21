//! Audit scheduling and findings.

use crate::entities::{Audit, AuditStatus, Finding, NewAudit, NewFinding};
use chrono::{DateTime, Utc};

/// Builds a freshly scheduled audit: status planned, no findings.
#[must_use]
pub fn new_audit(id: u64, audit: NewAudit) -> Audit {
    Audit {
        id,
        title: audit.title,
        audit_type: audit.audit_type,
        date: audit.date,
        responsible: audit.responsible,
        scope: audit.scope,
        findings: Vec::new(),
        status: AuditStatus::Planned,
    }
}

/// Appends a finding; findings stay in recording order.
pub fn add_finding(audit: &mut Audit, finding: NewFinding, now: DateTime<Utc>) -> &Finding {
    audit.findings.push(Finding {
        description: finding.description,
        severity: finding.severity,
        created_at: now,
    });
    &audit.findings[audit.findings.len() - 1]
}

/// Total findings across all audits.
#[must_use]
pub fn total_findings(audits: &[Audit]) -> usize {
    audits.iter().map(|a| a.findings.len()).sum()
}
