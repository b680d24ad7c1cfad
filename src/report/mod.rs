//! Violation reporting.
//!
//! A [`ValidationReport`] is built from the unordered violations of a failed run. It holds:
//!
//! - a summary: one [`SummaryLine`] per (rule, kind) that fired, in rule order
//! - the detailed list: every violation sorted by `(position, reason text)`
//! - warnings collected while persisting the report (see [`ValidationReport::persist`])

pub mod export;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::types::{RecordKind, Violation, ViolationReason};

pub use export::{ReportFormat, ViolationRecord, write_csv_report, write_json_report};

/// Count of violations produced by one rule for one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub reason: ViolationReason,
    pub kind: RecordKind,
    pub count: usize,
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.count;
        let kind = self.kind.canonical_name().unwrap_or("");
        match self.reason {
            ViolationReason::InvalidType => write!(f, "{n} rows have invalid 'type'."),
            ViolationReason::InvalidNzbn => {
                write!(f, "{n} {kind} rows have invalid NZBN (must be 13 digits).")
            }
            ViolationReason::DuplicateNzbn => write!(f, "{n} {kind} rows have duplicate NZBNs."),
            ViolationReason::DuplicateAccountNumber => {
                write!(f, "{n} {kind} rows have duplicate accountNumbers.")
            }
            ViolationReason::NonNumericLimit => {
                write!(f, "{n} {kind} rows have non-numeric paymentLimit.")
            }
            ViolationReason::LimitExceedsMaximum { ceiling } => {
                write!(f, "{n} {kind} rows have paymentLimit > {ceiling:?}.")
            }
        }
    }
}

/// Report for a run that produced at least one violation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    summary: Vec<SummaryLine>,
    violations: Vec<Violation>,
    warnings: Vec<String>,
}

impl ValidationReport {
    /// Sort `violations` and derive the summary.
    pub fn new(mut violations: Vec<Violation>) -> Self {
        sort_violations(&mut violations);
        let summary = summarize(&violations);
        Self {
            summary,
            violations,
            warnings: Vec::new(),
        }
    }

    pub fn summary(&self) -> &[SummaryLine] {
        &self.summary
    }

    /// Violations in report order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// One human-readable line per violation, in report order.
    pub fn detail_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.violations.iter().map(|v| {
            format!(
                "Row {}: {} - {} - id={} paymentLimit={}",
                v.position, v.kind_label, v.reason, v.identifier, v.limit_text
            )
        })
    }

    /// Write the detailed list to `path`.
    ///
    /// Failure is recorded as a warning on the report rather than returned: the run has
    /// already failed validation and the report is best-effort.
    pub fn persist(&mut self, path: &Path, format: ReportFormat) -> bool {
        let result = match format {
            ReportFormat::Csv => write_csv_report(path, &self.violations),
            ReportFormat::Json => write_json_report(path, self),
        };
        match result {
            Ok(()) => {
                tracing::info!(path = %path.display(), "error report written");
                true
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not write error report");
                self.warnings.push(format!(
                    "Could not write error report to {}: {err}",
                    path.display()
                ));
                false
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VALIDATION FAILED:")?;
        for line in &self.summary {
            writeln!(f, " - {line}")?;
        }
        for line in self.detail_lines() {
            writeln!(f, "{line}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "WARNING: {warning}")?;
        }
        Ok(())
    }
}

/// Deterministic report order: source position, then reason text.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by_cached_key(|v| (v.position, v.reason.to_string()));
}

fn summarize(violations: &[Violation]) -> Vec<SummaryLine> {
    // Fourth parties precede creditor accounts within a rule.
    fn kind_rank(kind: RecordKind) -> u8 {
        match kind {
            RecordKind::Unrecognized => 0,
            RecordKind::FourthParty => 1,
            RecordKind::CreditorAccount => 2,
        }
    }

    let mut groups: BTreeMap<(u8, u8), SummaryLine> = BTreeMap::new();
    for v in violations {
        groups
            .entry((v.reason.rule_rank(), kind_rank(v.kind)))
            .and_modify(|line| line.count += 1)
            .or_insert(SummaryLine {
                reason: v.reason,
                kind: v.kind,
                count: 1,
            });
    }
    groups.into_values().collect()
}
