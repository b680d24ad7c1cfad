//! Report export functions for CSV and JSON formats.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::error::ReportResult;
use crate::types::Violation;

use super::ValidationReport;

/// On-disk format of the detailed violation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    /// File extension used for default report paths.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// One exported violation. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationRecord<'a> {
    pub excel_row: usize,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub id: &'a str,
    #[serde(rename = "paymentLimit")]
    pub payment_limit: &'a str,
    pub reason: String,
}

impl<'a> From<&'a Violation> for ViolationRecord<'a> {
    fn from(v: &'a Violation) -> Self {
        Self {
            excel_row: v.position,
            kind: &v.kind_label,
            id: &v.identifier,
            payment_limit: &v.limit_text,
            reason: v.reason.to_string(),
        }
    }
}

/// Export violations as CSV with header `excel_row,type,id,paymentLimit,reason`.
///
/// Rows are written in the order given; pass them in report order.
pub fn write_csv_report(path: &Path, violations: &[Violation]) -> ReportResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for v in violations {
        wtr.serialize(ViolationRecord::from(v))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export the report as JSON: summary lines plus the same records as the CSV export.
pub fn write_json_report(path: &Path, report: &ValidationReport) -> ReportResult<()> {
    let summary: Vec<String> = report.summary().iter().map(ToString::to_string).collect();
    let violations: Vec<ViolationRecord<'_>> =
        report.violations().iter().map(ViolationRecord::from).collect();

    let doc = serde_json::json!({
        "status": "validation_failed",
        "violation_count": violations.len(),
        "summary": summary,
        "violations": violations,
    });

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &doc)?;
    Ok(())
}
