//! End-to-end run over one input table.
//!
//! ```text
//! RawTable ─▶ normalize ─▶ classify ─▶ validate ─┬─▶ violations? ─▶ ValidationReport
//!                                                 └─▶ clean ─▶ dedupe ─▶ render_document
//! ```
//!
//! A single violation anywhere rejects the whole run: no document is produced, however many
//! rows were fine. [`Pipeline::run`] is a pure function of the table and the configuration.
//! [`execute`] wraps it with ingestion, report persistence and the document write, and maps
//! the result to an [`ExitStatus`].

use crate::config::{RunPaths, ValidationConfig};
use crate::emit::{render_document, write_document};
use crate::error::ExitStatus;
use crate::ingestion::{IngestionOptions, ingest_from_path};
use crate::processing::{Deduplicator, ValidationEngine, classify, normalize_rows, promote};
use crate::report::{ReportFormat, ValidationReport};
use crate::types::{AcceptedRecords, RawTable};

/// The serialized output of a clean run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedDocument {
    pub records: AcceptedRecords,
    /// Document text, ready to be written verbatim.
    pub text: String,
}

/// Outcome of [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Accepted(AcceptedDocument),
    Rejected(ValidationReport),
}

impl RunOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Validation engine and deduplicator sharing one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    engine: ValidationEngine,
    dedupe: Deduplicator,
}

impl Pipeline {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            engine: ValidationEngine::new(config),
            dedupe: Deduplicator::new(&config),
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        self.engine.config()
    }

    /// Validate `table` and, when it is clean, render the document.
    pub fn run(&self, table: &RawTable) -> RunOutcome {
        let rows = normalize_rows(table);
        let classified = classify(&rows);
        tracing::info!(
            input_rows = table.row_count(),
            rows = rows.len(),
            creditor_accounts = classified.creditor_accounts.len(),
            fourth_parties = classified.fourth_parties.len(),
            "classified rows"
        );

        let violations = self.engine.validate(&rows, &classified);
        if !violations.is_empty() {
            if self.dedupe.is_enabled() {
                tracing::warn!("dedupe flags have no effect: duplicates are rejected by validation first");
            }
            let report = ValidationReport::new(violations);
            tracing::warn!(violations = report.violations().len(), "validation failed");
            return RunOutcome::Rejected(report);
        }

        let records = self.dedupe.apply(promote(&classified));
        let text = render_document(&records);
        tracing::info!(records = records.len(), bytes = text.len(), "document rendered");
        RunOutcome::Accepted(AcceptedDocument { records, text })
    }
}

/// One full run: ingest `paths.input`, validate, then write either the error report or the
/// output document.
///
/// The report goes to stderr and the confirmation to stdout. The output document is never
/// touched on a rejected run.
pub fn execute(
    paths: &RunPaths,
    options: &IngestionOptions,
    config: ValidationConfig,
    format: ReportFormat,
) -> ExitStatus {
    let table = match ingest_from_path(&paths.input, options) {
        Ok(table) => table,
        Err(error) => {
            eprintln!("ERROR: {error}");
            return ExitStatus::IngestionFailed;
        }
    };

    match Pipeline::new(config).run(&table) {
        RunOutcome::Rejected(mut report) => {
            let written = report.persist(&paths.error_report, format);
            eprint!("{report}");
            if written {
                eprintln!(
                    "\nDetailed error report written to: {}",
                    paths.error_report.display()
                );
            }
            ExitStatus::ValidationFailed
        }
        RunOutcome::Accepted(doc) => match write_document(&paths.output, &doc.text) {
            Ok(()) => {
                println!("Wrote YAML to {}", paths.output.display());
                ExitStatus::Success
            }
            Err(error) => {
                tracing::error!(path = %paths.output.display(), %error, "could not write output");
                eprintln!("ERROR: could not write {}: {error}", paths.output.display());
                ExitStatus::WriteFailed
            }
        },
    }
}
