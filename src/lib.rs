//! `allowlist-builder` turns an operator-maintained allow-list of payment counterparties
//! (a single `data` sheet, or a CSV file) into a quoted YAML configuration document, after
//! validating every row.
//!
//! The primary entrypoints are [`ingestion::ingest_from_path`], which reads the input into a
//! [`types::RawTable`], and [`pipeline::Pipeline::run`], which validates the table and renders
//! the document.
//!
//! ## Input
//!
//! One row per counterparty with the columns `type`, `id`, `paymentLimit` and `comment`.
//! `type` is `creditorAccount` or `fourthParty` (any case). Fully blank rows are ignored.
//!
//! ## Rules
//!
//! - `type` must be recognized
//! - a fourth party's `id` must be a 13-digit NZBN (whitespace is ignored)
//! - identifiers must be unique per type; every occurrence of a repeated one is reported
//! - optionally, `paymentLimit` must be numeric and at most a per-type ceiling
//!
//! Any violation rejects the whole run and no document is written.
//!
//! ## Quick example
//!
//! ```rust
//! use allowlist_builder::config::ValidationConfig;
//! use allowlist_builder::pipeline::{Pipeline, RunOutcome};
//! use allowlist_builder::types::{RawRow, RawTable};
//!
//! let table = RawTable::new(vec![
//!     RawRow::new(2, "creditorAccount", "42", "10", "note"),
//!     RawRow::new(3, "FourthParty", "1234567890123", "500", ""),
//! ]);
//!
//! let config = ValidationConfig::default().with_require_numeric_limit(true);
//! match Pipeline::new(config).run(&table) {
//!     RunOutcome::Accepted(doc) => {
//!         assert!(doc.text.contains("  - accountNumber: '42'\n    paymentLimit: '10' # note\n"));
//!         assert!(doc.text.contains("  - nzbn: '1234567890123'\n"));
//!     }
//!     RunOutcome::Rejected(report) => panic!("{report}"),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: workbook/CSV ingestion with observer hooks
//! - [`processing`]: normalize, classify, validate, dedupe
//! - [`report`]: violation summary, sorted details and export
//! - [`emit`]: YAML rendering and atomic writes
//! - [`pipeline`]: the end-to-end run
//! - [`config`], [`error`], [`logging`], [`types`]

pub mod config;
pub mod emit;
pub mod error;
pub mod ingestion;
pub mod logging;
pub mod pipeline;
pub mod processing;
pub mod report;
pub mod types;

pub use config::{RunPaths, ValidationConfig};
pub use error::{ExitStatus, IngestionError, IngestionResult, ReportError};
pub use pipeline::{AcceptedDocument, Pipeline, RunOutcome};
pub use report::ValidationReport;
