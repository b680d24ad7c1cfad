use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// Any of these aborts a run before a single row is validated.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Workbook could not be opened or read (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The workbook has no sheet with the required name.
    #[error("missing required sheet '{sheet}'")]
    MissingSheet { sheet: String },

    /// The header row lacks a required column.
    #[error("missing required column '{column}' in '{table}'. headers={headers:?}")]
    MissingColumn {
        column: String,
        table: String,
        headers: Vec<String>,
    },

    /// The input format could not be determined or is not compiled in.
    #[error("unsupported input: {message}")]
    UnsupportedFormat { message: String },
}

/// Convenience result type for violation-report persistence.
pub type ReportResult<T> = Result<T, ReportError>;

/// Failure to persist the detailed violation report.
///
/// Never fatal: the pipeline downgrades it to a warning on the report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Process outcome, one distinct exit code per outcome kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Document written.
    Success,
    /// Validation passed but the document could not be written.
    WriteFailed,
    /// Input missing or malformed (sheet, columns, unreadable file).
    IngestionFailed,
    /// One or more rows violated a rule; no document was written.
    ValidationFailed,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::WriteFailed => 1,
            Self::IngestionFailed => 2,
            Self::ValidationFailed => 3,
        }
    }
}
