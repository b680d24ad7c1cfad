//! Run configuration.
//!
//! [`ValidationConfig`] is the immutable rule set handed to the validation engine and the
//! deduplicator. [`RunPaths`] resolves the input/output destinations used by the CLI.

use std::path::{Path, PathBuf};

/// Rule toggles for one run. All combinations are legal; the default enables only the
/// structural checks (type, NZBN shape, duplicates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationConfig {
    /// Reject rows whose `paymentLimit` does not parse as a number.
    pub require_numeric_limit: bool,
    /// Inclusive ceiling on `paymentLimit` for creditor accounts.
    pub max_creditor_limit: Option<f64>,
    /// Inclusive ceiling on `paymentLimit` for fourth parties.
    pub max_fourth_party_limit: Option<f64>,
    /// Keep only the first creditor account per account number.
    pub dedupe_accounts: bool,
    /// Keep only the first fourth party per NZBN.
    pub dedupe_nzbn: bool,
}

impl ValidationConfig {
    pub fn with_require_numeric_limit(mut self, on: bool) -> Self {
        self.require_numeric_limit = on;
        self
    }

    pub fn with_max_creditor_limit(mut self, ceiling: Option<f64>) -> Self {
        self.max_creditor_limit = ceiling;
        self
    }

    pub fn with_max_fourth_party_limit(mut self, ceiling: Option<f64>) -> Self {
        self.max_fourth_party_limit = ceiling;
        self
    }

    pub fn with_dedupe_accounts(mut self, on: bool) -> Self {
        self.dedupe_accounts = on;
        self
    }

    pub fn with_dedupe_nzbn(mut self, on: bool) -> Self {
        self.dedupe_nzbn = on;
        self
    }

    /// Whether `paymentLimit` needs parsing at all.
    pub fn limit_checks_enabled(&self) -> bool {
        self.require_numeric_limit
            || self.max_creditor_limit.is_some()
            || self.max_fourth_party_limit.is_some()
    }
}

/// File name used for the error report when no explicit destination is given.
pub const DEFAULT_ERROR_REPORT_NAME: &str = "validation_errors";

/// Input and output destinations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub input: PathBuf,
    pub output: PathBuf,
    pub error_report: PathBuf,
}

impl RunPaths {
    /// Resolve destinations, falling back to `~/Documents/{input.xlsx,output.yaml}` and to
    /// `validation_errors.<report_ext>` next to the output document.
    pub fn resolve(
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        error_report: Option<PathBuf>,
        report_ext: &str,
    ) -> Self {
        let input = input.unwrap_or_else(|| documents_dir().join("input.xlsx"));
        let output = output.unwrap_or_else(|| documents_dir().join("output.yaml"));
        let error_report = error_report.unwrap_or_else(|| {
            output_dir(&output).join(format!("{DEFAULT_ERROR_REPORT_NAME}.{report_ext}"))
        });
        Self {
            input,
            output,
            error_report,
        }
    }
}

fn documents_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
}

fn output_dir(output: &Path) -> PathBuf {
    let absolute = if output.is_absolute() {
        output.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(output))
            .unwrap_or_else(|_| output.to_path_buf())
    };
    match absolute.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
