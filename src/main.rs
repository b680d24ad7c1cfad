//! allowlist-builder CLI - validate an allow-list workbook and emit YAML
//!
//! ```bash
//! allowlist-builder                                  # ~/Documents/input.xlsx -> ~/Documents/output.yaml
//! allowlist-builder list.xlsx -o allow.yaml --require-numeric-paymentlimit --max-fourth 50000
//! allowlist-builder list.csv --error-report errors.json --report-format json
//! ```
//!
//! Exit codes: 0 written, 1 output not writable, 2 input unusable, 3 validation failed.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use allowlist_builder::ingestion::{IngestionOptions, TracingObserver};
use allowlist_builder::logging::{LogConfig, LogFormat, init_logging};
use allowlist_builder::pipeline::execute;
use allowlist_builder::report::ReportFormat;
use allowlist_builder::{ExitStatus, RunPaths, ValidationConfig};

#[derive(Parser)]
#[command(name = "allowlist-builder", version)]
#[command(about = "Convert a single-sheet allow-list workbook to YAML, with validations")]
#[command(after_help = "Duplicate identifiers always fail validation, and deduplication only \
runs after a clean validation. The --dedupe-* flags therefore never change the outcome of a run \
that contains duplicates.")]
struct Cli {
    /// Workbook or CSV file [default: ~/Documents/input.xlsx]
    input: Option<PathBuf>,

    /// Output YAML path [default: ~/Documents/output.yaml]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Detailed error report path [default: <output dir>/validation_errors.<format>]
    #[arg(long)]
    error_report: Option<PathBuf>,

    /// Error report format
    #[arg(long, value_enum, default_value_t = ReportFormatArg::Csv)]
    report_format: ReportFormatArg,

    /// Worksheet holding the allow-list
    #[arg(long, default_value = allowlist_builder::types::DATA_SHEET)]
    sheet: String,

    /// Drop duplicate accountNumber entries (creditorAccount), keeping the first
    #[arg(long)]
    dedupe_accounts: bool,

    /// Drop duplicate NZBN entries (fourthParty), keeping the first
    #[arg(long)]
    dedupe_nzbn: bool,

    /// Fail if any paymentLimit is not numeric
    #[arg(long)]
    require_numeric_paymentlimit: bool,

    /// Max allowed paymentLimit for creditorAccount rows (inclusive)
    #[arg(long, value_name = "LIMIT")]
    max_creditor: Option<f64>,

    /// Max allowed paymentLimit for fourthParty rows (inclusive)
    #[arg(long, value_name = "LIMIT")]
    max_fourth: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Compact)]
    log_format: LogFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormatArg {
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl Cli {
    fn validation_config(&self) -> ValidationConfig {
        ValidationConfig::default()
            .with_require_numeric_limit(self.require_numeric_paymentlimit)
            .with_max_creditor_limit(self.max_creditor)
            .with_max_fourth_party_limit(self.max_fourth)
            .with_dedupe_accounts(self.dedupe_accounts)
            .with_dedupe_nzbn(self.dedupe_nzbn)
    }

    fn report_format(&self) -> ReportFormat {
        match self.report_format {
            ReportFormatArg::Csv => ReportFormat::Csv,
            ReportFormatArg::Json => ReportFormat::Json,
        }
    }

    fn log_config(&self) -> LogConfig {
        LogConfig {
            format: match self.log_format {
                LogFormatArg::Pretty => LogFormat::Pretty,
                LogFormatArg::Compact => LogFormat::Compact,
                LogFormatArg::Json => LogFormat::Json,
            },
            with_ansi: io::stderr().is_terminal(),
            ..LogConfig::from_verbosity(self.verbose)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
    }
    std::process::exit(run(cli).code());
}

fn run(cli: Cli) -> ExitStatus {
    let format = cli.report_format();
    let paths = RunPaths::resolve(
        cli.input.clone(),
        cli.output.clone(),
        cli.error_report.clone(),
        format.extension(),
    );
    let options = IngestionOptions {
        sheet: cli.sheet.clone(),
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };
    execute(&paths, &options, cli.validation_config(), format)
}
