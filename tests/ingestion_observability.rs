use std::sync::{Arc, Mutex};

use allowlist_builder::IngestionError;
use allowlist_builder::ingestion::{
    IngestionContext, IngestionFormat, IngestionObserver, IngestionOptions, IngestionSeverity,
    IngestionStats, ingest_from_path,
};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<usize>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, _ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push(stats.rows);
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: &Arc<RecordingObserver>) -> IngestionOptions {
    IngestionOptions {
        format: Some(IngestionFormat::Csv),
        observer: Some(obs.clone()),
        alert_at_or_above: IngestionSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_row_count_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let table = ingest_from_path("tests/fixtures/allowlist.csv", &options(&obs)).unwrap();

    assert_eq!(*obs.successes.lock().unwrap(), vec![table.row_count()]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> Io error -> Critical
    let _ = ingest_from_path("tests/fixtures/does_not_exist.csv", &options(&obs)).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IngestionSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_missing_column() {
    let obs = Arc::new(RecordingObserver::default());

    let _ = ingest_from_path("tests/fixtures/missing_limit.csv", &options(&obs)).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn unknown_extension_is_rejected_before_reading() {
    let err = ingest_from_path("tests/fixtures/allowlist.txt", &IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, IngestionError::UnsupportedFormat { .. }));
}
