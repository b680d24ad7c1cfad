//! The validation engine.
//!
//! Every rule runs on every applicable row; nothing short-circuits. Rules, in order:
//!
//! 1. kind validity (all rows)
//! 2. NZBN shape (fourth parties)
//! 3. identifier uniqueness, one pass per key space
//! 4. numeric `paymentLimit` (when required)
//! 5. `paymentLimit` ceiling (per kind, when configured)
//!
//! The returned violations are unordered; [`crate::report`] sorts them.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::ValidationConfig;
use crate::types::{RecordKind, Row, Violation, ViolationReason};

use super::classify::Classified;

static NZBN_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{13}$").expect("NZBN pattern is a valid regex"));

/// Key a fourth-party identifier the way it is deduplicated and emitted: all whitespace removed.
pub fn nzbn_key(identifier: &str) -> String {
    identifier.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Exactly 13 ASCII digits.
pub fn is_valid_nzbn(key: &str) -> bool {
    NZBN_SHAPE.is_match(key)
}

/// Parse a limit as a plain real number. Empty, malformed and NaN text yield `None`, as do
/// digit separators (`1_000`).
pub fn parse_limit(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Runs the rule battery for one configuration.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Produce every violation for `rows` (all normalized rows) and their classification.
    ///
    /// The two kinds occupy disjoint key spaces, so their passes run side by side.
    pub fn validate(&self, rows: &[Row], classified: &Classified<'_>) -> Vec<Violation> {
        let mut violations = check_kinds(rows);

        let (fourth, creditor) = rayon::join(
            || self.check_fourth_parties(&classified.fourth_parties),
            || self.check_creditor_accounts(&classified.creditor_accounts),
        );
        violations.extend(fourth);
        violations.extend(creditor);

        tracing::debug!(
            rows = rows.len(),
            violations = violations.len(),
            "validation finished"
        );
        violations
    }

    fn check_fourth_parties(&self, rows: &[&Row]) -> Vec<Violation> {
        let mut out = check_nzbn_shape(rows);
        out.extend(check_duplicate_nzbns(rows));
        out.extend(self.check_limits(rows, self.config.max_fourth_party_limit));
        out
    }

    fn check_creditor_accounts(&self, rows: &[&Row]) -> Vec<Violation> {
        let mut out = check_duplicate_account_numbers(rows);
        out.extend(self.check_limits(rows, self.config.max_creditor_limit));
        out
    }

    fn check_limits(&self, rows: &[&Row], ceiling: Option<f64>) -> Vec<Violation> {
        if !self.config.limit_checks_enabled() {
            return Vec::new();
        }

        let mut out = Vec::new();
        for row in rows {
            let parsed = parse_limit(&row.limit_text);
            if self.config.require_numeric_limit && parsed.is_none() {
                out.push(Violation::new(row, ViolationReason::NonNumericLimit));
            }
            if let (Some(ceiling), Some(value)) = (ceiling, parsed) {
                if value > ceiling {
                    out.push(Violation::new(
                        row,
                        ViolationReason::LimitExceedsMaximum { ceiling },
                    ));
                }
            }
        }
        out
    }
}

fn check_kinds(rows: &[Row]) -> Vec<Violation> {
    rows.iter()
        .filter(|r| r.kind == RecordKind::Unrecognized)
        .map(|r| Violation::new(r, ViolationReason::InvalidType))
        .collect()
}

fn check_nzbn_shape(rows: &[&Row]) -> Vec<Violation> {
    rows.iter()
        .filter(|r| !is_valid_nzbn(&nzbn_key(&r.identifier)))
        .map(|r| Violation::new(r, ViolationReason::InvalidNzbn))
        .collect()
}

/// Fourth parties share a key when their identifiers match after whitespace removal.
fn check_duplicate_nzbns(rows: &[&Row]) -> Vec<Violation> {
    every_duplicate(rows, |r| nzbn_key(&r.identifier))
        .map(|r| Violation::new(r, ViolationReason::DuplicateNzbn))
        .collect()
}

/// Creditor accounts share a key only when identifiers match verbatim.
fn check_duplicate_account_numbers(rows: &[&Row]) -> Vec<Violation> {
    every_duplicate(rows, |r| r.identifier.as_str())
        .map(|r| Violation::new(r, ViolationReason::DuplicateAccountNumber))
        .collect()
}

/// All rows whose key occurs at least twice, including the first occurrence.
fn every_duplicate<'a, K, F>(rows: &'a [&'a Row], key: F) -> impl Iterator<Item = &'a Row> + 'a
where
    K: Eq + Hash + 'a,
    F: Fn(&'a Row) -> K + 'a,
{
    let keys: Vec<K> = rows.iter().map(|r| key(*r)).collect();
    let mut counts: HashMap<&K, usize> = HashMap::new();
    for k in &keys {
        *counts.entry(k).or_default() += 1;
    }
    let flagged: Vec<bool> = keys.iter().map(|k| counts[k] > 1).collect();

    rows.iter()
        .zip(flagged)
        .filter_map(|(r, dup)| dup.then_some(*r))
}
