//! First-occurrence-wins deduplication of accepted records.
//!
//! Runs only after a clean validation pass. Since duplicate identifiers are themselves a
//! violation, a run that reaches this stage has no duplicates left to drop; the flags only
//! change output when the engine is extended to tolerate duplicates.

use std::collections::HashSet;

use crate::config::ValidationConfig;
use crate::types::AcceptedRecords;

/// Applies the `dedupe_accounts` / `dedupe_nzbn` toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deduplicator {
    accounts: bool,
    nzbn: bool,
}

impl Deduplicator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            accounts: config.dedupe_accounts,
            nzbn: config.dedupe_nzbn,
        }
    }

    /// Whether any section will be reduced.
    pub fn is_enabled(&self) -> bool {
        self.accounts || self.nzbn
    }

    /// Keep the first record per key in each enabled section; order is preserved.
    pub fn apply(&self, mut records: AcceptedRecords) -> AcceptedRecords {
        if self.accounts {
            let mut seen = HashSet::new();
            records
                .creditor_accounts
                .retain(|r| seen.insert(r.account_number.clone()));
        }
        if self.nzbn {
            let mut seen = HashSet::new();
            records.fourth_parties.retain(|r| seen.insert(r.nzbn.clone()));
        }
        records
    }
}
