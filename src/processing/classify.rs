//! Partition normalized rows by record kind.

use crate::types::{AcceptedRecords, CreditorAccountRecord, FourthPartyRecord, RecordKind, Row};

use super::validate::nzbn_key;

/// Rows split by kind, borrowed from the normalized sequence in source order.
///
/// Unrecognized rows appear in neither list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified<'a> {
    pub creditor_accounts: Vec<&'a Row>,
    pub fourth_parties: Vec<&'a Row>,
}

/// Split `rows` into creditor accounts and fourth parties.
pub fn classify(rows: &[Row]) -> Classified<'_> {
    let of_kind = |kind: RecordKind| rows.iter().filter(|r| r.kind == kind).collect::<Vec<_>>();
    Classified {
        creditor_accounts: of_kind(RecordKind::CreditorAccount),
        fourth_parties: of_kind(RecordKind::FourthParty),
    }
}

/// Promote classified rows into output records.
///
/// Only meaningful for a run with zero violations; the caller enforces that.
pub fn promote(classified: &Classified<'_>) -> AcceptedRecords {
    AcceptedRecords {
        creditor_accounts: classified
            .creditor_accounts
            .iter()
            .map(|r| CreditorAccountRecord {
                account_number: r.identifier.clone(),
                payment_limit: r.limit_text.clone(),
                comment: r.comment.clone(),
            })
            .collect(),
        fourth_parties: classified
            .fourth_parties
            .iter()
            .map(|r| FourthPartyRecord {
                nzbn: nzbn_key(&r.identifier),
                payment_limit: r.limit_text.clone(),
                comment: r.comment.clone(),
            })
            .collect(),
    }
}
