//! Core data model types shared by ingestion, validation and emission.
//!
//! Ingestion produces a [`RawTable`] of untrimmed [`RawRow`]s. The pipeline normalizes those into
//! [`Row`]s, validates them into [`Violation`]s, and (when nothing is wrong) promotes them into
//! [`AcceptedRecords`].

use std::fmt;

use serde::Serialize;

/// Name of the worksheet the allow-list lives on.
pub const DATA_SHEET: &str = "data";

/// Columns every input table must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 4] = ["type", "id", "paymentLimit", "comment"];

/// One untouched input row, as handed over by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    /// 1-based row number in the source sheet/file.
    pub position: usize,
    /// `type` cell.
    pub kind: String,
    /// `id` cell.
    pub id: String,
    /// `paymentLimit` cell.
    pub payment_limit: String,
    /// `comment` cell.
    pub comment: String,
}

impl RawRow {
    /// Create a raw row from its four cells.
    pub fn new(
        position: usize,
        kind: impl Into<String>,
        id: impl Into<String>,
        payment_limit: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            position,
            kind: kind.into(),
            id: id.into(),
            payment_limit: payment_limit.into(),
            comment: comment.into(),
        }
    }
}

/// In-memory input table, rows in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    /// Row storage.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Create a table from rows.
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Canonical record category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// A creditor bank account, keyed by account number.
    CreditorAccount,
    /// A fourth party, keyed by NZBN.
    FourthParty,
    /// Anything else, including an empty label.
    Unrecognized,
}

impl RecordKind {
    /// Map a free-form `type` label onto a kind (trimmed, case-insensitive).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "creditoraccount" => Self::CreditorAccount,
            "fourthparty" => Self::FourthParty,
            _ => Self::Unrecognized,
        }
    }

    /// Canonical camelCase label, `None` for [`RecordKind::Unrecognized`].
    pub fn canonical_name(self) -> Option<&'static str> {
        match self {
            Self::CreditorAccount => Some("creditorAccount"),
            Self::FourthParty => Some("fourthParty"),
            Self::Unrecognized => None,
        }
    }
}

/// A normalized row. `position` is carried through unchanged from [`RawRow::position`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub position: usize,
    /// Trimmed `type` text as written by the operator.
    pub raw_kind: String,
    pub kind: RecordKind,
    pub identifier: String,
    pub limit_text: String,
    pub comment: String,
}

impl Row {
    /// Label used in reports: the canonical name, or the raw text for unrecognized rows.
    pub fn kind_label(&self) -> &str {
        self.kind.canonical_name().unwrap_or(&self.raw_kind)
    }
}

/// Why a row was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViolationReason {
    InvalidType,
    InvalidNzbn,
    DuplicateNzbn,
    DuplicateAccountNumber,
    NonNumericLimit,
    /// Parsed limit is strictly above the configured ceiling. Reports print the ceiling as a
    /// float literal, always with a fractional part (`5000.0`).
    LimitExceedsMaximum { ceiling: f64 },
}

impl ViolationReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::InvalidNzbn => "invalid_nzbn",
            Self::DuplicateNzbn => "duplicate_nzbn",
            Self::DuplicateAccountNumber => "duplicate_account_number",
            Self::NonNumericLimit => "non_numeric_limit",
            Self::LimitExceedsMaximum { .. } => "limit_exceeds_maximum",
        }
    }

    /// Position of the producing rule in the engine's fixed rule order.
    pub fn rule_rank(&self) -> u8 {
        match self {
            Self::InvalidType => 0,
            Self::InvalidNzbn => 1,
            Self::DuplicateNzbn => 2,
            Self::DuplicateAccountNumber => 3,
            Self::NonNumericLimit => 4,
            Self::LimitExceedsMaximum { .. } => 5,
        }
    }
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidType => f.write_str("invalid 'type' (must be creditorAccount or fourthParty)"),
            Self::InvalidNzbn => f.write_str("invalid NZBN (must be 13 digits)"),
            Self::DuplicateNzbn => f.write_str("duplicate NZBN"),
            Self::DuplicateAccountNumber => f.write_str("duplicate accountNumber"),
            Self::NonNumericLimit => f.write_str("non-numeric paymentLimit"),
            Self::LimitExceedsMaximum { ceiling } => write!(f, "paymentLimit > {ceiling:?}"),
        }
    }
}

/// A single rule violation against a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub position: usize,
    pub kind: RecordKind,
    pub kind_label: String,
    pub identifier: String,
    pub limit_text: String,
    pub reason: ViolationReason,
}

impl Violation {
    /// Record `reason` against `row`.
    pub fn new(row: &Row, reason: ViolationReason) -> Self {
        Self {
            position: row.position,
            kind: row.kind,
            kind_label: row.kind_label().to_string(),
            identifier: row.identifier.clone(),
            limit_text: row.limit_text.clone(),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditorAccountRecord {
    pub account_number: String,
    pub payment_limit: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FourthPartyRecord {
    pub nzbn: String,
    pub payment_limit: String,
    pub comment: String,
}

/// Rows promoted to output, one ordered list per section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedRecords {
    pub creditor_accounts: Vec<CreditorAccountRecord>,
    pub fourth_parties: Vec<FourthPartyRecord>,
}

impl AcceptedRecords {
    /// Total number of records across both sections.
    pub fn len(&self) -> usize {
        self.creditor_accounts.len() + self.fourth_parties.len()
    }

    /// Returns true if neither section has records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
