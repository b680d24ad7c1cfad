//! Row normalization: [`RawRow`] → [`Row`].

use crate::types::{RawRow, RawTable, RecordKind, Row};

/// Trim every cell and resolve the record kind.
///
/// Returns `None` for a blank row: no recognized kind, and id, limit and comment all empty
/// after trimming. An unrecognized label on an otherwise empty row does not count as content.
pub fn normalize_row(raw: &RawRow) -> Option<Row> {
    let raw_kind = raw.kind.trim();
    let kind = RecordKind::from_label(raw_kind);
    let identifier = raw.id.trim();
    let limit_text = raw.payment_limit.trim();
    let comment = raw.comment.trim();

    if kind == RecordKind::Unrecognized
        && [identifier, limit_text, comment].iter().all(|s| s.is_empty())
    {
        return None;
    }

    Some(Row {
        position: raw.position,
        raw_kind: raw_kind.to_string(),
        kind,
        identifier: identifier.to_string(),
        limit_text: limit_text.to_string(),
        comment: comment.to_string(),
    })
}

/// Normalize every row of `table`, dropping blank rows and keeping source order.
pub fn normalize_rows(table: &RawTable) -> Vec<Row> {
    table.rows.iter().filter_map(normalize_row).collect()
}
