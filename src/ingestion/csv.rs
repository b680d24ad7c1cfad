//! CSV ingestion implementation.

use std::path::Path;

use crate::error::IngestionResult;
use crate::types::RawTable;

use super::{project_required_columns, project_row};

/// Ingest a CSV file into a [`RawTable`].
///
/// Rules:
///
/// - CSV must have headers; `type`, `id`, `paymentLimit` and `comment` must be among them
///   (order can differ, extra columns are ignored).
/// - Short rows are allowed; missing cells read as empty text.
/// - Every cell is kept as text. Typing happens later, in validation.
/// - Bytes that are not valid UTF-8 are replaced with `U+FFFD` instead of failing the file.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> IngestionResult<RawTable> {
    let headers: Vec<String> = rdr.byte_headers()?.iter().map(lossy_text).collect();
    let idxs = project_required_columns(&headers, "csv")?;

    let mut rows = Vec::new();
    for (row_idx0, result) in rdr.byte_records().enumerate() {
        let record = result?;
        // The csv reader skips empty lines, so prefer its own line tracking over a counter.
        let position = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_idx0 + 2);
        rows.push(project_row(position, &idxs, |i| {
            record.get(i).map(lossy_text).unwrap_or_default()
        }));
    }

    Ok(RawTable::new(rows))
}

fn lossy_text(cell: &[u8]) -> String {
    String::from_utf8_lossy(cell).into_owned()
}
