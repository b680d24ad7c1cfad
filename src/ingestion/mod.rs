//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - reads the four required columns into an in-memory [`crate::types::RawTable`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (Cargo feature `excel`, on by default)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
pub mod unified;

pub use observability::{
    IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use unified::{IngestionFormat, IngestionOptions, ingest_from_path};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{REQUIRED_COLUMNS, RawRow};

/// Map each required column to its index in `headers` (header cells are compared trimmed).
pub(crate) fn project_required_columns(
    headers: &[String],
    table: &str,
) -> IngestionResult<[usize; 4]> {
    let mut idxs = [0usize; 4];
    for (slot, column) in idxs.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| IngestionError::MissingColumn {
                column: column.to_string(),
                table: table.to_string(),
                headers: headers.to_vec(),
            })?;
    }
    Ok(idxs)
}

/// Build a [`RawRow`] by pulling projected cells out of `cell`; out-of-range cells are empty.
pub(crate) fn project_row<F>(position: usize, idxs: &[usize; 4], mut cell: F) -> RawRow
where
    F: FnMut(usize) -> String,
{
    let [kind, id, limit, comment] = *idxs;
    RawRow::new(position, cell(kind), cell(id), cell(limit), cell(comment))
}
