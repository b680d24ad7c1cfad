#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::{IngestionError, IngestionResult};
use crate::types::RawTable;

use super::{project_required_columns, project_row};

/// Ingest one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) into a [`RawTable`].
///
/// Behavior:
/// - The sheet named `sheet_name` must exist
/// - Detects the first non-empty row as the header row
/// - Validates that all required columns exist as headers
/// - Reads remaining rows as text, tagging each with its 1-based sheet row number
pub fn ingest_excel_from_path(path: impl AsRef<Path>, sheet_name: &str) -> IngestionResult<RawTable> {
    let mut workbook = open_workbook_auto(path)?;

    if !workbook.sheet_names().iter().any(|s| s == sheet_name) {
        return Err(IngestionError::MissingSheet {
            sheet: sheet_name.to_string(),
        });
    }

    let range = workbook.worksheet_range(sheet_name)?;
    ingest_sheet_range(sheet_name, &range)
}

fn ingest_sheet_range(sheet: &str, range: &calamine::Range<Data>) -> IngestionResult<RawTable> {
    let (header_row_idx, header_cells) = find_header_row(range).ok_or_else(|| {
        IngestionError::MissingColumn {
            column: "type".to_string(),
            table: sheet.to_string(),
            headers: Vec::new(),
        }
    })?;
    let idxs = project_required_columns(&header_cells, sheet)?;

    // A range starts at its first used cell, not at A1.
    let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);

    let mut rows = Vec::new();
    for (idx0, row) in range.rows().enumerate() {
        if idx0 <= header_row_idx {
            continue;
        }
        let position = first_row + idx0 + 1;
        rows.push(project_row(position, &idxs, |i| {
            row.get(i).map(cell_to_text).unwrap_or_default()
        }));
    }

    Ok(RawTable::new(rows))
}

fn find_header_row(range: &calamine::Range<Data>) -> Option<(usize, Vec<String>)> {
    range
        .rows()
        .enumerate()
        .find(|(_, row)| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|(idx0, row)| (idx0, row.iter().map(cell_to_text).collect()))
}

/// Render a cell the way an operator typed it: whole numbers lose the `.0` a float cell
/// would otherwise print, so account numbers and limits stay textually intact.
pub(crate) fn cell_to_text(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
