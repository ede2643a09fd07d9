//! Sparse trailing-column collapse.
//!
//! Wide statistics tables tag each row with categories spread over many
//! mostly-empty trailing columns. Collapsing turns those columns into one
//! ordered list per row.

use sheetsift_sheet::{CellValue, Sheet};

/// Column index (0-based) where the sub-industry tag columns begin.
pub const DEFAULT_TAG_START: usize = 51;

/// Name of the derived list field in the statistics output.
pub const DEFAULT_LIST_FIELD: &str = "細產業列表";

/// Collect the trimmed text of cells `start..` that are neither empty nor
/// `"0"`, in column order. Duplicates are kept.
pub fn collapse_row(row: &[CellValue], start: usize) -> Vec<String> {
    row.iter()
        .skip(start)
        .filter(|cell| !cell.is_empty())
        .map(|cell| cell.as_text().trim().to_string())
        .filter(|text| !text.is_empty() && text != "0")
        .collect()
}

/// Collapse every row of a sheet.
///
/// A sheet with `start` or fewer columns has nothing to collapse; every row
/// gets an empty list.
pub fn collapse_sheet(sheet: &Sheet, start: usize) -> Vec<Vec<String>> {
    if sheet.col_count() <= start {
        tracing::warn!(
            columns = sheet.col_count(),
            start,
            "table has no tag columns; derived lists are empty"
        );
        return vec![Vec::new(); sheet.row_count()];
    }

    if let Some(first) = sheet.column_names().and_then(|names| names.get(start)) {
        tracing::info!(
            columns = sheet.col_count() - start,
            first = %first,
            "collapsing tag columns"
        );
    }

    sheet.rows().map(|row| collapse_row(row, start)).collect()
}
