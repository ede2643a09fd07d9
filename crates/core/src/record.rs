//! Mapping data rows onto a captured header.

use sheetsift_sheet::{CellValue, Record};

/// A data row mapped onto a header.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRow {
    pub record: Record,
    /// At least one mapped cell was non-empty in the source row.
    pub has_data: bool,
}

/// Capture a header from a row: the trimmed text of every non-empty cell,
/// in order. Gaps between cells are closed up.
pub fn capture_header(row: &[CellValue]) -> Vec<String> {
    row.iter()
        .filter(|cell| !cell.is_empty())
        .map(|cell| cell.as_text().trim().to_string())
        .collect()
}

/// Map `row` positionally onto `header`.
///
/// Every header field is present in the result. Cells past the end of the
/// row, and empty cells, become empty text; everything else keeps its scalar
/// kind. A field name repeated in the header keeps its first position and
/// takes the value of its last column.
pub fn build_record(header: &[String], row: &[CellValue]) -> MappedRow {
    let mut record = Record::with_capacity(header.len());
    let mut has_data = false;

    for (idx, field) in header.iter().enumerate() {
        let value = match row.get(idx) {
            Some(cell) if !cell.is_empty() => {
                has_data = true;
                cell.clone()
            }
            _ => CellValue::Text(String::new()),
        };
        record.insert(field.clone(), value);
    }

    MappedRow { record, has_data }
}
