use crate::book::Book;
use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Largest integer an f64 represents exactly (2^53)
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        // Workbooks store every number as f64; whole numbers come back as Int
        Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT => CellValue::Int(*f as i64),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => {
            // Excel stores dates as days since 1899-12-30
            CellValue::Float(dt.as_f64())
        }
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#ERROR: {e:?}")),
    }
}

/// Convert a used range into rows anchored at column A.
///
/// calamine trims the range to the first used cell; positional column
/// indexes must match the worksheet, so leading empty columns are restored.
/// Leading empty rows carry no information and are not restored.
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let first_col = range.start().map_or(0, |(_, col)| col as usize);

    range
        .rows()
        .map(|row| {
            let mut cells = Vec::with_capacity(first_col + row.len());
            cells.resize(first_col, CellValue::Empty);
            cells.extend(row.iter().map(data_to_cell_value));
            cells
        })
        .collect()
}

impl Book {
    /// Load every worksheet of a workbook (xlsx, xlsm, xlsb, xls or ods),
    /// in workbook order
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or a sheet cannot be read.
    pub fn from_workbook<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names();
        let book_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Book1");
        let mut book = Book::with_name(book_name);

        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name)?;

            let sheet = Sheet::from_rows(&sheet_name, range_to_rows(&range));

            tracing::debug!(
                sheet = %sheet_name,
                rows = sheet.row_count(),
                "read worksheet"
            );
            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_floats_become_ints() {
        assert_eq!(data_to_cell_value(&Data::Float(30.0)), CellValue::Int(30));
        assert_eq!(data_to_cell_value(&Data::Float(12.5)), CellValue::Float(12.5));
        assert_eq!(data_to_cell_value(&Data::Float(1e300)), CellValue::Float(1e300));
    }

    #[test]
    fn test_scalar_kinds() {
        assert_eq!(data_to_cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(
            data_to_cell_value(&Data::String("漲幅".to_string())),
            CellValue::Text("漲幅".to_string())
        );
        assert_eq!(data_to_cell_value(&Data::Bool(true)), CellValue::Bool(true));
    }
}
