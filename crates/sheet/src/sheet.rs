use crate::cell::CellValue;
use indexmap::IndexMap;

/// One row mapped onto column names, in column order.
pub type Record = IndexMap<String, CellValue>;

/// A worksheet: rows of cells plus, for headed tables, the column names.
///
/// Rows keep the length they were read with; a workbook range or a ragged
/// CSV is not squared off. When the sheet came from a headed table, the
/// header lives in `column_names` and the rows hold only the data below it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
    column_names: Option<Vec<String>>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::from_rows("Sheet1", Vec::new())
    }

    pub fn from_rows(name: &str, rows: Vec<Vec<CellValue>>) -> Self {
        Sheet {
            name: name.to_string(),
            rows,
            column_names: None,
        }
    }

    /// Build an unnamed-column sheet from anything convertible to cells.
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let rows = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::from_rows("Sheet1", rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header width when the sheet has column names, otherwise the longest
    /// row.
    pub fn col_count(&self) -> usize {
        match &self.column_names {
            Some(names) => names.len(),
            None => self.rows.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// Cell at `(row, col)`; positions past the end of a row read as `Empty`.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(EMPTY)
    }

    pub fn column_names(&self) -> Option<&Vec<String>> {
        self.column_names.as_ref()
    }

    pub fn set_column_names(&mut self, names: Vec<String>) {
        self.column_names = Some(names);
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> impl Iterator<Item = &Vec<CellValue>> {
        self.rows.iter()
    }

    /// Records keyed by column name, or `None` for a sheet without a header.
    ///
    /// Every record carries every column; cells missing from a short row are
    /// `Empty`.
    pub fn to_records(&self) -> Option<Vec<Record>> {
        let names = self.column_names.as_ref()?;

        let records = self
            .rows
            .iter()
            .map(|row| {
                names
                    .iter()
                    .enumerate()
                    .map(|(idx, name)| (name.clone(), row.get(idx).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect();

        Some(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows() {
        let sheet = Sheet::from_data(vec![vec![1, 2, 3], vec![4, 5]]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.cell(1, 1), &CellValue::Int(5));
        assert_eq!(sheet.cell(1, 2), &CellValue::Empty);
        assert_eq!(sheet.cell(9, 0), &CellValue::Empty);
    }

    #[test]
    fn test_to_records_pads_short_rows() {
        let mut sheet = Sheet::new();
        sheet.push_row(vec![CellValue::from("2330")]);
        sheet.set_column_names(vec!["代碼".to_string(), "名稱".to_string()]);

        let records = sheet.to_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["代碼"], CellValue::Text("2330".to_string()));
        assert_eq!(records[0]["名稱"], CellValue::Empty);
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["代碼", "名稱"]);
    }

    #[test]
    fn test_to_records_requires_names() {
        let sheet = Sheet::from_data(vec![vec![1]]);
        assert!(sheet.to_records().is_none());
    }
}
