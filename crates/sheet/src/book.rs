use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use indexmap::IndexMap;

/// Named worksheets of one workbook, kept in workbook order.
#[derive(Debug, Clone, Default)]
pub struct Book {
    name: String,
    sheets: IndexMap<String, Sheet>,
}

impl Book {
    pub fn with_name(name: &str) -> Self {
        Book {
            name: name.to_string(),
            sheets: IndexMap::new(),
        }
    }

    /// Workbook name, usually the file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    pub fn sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets.get(name).ok_or_else(|| SheetError::SheetNotFound {
            name: name.to_string(),
        })
    }

    /// Append a worksheet under `name`; the sheet takes that name.
    /// Worksheet names are unique within a workbook.
    pub fn add_sheet(&mut self, name: &str, mut sheet: Sheet) -> Result<()> {
        if self.sheets.contains_key(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }
        sheet.set_name(name);
        self.sheets.insert(name.to_string(), sheet);
        Ok(())
    }

    pub fn sheets(&self) -> impl Iterator<Item = (&str, &Sheet)> {
        self.sheets.iter().map(|(name, sheet)| (name.as_str(), sheet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workbook_order() {
        let mut book = Book::with_name("report");
        book.add_sheet("近3年", Sheet::new()).unwrap();
        book.add_sheet("Alpha", Sheet::new()).unwrap();

        assert_eq!(book.sheet_names(), vec!["近3年", "Alpha"]);
        assert_eq!(book.sheet("Alpha").unwrap().name(), "Alpha");
    }

    #[test]
    fn test_duplicate_sheet_rejected() {
        let mut book = Book::default();
        book.add_sheet("Data", Sheet::new()).unwrap();
        let result = book.add_sheet("Data", Sheet::new());
        assert!(matches!(result, Err(SheetError::SheetAlreadyExists { .. })));
    }

    #[test]
    fn test_missing_sheet() {
        let book = Book::default();
        assert!(matches!(book.sheet("nope"), Err(SheetError::SheetNotFound { .. })));
    }
}
