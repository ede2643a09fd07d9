//! Record-set merge with field renames.

use serde::{Deserialize, Serialize};
use sheetsift_sheet::{Record, Sheet};

/// Rename of one field, applied before merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRename {
    pub from: String,
    pub to: String,
}

impl FieldRename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Stock lists label the code column `代號` in some exports and `代碼`
    /// in others.
    pub fn stock_code() -> Self {
        Self::new("代號", "代碼")
    }
}

/// Records of one source, with the columns that source declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Records of a headed sheet.
    pub fn from_sheet(sheet: &Sheet) -> Self {
        Self {
            columns: sheet.column_names().cloned().unwrap_or_default(),
            records: sheet.to_records().unwrap_or_default(),
        }
    }

    /// Apply renames whose source column this set declares. The renamed
    /// field keeps its position.
    pub fn rename(&mut self, renames: &[FieldRename]) {
        for rename in renames {
            if !self.columns.iter().any(|c| *c == rename.from) {
                continue;
            }

            for column in &mut self.columns {
                if *column == rename.from {
                    column.clone_from(&rename.to);
                }
            }
            for record in &mut self.records {
                *record = std::mem::take(record)
                    .into_iter()
                    .map(|(field, value)| {
                        if field == rename.from {
                            (rename.to.clone(), value)
                        } else {
                            (field, value)
                        }
                    })
                    .collect();
            }
        }
    }
}

/// Concatenate record sets in order, renaming fields per set first.
pub fn merge_record_sets(sets: Vec<RecordSet>, renames: &[FieldRename]) -> Vec<Record> {
    let mut merged = Vec::with_capacity(sets.iter().map(|set| set.records.len()).sum());
    for mut set in sets {
        set.rename(renames);
        merged.extend(set.records);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsift_sheet::CellValue;

    fn set(columns: &[&str], rows: &[&[&str]]) -> RecordSet {
        let mut sheet = Sheet::from_data(
            rows.iter()
                .map(|row| row.iter().map(|c| CellValue::from(*c)).collect::<Vec<_>>())
                .collect(),
        );
        sheet.set_column_names(columns.iter().map(|c| (*c).to_string()).collect());
        RecordSet::from_sheet(&sheet)
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut source = set(&["代號", "名稱"], &[&["2330", "台積電"]]);
        source.rename(&[FieldRename::stock_code()]);

        assert_eq!(source.columns, vec!["代碼", "名稱"]);
        assert_eq!(source.records[0].keys().collect::<Vec<_>>(), vec!["代碼", "名稱"]);
        assert_eq!(source.records[0]["代碼"], CellValue::from("2330"));
    }

    #[test]
    fn test_merge_counts_and_order() {
        let first = set(&["代號", "名稱"], &[&["2330", "台積電"], &["2317", "鴻海"]]);
        let second = set(&["代碼", "市場"], &[&["6505", "上市"], &["3008", "上市"], &["8069", "上櫃"]]);

        let merged = merge_record_sets(vec![first, second], &[FieldRename::stock_code()]);

        assert_eq!(merged.len(), 5);
        assert_eq!(merged[0]["代碼"], CellValue::from("2330"));
        assert_eq!(merged[1]["名稱"], CellValue::from("鴻海"));
        assert_eq!(merged[2]["代碼"], CellValue::from("6505"));
        assert_eq!(merged[4]["市場"], CellValue::from("上櫃"));
        assert!(merged.iter().all(|r| !r.contains_key("代號")));
    }

    #[test]
    fn test_rename_skips_sets_without_column() {
        let mut source = set(&["名稱"], &[&["台積電"]]);
        source.rename(&[FieldRename::stock_code()]);
        assert_eq!(source.columns, vec!["名稱"]);
    }
}
