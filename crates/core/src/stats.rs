//! Flat statistics table with a derived tag list per row.

use crate::collapse::collapse_sheet;
use crate::defaults::{apply_defaults, DefaultPolicy};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use sheetsift_sheet::{Record, Sheet};

/// Statistics rows, each carrying its source columns plus one list field.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTable {
    list_field: String,
    /// Column index the list takes when it replaces a source column;
    /// otherwise it follows the source columns.
    list_position: Option<usize>,
    rows: Vec<StatsRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsRow {
    pub fields: Record,
    pub tags: Vec<String>,
}

/// Options for building a [`StatsTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsOptions {
    /// First tag column (0-based).
    pub tag_start: usize,
    /// Name of the derived list field.
    pub list_field: String,
    /// Fill for empty cells in the source columns.
    pub defaults: DefaultPolicy,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            tag_start: crate::collapse::DEFAULT_TAG_START,
            list_field: crate::collapse::DEFAULT_LIST_FIELD.to_string(),
            defaults: DefaultPolicy::Zero,
        }
    }
}

impl StatsTable {
    /// Build from a headed sheet: collapse the tag columns, then fill empty
    /// cells of the source columns. The list field is never defaulted.
    ///
    /// A source column that already has the list field's name is replaced by
    /// the derived list, which takes over that column's position.
    pub fn from_sheet(sheet: &Sheet, options: &StatsOptions) -> Self {
        let tags = collapse_sheet(sheet, options.tag_start);
        let mut records = sheet.to_records().unwrap_or_default();

        let list_position = sheet
            .column_names()
            .and_then(|names| names.iter().position(|name| *name == options.list_field));
        if list_position.is_some() {
            for record in &mut records {
                record.shift_remove(&options.list_field);
            }
            tracing::warn!(
                field = %options.list_field,
                "source column replaced by derived list"
            );
        }

        let filled = apply_defaults(&mut records, options.defaults);
        tracing::debug!(filled, policy = ?options.defaults, "filled empty cells");

        let rows = records
            .into_iter()
            .zip(tags)
            .map(|(fields, tags)| StatsRow { fields, tags })
            .collect();

        Self {
            list_field: options.list_field.clone(),
            list_position,
            rows,
        }
    }

    pub fn rows(&self) -> &[StatsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

struct RowView<'a> {
    row: &'a StatsRow,
    list_field: &'a str,
    list_position: Option<usize>,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = &self.row.fields;
        let position = self.list_position.map_or(fields.len(), |p| p.min(fields.len()));

        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        for (idx, (field, value)) in fields.iter().enumerate() {
            if idx == position {
                map.serialize_entry(self.list_field, &self.row.tags)?;
            }
            map.serialize_entry(field, value)?;
        }
        if position == fields.len() {
            map.serialize_entry(self.list_field, &self.row.tags)?;
        }
        map.end()
    }
}

impl Serialize for StatsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowView {
                row,
                list_field: &self.list_field,
                list_position: self.list_position,
            })?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsift_sheet::{CsvOptions, CellValue};

    fn sheet(csv: &str) -> Sheet {
        Sheet::from_csv_str_with_options(csv, &CsvOptions::default().with_headers(true)).unwrap()
    }

    fn options(tag_start: usize) -> StatsOptions {
        StatsOptions {
            tag_start,
            ..StatsOptions::default()
        }
    }

    #[test]
    fn test_tags_and_zero_defaults() {
        let table = StatsTable::from_sheet(
            &sheet("代號,名稱,漲幅,細產業,,,,\n2330,台積電,,A,0,,B,0\n0050,,1.5,,,,,\n"),
            &options(3),
        );

        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(first.tags, vec!["A", "B"]);
        assert_eq!(first.fields["漲幅"], CellValue::Int(0));
        assert_eq!(first.fields["Unnamed: 5"], CellValue::Int(0));

        let second = &table.rows()[1];
        assert!(second.tags.is_empty());
        assert_eq!(second.fields["名稱"], CellValue::Int(0));
        assert_eq!(second.fields["代號"], CellValue::from("0050"));
    }

    #[test]
    fn test_serialized_shape() {
        let table = StatsTable::from_sheet(&sheet("代號,細產業\n2330,晶圓代工\n"), &options(1));
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"代號":2330,"細產業":"晶圓代工","細產業列表":["晶圓代工"]}]"#);
    }

    #[test]
    fn test_narrow_table_gets_empty_lists() {
        let table = StatsTable::from_sheet(&sheet("a,b\n1,\n"), &StatsOptions::default());
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"a":1,"b":0,"細產業列表":[]}]"#);
    }

    #[test]
    fn test_list_field_shadows_source_column() {
        let table = StatsTable::from_sheet(&sheet("代號,細產業列表,x\n2330,old,A\n"), &options(2));
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"代號":2330,"細產業列表":["A"],"x":"A"}]"#);

        let table = StatsTable::from_sheet(&sheet("x,細產業列表\nA,old\n"), &options(0));
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"x":"A","細產業列表":["A","old"]}]"#);
    }
}
