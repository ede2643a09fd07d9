//! Scalar defaulting: fill empty cells so every field is present and
//! non-null in the output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sheetsift_sheet::{CellValue, Record};

/// How empty cells are filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultPolicy {
    /// Every empty cell becomes the number 0, whatever its column holds.
    #[default]
    Zero,
    /// Every empty cell becomes empty text.
    EmptyText,
    /// 0 in columns whose non-empty cells are all numeric, empty text
    /// elsewhere.
    TypeAware,
}

impl DefaultPolicy {
    /// Fill value for a column.
    pub fn fill_value(self, column_is_numeric: bool) -> CellValue {
        match self {
            DefaultPolicy::Zero => CellValue::Int(0),
            DefaultPolicy::EmptyText => CellValue::Text(String::new()),
            DefaultPolicy::TypeAware if column_is_numeric => CellValue::Int(0),
            DefaultPolicy::TypeAware => CellValue::Text(String::new()),
        }
    }
}

/// Replace every `Empty` in `records` according to `policy`. Returns the
/// number of cells filled.
pub fn apply_defaults(records: &mut [Record], policy: DefaultPolicy) -> usize {
    let numeric = match policy {
        DefaultPolicy::TypeAware => numeric_columns(records),
        DefaultPolicy::Zero | DefaultPolicy::EmptyText => IndexMap::new(),
    };

    let mut filled = 0;
    for record in records.iter_mut() {
        for (field, value) in record.iter_mut() {
            if value.is_empty() {
                let is_numeric = numeric.get(field).copied().unwrap_or(false);
                *value = policy.fill_value(is_numeric);
                filled += 1;
            }
        }
    }
    filled
}

/// For each field, whether it holds at least one value and only numbers.
fn numeric_columns(records: &[Record]) -> IndexMap<String, bool> {
    let mut kinds: IndexMap<String, Option<bool>> = IndexMap::new();

    for record in records {
        for (field, value) in record {
            let kind = kinds.entry(field.clone()).or_insert(None);
            if !value.is_empty() {
                *kind = Some(kind.unwrap_or(true) && value.is_number());
            }
        }
    }

    kinds
        .into_iter()
        .map(|(field, kind)| (field, kind.unwrap_or(false)))
        .collect()
}
