//! Sheet aggregation: run the section scanner over worksheets.

use crate::classify::classify;
use crate::marker::MarkerSet;
use crate::section::SectionState;
use indexmap::IndexMap;
use sheetsift_sheet::{Book, CellValue, Record, Sheet};

/// Section key → records, in marker declaration order.
pub type SheetResult = IndexMap<String, Vec<Record>>;

/// Sheet name → sections, in workbook order.
pub type WorkbookResult = IndexMap<String, SheetResult>;

/// Scan rows of one worksheet into sections.
///
/// Every marker key is present in the result, with an empty list when its
/// marker never appears. A marker that appears again appends to the same
/// list.
pub fn extract_rows<'r, I>(rows: I, markers: &MarkerSet) -> SheetResult
where
    I: IntoIterator<Item = &'r [CellValue]>,
{
    let mut sections: SheetResult = markers.keys().map(|key| (key.to_string(), Vec::new())).collect();
    let mut state = SectionState::Idle;

    for row in rows {
        let kind = classify(row, markers, state.header_captured());
        let transition = state.step(kind, row);
        state = transition.next;

        if let (Some(record), Some(section)) = (transition.record, state.section()) {
            if let Some(records) = sections.get_mut(section) {
                records.push(record);
            }
        }
    }

    sections
}

/// Scan one worksheet.
pub fn extract_sheet(sheet: &Sheet, markers: &MarkerSet) -> SheetResult {
    let sections = extract_rows(sheet.rows().map(Vec::as_slice), markers);

    for (key, records) in &sections {
        tracing::debug!(sheet = sheet.name(), section = %key, records = records.len(), "section");
    }

    sections
}

/// Scan every worksheet of a workbook.
pub fn extract_book(book: &Book, markers: &MarkerSet) -> WorkbookResult {
    book.sheets()
        .map(|(name, sheet)| {
            tracing::info!(sheet = name, "processing sheet");
            (name.to_string(), extract_sheet(sheet, markers))
        })
        .collect()
}

/// Total number of records across all sheets and sections.
pub fn record_count(result: &WorkbookResult) -> usize {
    result
        .values()
        .flat_map(|sections| sections.values())
        .map(Vec::len)
        .sum()
}
