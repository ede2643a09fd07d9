//! Row classification.

use crate::marker::MarkerSet;
use sheetsift_sheet::CellValue;

/// What a worksheet row means to the section scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind<'m> {
    /// The first cell carries the pattern of this section key.
    Marker(&'m str),
    /// A header has not been captured yet for the active section.
    HeaderCandidate,
    /// Header captured and the row may carry data.
    Data,
    /// First two cells are both empty.
    Blank,
}

/// Classify one row.
///
/// Tests run in order: marker, header candidate (only while no header is
/// captured), blank, data. The blank test looks at the first two cells only,
/// so a row whose data starts in the third column is treated as blank.
pub fn classify<'m>(row: &[CellValue], markers: &'m MarkerSet, header_captured: bool) -> RowKind<'m> {
    let first = cell_at(row, 0);
    if !first.is_empty() {
        if let Some(key) = markers.find(first.as_text().trim()) {
            return RowKind::Marker(key);
        }
    }

    if !header_captured {
        return RowKind::HeaderCandidate;
    }

    if first.is_empty() && cell_at(row, 1).is_empty() {
        RowKind::Blank
    } else {
        RowKind::Data
    }
}

fn cell_at(row: &[CellValue], idx: usize) -> &CellValue {
    const EMPTY: &CellValue = &CellValue::Empty;
    row.get(idx).unwrap_or(EMPTY)
}
