//! Section state machine.
//!
//! A worksheet holds several tables, each opened by a marker row, followed by
//! a header row and data rows. [`SectionState::step`] consumes one classified
//! row and yields the next state plus, for a data row with content, the
//! record to append to the active section.

use crate::classify::RowKind;
use crate::record::{build_record, capture_header};
use sheetsift_sheet::{CellValue, Record};

/// Where the scanner is within a worksheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SectionState {
    /// No marker seen yet.
    #[default]
    Idle,
    /// A marker was seen; the next non-empty row is the header.
    AwaitingHeader { section: String },
    /// Header captured; rows map onto it until the next marker.
    Collecting { section: String, header: Vec<String> },
}

/// Result of consuming one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: SectionState,
    /// Record for the section of `next`, if the row produced one.
    pub record: Option<Record>,
}

impl Transition {
    fn to(next: SectionState) -> Self {
        Self { next, record: None }
    }
}

impl SectionState {
    /// Whether a header is in force.
    pub fn header_captured(&self) -> bool {
        matches!(self, SectionState::Collecting { .. })
    }

    /// The active section key, if any.
    pub fn section(&self) -> Option<&str> {
        match self {
            SectionState::Idle => None,
            SectionState::AwaitingHeader { section } | SectionState::Collecting { section, .. } => {
                Some(section)
            }
        }
    }

    /// Consume one classified row.
    pub fn step(self, kind: RowKind<'_>, row: &[CellValue]) -> Transition {
        match (self, kind) {
            // A marker always restarts header capture, even for a section
            // seen earlier in the sheet.
            (_, RowKind::Marker(key)) => Transition::to(SectionState::AwaitingHeader {
                section: key.to_string(),
            }),
            (SectionState::AwaitingHeader { section }, RowKind::HeaderCandidate) => {
                let header = capture_header(row);
                if header.is_empty() {
                    Transition::to(SectionState::AwaitingHeader { section })
                } else {
                    Transition::to(SectionState::Collecting { section, header })
                }
            }
            (SectionState::Collecting { section, header }, RowKind::Data) => {
                let mapped = build_record(&header, row);
                Transition {
                    next: SectionState::Collecting { section, header },
                    record: mapped.has_data.then_some(mapped.record),
                }
            }
            (state, _) => Transition::to(state),
        }
    }
}
