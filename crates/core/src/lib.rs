//! # sheetsift-core
//!
//! Extraction engine and batch jobs for sheetsift.
//!
//! This crate provides:
//! - Sectioned-table extraction: worksheets holding several tables, each
//!   opened by a text marker, become `{sheet: {section: [record]}}`
//! - Sparse trailing-column collapse for wide statistics tables
//! - Scalar defaulting policies and record-set merging
//! - A sequential batch runner with per-job outcomes
//!
//! ```
//! use sheetsift_core::{extract_rows, MarkerSet};
//! use sheetsift_sheet::CellValue;
//!
//! let rows = vec![
//!     vec![CellValue::from("[個股排名 (Top 30)]")],
//!     vec![CellValue::from("排名"), CellValue::from("名稱")],
//!     vec![CellValue::Int(1), CellValue::from("台積電")],
//! ];
//! let sections = extract_rows(rows.iter().map(Vec::as_slice), &MarkerSet::rankings());
//! assert_eq!(sections["stocks"].len(), 1);
//! ```

/// Row classification.
pub mod classify;
/// Sparse trailing-column collapse.
pub mod collapse;
/// Empty-cell fill policies.
pub mod defaults;
/// Error types and result aliases.
pub mod error;
/// Sheet and workbook aggregation.
pub mod extract;
/// Batch jobs and reports.
pub mod job;
/// Section markers.
pub mod marker;
/// Record-set merge.
pub mod merge;
/// Data row to record mapping.
pub mod record;
/// Section state machine.
pub mod section;
/// Statistics table with derived tag lists.
pub mod stats;

pub use classify::{classify, RowKind};
pub use collapse::{collapse_row, collapse_sheet};
pub use defaults::{apply_defaults, DefaultPolicy};
pub use error::{JobError, JobResult};
pub use extract::{extract_book, extract_rows, extract_sheet, SheetResult, WorkbookResult};
pub use job::{
    run_batch, BatchReport, JobReport, JobSpec, JobSummary, Layout, RankingsJob, RawStatsJob,
    StockInfoJob,
};
pub use marker::{Marker, MarkerSet};
pub use merge::{merge_record_sets, FieldRename, RecordSet};
pub use record::{build_record, capture_header, MappedRow};
pub use section::{SectionState, Transition};
pub use stats::{StatsOptions, StatsRow, StatsTable};
