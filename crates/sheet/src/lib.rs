//! Sheet/Book module for sheetsift
//!
//! Reads workbooks and delimited text tables into a small cell model and
//! writes JSON outputs.
//!
//! # Examples
//!
//! ## Creating a sheet from data
//!
//! ```
//! use sheetsift_sheet::{CellValue, Sheet};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["代號", "名稱"],
//!     vec!["2330", "台積電"],
//! ]);
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.cell(1, 1), &CellValue::Text("台積電".to_string()));
//! ```
//!
//! ## Loading a Big5 CSV with a header
//!
//! ```no_run
//! use sheetsift_sheet::{CsvOptions, Sheet, TextEncoding};
//!
//! let options = CsvOptions::default()
//!     .with_headers(true)
//!     .with_encoding(TextEncoding::cp950());
//! let sheet = Sheet::from_csv_with_options("stats.csv", options).unwrap();
//! let records = sheet.to_records().unwrap();
//! ```
//!
//! ## Reading every worksheet of a workbook
//!
//! ```no_run
//! use sheetsift_sheet::Book;
//!
//! let book = Book::from_workbook("report.xlsx").unwrap();
//! for (name, sheet) in book.sheets() {
//!     println!("{name}: {} rows", sheet.row_count());
//! }
//! ```

mod book;
mod cell;
mod csv;
mod encoding;
mod error;
mod json;
mod sheet;
mod xlsx;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::{normalize_headers, CsvOptions};
/// Re-export text encodings.
pub use encoding::TextEncoding;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export JSON writers.
pub use json::{to_json_string, write_json, write_json_to, JsonStyle};
/// Re-export sheet types.
pub use sheet::{Record, Sheet};
