use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing sheets
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Unknown text encoding: {label}")]
    UnknownEncoding { label: String },

    #[error("Input is not valid {encoding}")]
    Decode { encoding: String },

    #[error("No encodings to try for {path}")]
    NoEncodings { path: PathBuf },

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
