//! Error types for batch jobs.

use sheetsift_sheet::SheetError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for job operations.
pub type JobResult<T> = Result<T, JobError>;

/// Why a job produced no output.
#[derive(Debug, Error)]
pub enum JobError {
    /// Input missing, unreadable, not decodable, or not a workbook.
    #[error("cannot read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: SheetError,
    },

    /// Input read but not shaped as the job expects.
    #[error("unexpected layout in {path}: {message}")]
    Structure { path: PathBuf, message: String },

    /// Output could not be serialized or written.
    #[error("cannot write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: SheetError,
    },
}

impl JobError {
    pub(crate) fn input(path: impl Into<PathBuf>, source: SheetError) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: SheetError) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// Short category name for summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Input { .. } => "input",
            Self::Structure { .. } => "structure",
            Self::Output { .. } => "output",
        }
    }
}
