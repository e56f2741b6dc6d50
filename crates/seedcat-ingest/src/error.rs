use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while opening the source spreadsheet. Any of these
/// aborts the run before a single row is processed.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source spreadsheet unavailable at {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("source spreadsheet {path} contains no sheets")]
    EmptyWorkbook { path: PathBuf },

    #[error("failed to read sheet '{sheet}' from {path}: {reason}")]
    Sheet {
        path: PathBuf,
        sheet: String,
        reason: String,
    },
}

/// Why a single row was skipped. Rejections are counted, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("row {row}: product name is missing or blank")]
    MissingProductName { row: usize },
}

impl RowRejection {
    #[must_use]
    pub fn row(&self) -> usize {
        match self {
            RowRejection::MissingProductName { row } => *row,
        }
    }
}
