use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file format '.{extension}' (expected .xlsx, .xls, .csv, or .txt)")]
    UnsupportedFormat { extension: String },

    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("required column '{column}' is missing")]
    MissingColumn { column: &'static str },

    #[error("data row {row} invalid in column '{column}': {message}")]
    Row {
        row: usize,
        column: &'static str,
        message: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook contains no worksheets")]
    EmptyWorkbook,
}

impl LoadError {
    /// True for failures caused by the file's contents rather than by
    /// its location or format dispatch.
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            LoadError::MissingColumn { .. }
                | LoadError::Row { .. }
                | LoadError::Csv(_)
                | LoadError::Workbook(_)
                | LoadError::EmptyWorkbook
        )
    }
}
