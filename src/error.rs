use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("Worksheet not found: {0}")]
    MissingSheet(String),

    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// `row` is the 1-based line in the source file, header included.
    #[error("Invalid value in row {row}, column '{column}': {value:?}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;
