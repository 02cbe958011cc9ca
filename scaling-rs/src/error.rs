use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScalingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),

    #[error("Column not found in CSV: {0}")]
    MissingColumn(String),

    #[error("Missing value in column {column} (row {row})")]
    MissingValue { column: String, row: usize },

    #[error("Invalid thread count: {0}")]
    InvalidThreadCount(i64),

    #[error("Insufficient data: need at least {min} samples, got {actual}")]
    InsufficientData { min: usize, actual: usize },

    #[error("No single-thread baseline for group ({key}, kernel={kernel})")]
    MissingBaseline { key: String, kernel: i64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScalingError>;
