use arrow::error::ArrowError;
use std::path::PathBuf;

/// Failures the dashboard pipeline can report.
///
/// Only `FileNotFound`, `Load` and `Schema` are expected in practice; each one
/// halts the pipeline before anything is rendered.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The dataset file does not exist.
    #[error("{} not found", .path.display())]
    FileNotFound { path: PathBuf },

    /// The dataset exists but could not be read or parsed.
    #[error("failed to load {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },

    /// The table lacks a column the pipeline needs.
    #[error("schema error: {0}")]
    Schema(String),

    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// The preview rows could not be turned into JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A year range whose lower bound exceeds its upper bound.
    #[error("invalid year range {min}..={max}")]
    InvalidRange { min: i32, max: i32 },
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
