use thiserror::Error;

/// Failures surfaced by snapshot persistence. Searching and ingestion never fail.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot is not valid JSON or lacks a required field.
    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Snapshot parsed but its contents contradict each other.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
