use thiserror::Error;

/// Errors reading rows from a [`RowSource`](crate::RowSource).
#[derive(Debug, Error)]
pub enum RowError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
    #[error("row source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, RowError>;
