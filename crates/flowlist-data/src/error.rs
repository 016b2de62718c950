//! Error types for flowlist-data

use thiserror::Error;

/// Data file loading error type
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read data file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON in data file: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Transaction at index {index} has no id")]
    MissingId { index: usize },

    #[error("Duplicate transaction id: {id}")]
    DuplicateId { id: String },

    #[error("Transaction {id} has an invalid issue date: {value}")]
    InvalidDate { id: String, value: String },

    #[error("Field definition at index {index} has no code")]
    MissingFieldCode { index: usize },
}

/// Result type with DataError
pub type DataResult<T> = Result<T, DataError>;
