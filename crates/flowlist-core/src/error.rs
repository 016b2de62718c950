//! Error types for flowlist-core

use thiserror::Error;

/// Core error type
///
/// The list view itself raises no errors: renderer lookup and extra-field
/// access are total functions with defined fallbacks. Only dataset loading
/// can fail.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No data file has been loaded")]
    NotLoaded,

    #[error("Failed to load data file: {message}")]
    LoadFailed { message: String },
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
