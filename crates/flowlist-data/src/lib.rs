//! Transaction data file loading
//!
//! Reads the JSON data file that supplies the transaction records and the
//! column (field) definitions for the list view.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod records;
pub mod source;

pub use error::{DataError, DataResult};
pub use records::{AmountRecord, DataFile, FieldRecord, TransactionRecord};
pub use source::JsonDataSource;

/// Data source reference type
pub type SourceRef = Arc<dyn DataSourceTrait>;

/// Trait for transaction data sources
#[async_trait]
pub trait DataSourceTrait: Send + Sync {
    /// Parse data file content and return validated records
    async fn load(&self, content: &str) -> Result<DataFile, DataError>;

    /// Load and parse a data file from a path
    async fn load_file(&self, path: PathBuf) -> Result<DataFile, DataError>;
}
