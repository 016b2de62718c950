//! Raw record types for the transaction data file
//!
//! These mirror the JSON shape of the data file one-to-one. The core crate
//! converts them into its own model types after loading.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A monetary amount paired with its currency code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountRecord {
    /// Signed numeric value
    pub value: f64,
    /// ISO-style currency code (e.g., "USD")
    pub currency_code: String,
}

/// One transaction entry in the data file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Unique transaction identifier
    pub id: String,
    /// Transaction name
    #[serde(default)]
    pub name: String,
    /// Merchant name
    #[serde(default)]
    pub merchant: String,
    /// Issue date (YYYY-MM-DD)
    #[serde(default)]
    pub issued_at: String,
    /// Monetary total in the native currency
    #[serde(default)]
    pub total: Option<AmountRecord>,
    /// Total converted into another currency, when available
    #[serde(default)]
    pub converted_total: Option<AmountRecord>,
    /// Project reference
    #[serde(default)]
    pub project: Option<String>,
    /// Category reference
    #[serde(default)]
    pub category: Option<String>,
    /// Attached file names
    #[serde(default)]
    pub files: Vec<String>,
    /// Type tag: "income", "expense", or "other"
    #[serde(default, rename = "type")]
    pub txn_type: String,
    /// Open-ended extra data keyed by custom field codes
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

/// One column definition in the data file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Field code (a standard attribute code or an extra-data key)
    pub code: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Whether the column is shown
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Whether the value comes from the extra-data mapping
    #[serde(default)]
    pub extra: bool,
}

fn default_visible() -> bool {
    true
}

/// The parsed content of a data file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    /// Transaction entries in file order
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    /// Column definitions in file order
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
}
