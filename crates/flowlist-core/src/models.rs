//! Core data models for the transaction list

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Transaction type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
    /// Anything else (transfers, adjustments)
    Other,
}

impl Default for TxnType {
    fn default() -> Self {
        TxnType::Other
    }
}

impl std::str::FromStr for TxnType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            "other" => Ok(TxnType::Other),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxnType::Income => write!(f, "income"),
            TxnType::Expense => write!(f, "expense"),
            TxnType::Other => write!(f, "other"),
        }
    }
}

/// A monetary amount paired with its currency code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    /// Signed numeric value
    pub value: f64,
    /// Currency code (e.g., "USD")
    pub currency_code: String,
}

impl Amount {
    /// Create a new amount
    pub fn new(value: f64, currency_code: &str) -> Self {
        Self {
            value,
            currency_code: currency_code.to_string(),
        }
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.currency_code.is_empty() {
            write!(f, "{:.2}", self.value)
        } else {
            write!(f, "{:.2} {}", self.value, self.currency_code)
        }
    }
}

/// Transaction information
///
/// Every attribute beyond the identifier may be absent for display
/// purposes: a missing value renders as an empty cell, never as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Transaction name
    pub name: String,
    /// Merchant name
    pub merchant: String,
    /// Issue date (YYYY-MM-DD format)
    pub issued_at: String,
    /// Monetary total in the native currency
    pub total: Option<Amount>,
    /// Total converted into another currency, when available
    pub converted_total: Option<Amount>,
    /// Project reference
    pub project: Option<String>,
    /// Category reference
    pub category: Option<String>,
    /// Attached file names
    pub files: Vec<String>,
    /// Type tag
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    /// Open-ended extra data keyed by custom field codes
    pub extra: HashMap<String, String>,
}

impl Transaction {
    /// Get the issue date as NaiveDate
    pub fn issued_at_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.issued_at, "%Y-%m-%d").ok()
    }

    /// Get the signed total value, or 0.0 when no total is recorded
    pub fn total_value(&self) -> f64 {
        self.total.as_ref().map(|a| a.value).unwrap_or(0.0)
    }

    /// Get an extra-data value by field code
    ///
    /// An absent key yields an empty string, not an error.
    pub fn extra_value(&self, code: &str) -> String {
        self.extra.get(code).cloned().unwrap_or_default()
    }

    /// Get the display form of a standard attribute by field code
    ///
    /// Unknown codes and absent optional attributes yield an empty string.
    pub fn attribute(&self, code: &str) -> String {
        match code {
            "name" => self.name.clone(),
            "merchant" => self.merchant.clone(),
            "issuedAt" => self.issued_at.clone(),
            "project" => self.project.clone().unwrap_or_default(),
            "category" => self.category.clone().unwrap_or_default(),
            "files" => self.files.join(", "),
            "total" => self.total.as_ref().map(|a| a.to_string()).unwrap_or_default(),
            "convertedTotal" => self
                .converted_total
                .as_ref()
                .map(|a| a.to_string())
                .unwrap_or_default(),
            "currencyCode" => self
                .total
                .as_ref()
                .map(|a| a.currency_code.clone())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// Number of attached files
    pub fn attachment_count(&self) -> usize {
        self.files.len()
    }
}

/// Column (field) definition for the list view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field code (a standard attribute code or an extra-data key)
    pub code: String,
    /// Display name
    pub name: String,
    /// Whether the column is shown
    pub visible: bool,
    /// Whether the value comes from the transaction's extra-data mapping
    pub extra: bool,
}

impl FieldDefinition {
    /// Create a visible standard-field definition
    pub fn standard(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            visible: true,
            extra: false,
        }
    }

    /// Create a visible extra-field definition
    pub fn extra(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            visible: true,
            extra: true,
        }
    }
}

/// JSON API response for the transaction list
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    /// The ordering token the rows were materialized under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            id: "t1".to_string(),
            name: "Team lunch".to_string(),
            merchant: "Bistro".to_string(),
            issued_at: "2024-06-15".to_string(),
            total: Some(Amount::new(-42.0, "USD")),
            converted_total: Some(Amount::new(-38.5, "EUR")),
            project: Some("apollo".to_string()),
            category: None,
            files: vec!["receipt.pdf".to_string()],
            txn_type: TxnType::Expense,
            extra: HashMap::from([("custom1".to_string(), "HQ".to_string())]),
        }
    }

    #[test]
    fn test_txn_type_from_str() {
        assert_eq!("income".parse::<TxnType>().unwrap(), TxnType::Income);
        assert_eq!("Expense".parse::<TxnType>().unwrap(), TxnType::Expense);
        assert_eq!("other".parse::<TxnType>().unwrap(), TxnType::Other);
        assert!("transfer".parse::<TxnType>().is_err());
    }

    #[test]
    fn test_extra_value_absent_key_is_empty() {
        let txn = sample();
        assert_eq!(txn.extra_value("custom1"), "HQ");
        assert_eq!(txn.extra_value("custom2"), "");
    }

    #[test]
    fn test_attribute_lookup() {
        let txn = sample();
        assert_eq!(txn.attribute("name"), "Team lunch");
        assert_eq!(txn.attribute("merchant"), "Bistro");
        assert_eq!(txn.attribute("issuedAt"), "2024-06-15");
        assert_eq!(txn.attribute("project"), "apollo");
        assert_eq!(txn.attribute("currencyCode"), "USD");
        assert_eq!(txn.attribute("nonsense"), "");
    }

    #[test]
    fn test_attribute_absent_optionals_degrade_to_empty() {
        let mut txn = sample();
        txn.total = None;
        txn.converted_total = None;
        txn.category = None;
        txn.files.clear();
        assert_eq!(txn.attribute("total"), "");
        assert_eq!(txn.attribute("convertedTotal"), "");
        assert_eq!(txn.attribute("category"), "");
        assert_eq!(txn.attribute("files"), "");
        assert_eq!(txn.attribute("currencyCode"), "");
        assert_eq!(txn.total_value(), 0.0);
    }

    #[test]
    fn test_issued_at_naive() {
        let txn = sample();
        assert!(txn.issued_at_naive().is_some());
        let mut bad = sample();
        bad.issued_at = "yesterday".to_string();
        assert!(bad.issued_at_naive().is_none());
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::new(1234.5, "USD").to_string(), "1234.50 USD");
        assert_eq!(Amount::new(-3.0, "EUR").to_string(), "-3.00 EUR");
    }
}
