//! Dataset loading and queries
//!
//! Holds the transaction records and field definitions loaded through the
//! data source, and materializes the row order an ordering token describes.
//! The list view never sorts rows itself; it hands its sort state to
//! [`Dataset::transactions`].

use crate::error::CoreError;
use crate::list::{SortOrder, SortState};
use crate::models::{Amount, FieldDefinition, Transaction, TxnType};
use flowlist_config::Config;
use flowlist_data::{AmountRecord, FieldRecord, SourceRef, TransactionRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::RwLock;

/// The loaded list data
#[derive(Debug, Default)]
struct ListData {
    transactions: Vec<Transaction>,
    fields: Vec<FieldDefinition>,
}

/// Dataset summary for the JSON API
#[derive(Debug, Serialize, Deserialize)]
pub struct ListSummary {
    pub total_transactions: usize,
    pub total_fields: usize,
    /// Distinct currency codes in first-seen order
    pub currencies: Vec<String>,
}

/// Main dataset structure
pub struct Dataset {
    config: Config,
    source: SourceRef,
    data: RwLock<ListData>,
    entry: Option<PathBuf>,
}

impl Dataset {
    /// Create a new dataset with config and data source
    pub fn new(config: Config, source: SourceRef) -> Self {
        Self {
            config,
            source,
            data: RwLock::new(ListData::default()),
            entry: None,
        }
    }

    /// The config this dataset was created with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load records from a data file
    pub async fn load(&mut self, path: PathBuf) -> Result<(), CoreError> {
        let file = self
            .source
            .load_file(path.clone())
            .await
            .map_err(|e| CoreError::LoadFailed {
                message: e.to_string(),
            })?;

        let transactions: Vec<Transaction> = file
            .transactions
            .into_iter()
            .map(convert_transaction)
            .collect();
        let fields: Vec<FieldDefinition> = file.fields.into_iter().map(convert_field).collect();

        log::info!(
            "Loaded {} transactions and {} field definitions from {}",
            transactions.len(),
            fields.len(),
            path.display()
        );

        let mut data = self.data.write().unwrap();
        data.transactions = transactions;
        data.fields = fields;
        drop(data);

        self.entry = Some(path);
        Ok(())
    }

    /// Reload from the previously loaded data file
    pub async fn reload(&mut self) -> Result<(), CoreError> {
        match self.entry.clone() {
            Some(path) => self.load(path).await,
            None => Err(CoreError::NotLoaded),
        }
    }

    /// Get all transactions in the order the sort state describes
    ///
    /// Unsorted state returns file order. Ties keep their relative file
    /// order (stable sort).
    pub fn transactions(&self, sort: &SortState) -> Vec<Transaction> {
        let data = self.data.read().unwrap();
        let mut transactions = data.transactions.clone();
        if let Some(key) = sort.key() {
            transactions.sort_by(|a, b| compare_by_field(a, b, &key.field));
            if key.order == SortOrder::Descending {
                transactions.reverse();
            }
        }
        transactions
    }

    /// Get a transaction by id
    pub fn transaction(&self, id: &str) -> Option<Transaction> {
        let data = self.data.read().unwrap();
        data.transactions.iter().find(|t| t.id == id).cloned()
    }

    /// Get total transaction count
    pub fn transaction_count(&self) -> usize {
        self.data.read().unwrap().transactions.len()
    }

    /// Get all transaction ids in file order
    pub fn transaction_ids(&self) -> Vec<String> {
        let data = self.data.read().unwrap();
        data.transactions.iter().map(|t| t.id.clone()).collect()
    }

    /// Get the field definitions in file order
    pub fn fields(&self) -> Vec<FieldDefinition> {
        self.data.read().unwrap().fields.clone()
    }

    /// Distinct currency codes in first-seen order
    pub fn currencies(&self) -> Vec<String> {
        let data = self.data.read().unwrap();
        let mut codes: Vec<String> = Vec::new();
        for txn in &data.transactions {
            if let Some(total) = &txn.total {
                if !codes.contains(&total.currency_code) {
                    codes.push(total.currency_code.clone());
                }
            }
        }
        codes
    }

    /// Get a dataset summary
    pub fn summary(&self) -> ListSummary {
        ListSummary {
            total_transactions: self.transaction_count(),
            total_fields: self.fields().len(),
            currencies: self.currencies(),
        }
    }
}

/// Row comparison for one field code
///
/// Totals compare numerically; everything else compares by its display
/// form, case-insensitively. Absent values sort as empty strings (first
/// ascending).
fn compare_by_field(a: &Transaction, b: &Transaction, field: &str) -> Ordering {
    match field {
        "total" => a
            .total_value()
            .partial_cmp(&b.total_value())
            .unwrap_or(Ordering::Equal),
        _ => a
            .attribute(field)
            .to_lowercase()
            .cmp(&b.attribute(field).to_lowercase()),
    }
}

// ==================== Record Conversion ====================

fn convert_amount(record: AmountRecord) -> Amount {
    Amount {
        value: record.value,
        currency_code: record.currency_code,
    }
}

fn convert_transaction(record: TransactionRecord) -> Transaction {
    let txn_type = record.txn_type.parse().unwrap_or_else(|_| {
        if !record.txn_type.is_empty() {
            log::warn!(
                "Transaction {} has unknown type tag '{}', treating as other",
                record.id,
                record.txn_type
            );
        }
        TxnType::Other
    });

    Transaction {
        id: record.id,
        name: record.name,
        merchant: record.merchant,
        issued_at: record.issued_at,
        total: record.total.map(convert_amount),
        converted_total: record.converted_total.map(convert_amount),
        project: record.project,
        category: record.category,
        files: record.files,
        txn_type,
        extra: record.extra,
    }
}

fn convert_field(record: FieldRecord) -> FieldDefinition {
    FieldDefinition {
        code: record.code,
        name: record.name,
        visible: record.visible,
        extra: record.extra,
    }
}

// ==================== Tests ====================
