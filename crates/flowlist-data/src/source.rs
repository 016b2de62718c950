//! JSON data source implementation

use crate::error::DataError;
use crate::records::DataFile;
use crate::DataSourceTrait;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;

/// Default data source: a single JSON file on disk
#[derive(Debug, Default)]
pub struct JsonDataSource;

#[async_trait]
impl DataSourceTrait for JsonDataSource {
    async fn load(&self, content: &str) -> Result<DataFile, DataError> {
        let file: DataFile = serde_json::from_str(content)?;
        validate(&file)?;
        Ok(file)
    }

    async fn load_file(&self, path: PathBuf) -> Result<DataFile, DataError> {
        let content = tokio::fs::read_to_string(&path).await?;
        self.load(&content).await
    }
}

/// Validate loaded records before handing them to the core crate
fn validate(file: &DataFile) -> Result<(), DataError> {
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, txn) in file.transactions.iter().enumerate() {
        if txn.id.trim().is_empty() {
            return Err(DataError::MissingId { index });
        }
        if !seen.insert(txn.id.as_str()) {
            return Err(DataError::DuplicateId {
                id: txn.id.clone(),
            });
        }
        if !txn.issued_at.is_empty()
            && chrono::NaiveDate::parse_from_str(&txn.issued_at, "%Y-%m-%d").is_err()
        {
            return Err(DataError::InvalidDate {
                id: txn.id.clone(),
                value: txn.issued_at.clone(),
            });
        }
    }

    for (index, field) in file.fields.iter().enumerate() {
        if field.code.trim().is_empty() {
            return Err(DataError::MissingFieldCode { index });
        }
    }

    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn load(content: &str) -> Result<DataFile, DataError> {
        let source = JsonDataSource;
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(source.load(content))
    }

    #[test]
    fn test_load_minimal_file() {
        let file = load(
            r#"{
                "transactions": [
                    {"id": "t1", "name": "Coffee", "merchant": "Cafe", "issuedAt": "2024-06-15",
                     "total": {"value": -4.50, "currencyCode": "USD"}, "type": "expense"}
                ],
                "fields": [
                    {"code": "name", "name": "Name"},
                    {"code": "custom1", "name": "Cost center", "extra": true}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(file.transactions.len(), 1);
        assert_eq!(file.transactions[0].total.as_ref().unwrap().currency_code, "USD");
        assert_eq!(file.fields.len(), 2);
        assert!(file.fields[0].visible);
        assert!(file.fields[1].extra);
    }

    #[test]
    fn test_optional_fields_default() {
        let file = load(r#"{"transactions": [{"id": "t1"}], "fields": []}"#).unwrap();
        let txn = &file.transactions[0];
        assert!(txn.total.is_none());
        assert!(txn.converted_total.is_none());
        assert!(txn.project.is_none());
        assert!(txn.files.is_empty());
        assert!(txn.extra.is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = load(
            r#"{"transactions": [{"id": "t1"}, {"id": "t1"}], "fields": []}"#,
        );
        assert!(matches!(result, Err(DataError::DuplicateId { id }) if id == "t1"));
    }

    #[test]
    fn test_blank_id_rejected() {
        let result = load(r#"{"transactions": [{"id": "  "}], "fields": []}"#);
        assert!(matches!(result, Err(DataError::MissingId { index: 0 })));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let result = load(
            r#"{"transactions": [{"id": "t1", "issuedAt": "15/06/2024"}], "fields": []}"#,
        );
        assert!(matches!(result, Err(DataError::InvalidDate { .. })));
    }

    #[test]
    fn test_blank_field_code_rejected() {
        let result = load(r#"{"transactions": [], "fields": [{"code": ""}]}"#);
        assert!(matches!(result, Err(DataError::MissingFieldCode { index: 0 })));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = load("{not json");
        assert!(matches!(result, Err(DataError::InvalidJson(_))));
    }
}
