//! Field renderer registry
//!
//! Maps a field code to its column rendering strategy: display label,
//! sortability, an optional cell formatter, and an optional footer
//! aggregator. Unknown codes fall back to a plain non-sortable column;
//! that is not a failure.

use crate::currency::{format_currency, net_total_per_currency, turnover_per_currency};
use crate::models::{FieldDefinition, Transaction, TxnType};

/// A typed cell display value
///
/// The api crate turns this into markup; core stays HTML-free.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellValue {
    /// Primary display text
    pub text: String,
    /// Text color class, empty when the cell has no special treatment
    pub class: &'static str,
    /// Optional second display line (e.g., a converted amount)
    pub secondary: Option<String>,
}

impl CellValue {
    /// Plain text cell with no class or secondary line
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: "",
            secondary: None,
        }
    }

    /// Empty cell
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the cell displays nothing at all
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.secondary.is_none()
    }
}

/// One footer row for a single currency
#[derive(Debug, Clone, PartialEq)]
pub struct FooterLine {
    pub currency_code: String,
    /// Signed sum of totals in this currency
    pub net: f64,
    /// Sum of absolute magnitudes in this currency
    pub turnover: f64,
}

/// Column footer summary, one line per distinct currency in first-seen order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FooterSummary {
    pub lines: Vec<FooterLine>,
}

/// Cell formatter: pure function of a single transaction
pub type CellFormatter = fn(&Transaction) -> CellValue;

/// Footer aggregator: pure function of the full transaction list
pub type FooterAggregator = fn(&[Transaction]) -> FooterSummary;

/// Rendering strategy for one column
#[derive(Clone)]
pub struct FieldRenderer {
    /// Field code this renderer is bound to
    pub code: String,
    /// Column header label
    pub label: String,
    /// Whether the column responds to sort triggers
    pub sortable: bool,
    /// Optional cell formatter; without one the cell falls back to the
    /// transaction attribute matching the field code
    pub format: Option<CellFormatter>,
    /// Optional footer aggregator
    pub footer: Option<FooterAggregator>,
}

impl FieldRenderer {
    fn standard(code: &str, label: &str, sortable: bool) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            sortable,
            format: None,
            footer: None,
        }
    }

    fn with_format(mut self, format: CellFormatter) -> Self {
        self.format = Some(format);
        self
    }

    fn with_footer(mut self, footer: FooterAggregator) -> Self {
        self.footer = Some(footer);
        self
    }
}

/// Resolve the renderer for a field definition
///
/// Standard codes get their preconfigured renderer; anything else gets a
/// fallback renderer carrying the definition's display name.
pub fn renderer_for(field: &FieldDefinition) -> FieldRenderer {
    match field.code.as_str() {
        "name" => FieldRenderer::standard("name", "Name", true),
        "merchant" => FieldRenderer::standard("merchant", "Merchant", true),
        "issuedAt" => FieldRenderer::standard("issuedAt", "Issue date", true),
        "project" => FieldRenderer::standard("project", "Project", true),
        "category" => FieldRenderer::standard("category", "Category", true),
        "files" => FieldRenderer::standard("files", "Files", false).with_format(format_files),
        "total" => FieldRenderer::standard("total", "Total", true)
            .with_format(format_total)
            .with_footer(total_footer),
        "convertedTotal" => FieldRenderer::standard("convertedTotal", "Converted total", false)
            .with_format(format_converted_total),
        "currencyCode" => FieldRenderer::standard("currencyCode", "Currency", true),
        _ => FieldRenderer {
            code: field.code.clone(),
            label: field.name.clone(),
            sortable: false,
            format: None,
            footer: None,
        },
    }
}

// ==================== Standard Formatters ====================

/// Text color class for an amount, keyed by transaction type
fn amount_class(txn_type: TxnType) -> &'static str {
    match txn_type {
        TxnType::Income => "text-green-600",
        TxnType::Expense => "text-red-600",
        TxnType::Other => "text-gray-600",
    }
}

/// Total cell: native amount colored by type, converted amount on a second
/// line only when it exists in a different currency
fn format_total(txn: &Transaction) -> CellValue {
    let total = match &txn.total {
        Some(total) => total,
        None => return CellValue::empty(),
    };

    let secondary = txn
        .converted_total
        .as_ref()
        .filter(|converted| converted.currency_code != total.currency_code)
        .map(|converted| format_currency(converted.value, &converted.currency_code));

    CellValue {
        text: format_currency(total.value, &total.currency_code),
        class: amount_class(txn.txn_type),
        secondary,
    }
}

/// Converted-total cell: formatted amount, empty when absent
fn format_converted_total(txn: &Transaction) -> CellValue {
    match &txn.converted_total {
        Some(converted) => CellValue::text(format_currency(converted.value, &converted.currency_code)),
        None => CellValue::empty(),
    }
}

/// Files cell: attachment count summary, empty when there are none
fn format_files(txn: &Transaction) -> CellValue {
    match txn.attachment_count() {
        0 => CellValue::empty(),
        1 => CellValue::text("1 file"),
        n => CellValue::text(format!("{} files", n)),
    }
}

/// Total column footer: per-currency net and turnover in first-seen order
fn total_footer(transactions: &[Transaction]) -> FooterSummary {
    let net = net_total_per_currency(transactions);
    let turnover = turnover_per_currency(transactions);

    let lines = net
        .into_iter()
        .map(|(currency_code, net_sum)| {
            let turnover_sum = turnover
                .iter()
                .find(|(code, _)| code == &currency_code)
                .map(|(_, sum)| *sum)
                .unwrap_or(0.0);
            FooterLine {
                currency_code,
                net: net_sum,
                turnover: turnover_sum,
            }
        })
        .collect();

    FooterSummary { lines }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;
    use std::collections::HashMap;

    fn txn_with(total: Option<Amount>, converted: Option<Amount>, txn_type: TxnType) -> Transaction {
        Transaction {
            id: "t1".to_string(),
            name: "Lunch".to_string(),
            merchant: "Bistro".to_string(),
            issued_at: "2024-06-15".to_string(),
            total,
            converted_total: converted,
            project: None,
            category: None,
            files: vec![],
            txn_type,
            extra: HashMap::new(),
        }
    }

    #[test]
    fn test_standard_codes_resolve() {
        for code in [
            "name",
            "merchant",
            "issuedAt",
            "project",
            "category",
            "files",
            "total",
            "convertedTotal",
            "currencyCode",
        ] {
            let renderer = renderer_for(&FieldDefinition::standard(code, "ignored"));
            assert_eq!(renderer.code, code);
            assert_ne!(renderer.label, "ignored");
        }
    }

    #[test]
    fn test_unknown_code_falls_back() {
        let field = FieldDefinition::extra("custom1", "Cost center");
        let renderer = renderer_for(&field);
        assert_eq!(renderer.code, "custom1");
        assert_eq!(renderer.label, "Cost center");
        assert!(!renderer.sortable);
        assert!(renderer.format.is_none());
        assert!(renderer.footer.is_none());
    }

    #[test]
    fn test_total_formatter_colors_by_type() {
        let income = txn_with(Some(Amount::new(100.0, "USD")), None, TxnType::Income);
        let expense = txn_with(Some(Amount::new(-50.0, "USD")), None, TxnType::Expense);
        assert_eq!(format_total(&income).class, "text-green-600");
        assert_eq!(format_total(&expense).class, "text-red-600");
    }

    #[test]
    fn test_total_formatter_appends_converted_only_when_currency_differs() {
        let converted = txn_with(
            Some(Amount::new(100.0, "USD")),
            Some(Amount::new(92.0, "EUR")),
            TxnType::Income,
        );
        let cell = format_total(&converted);
        assert_eq!(cell.text, "100.00 USD");
        assert_eq!(cell.secondary.as_deref(), Some("92.00 EUR"));

        let same_currency = txn_with(
            Some(Amount::new(100.0, "USD")),
            Some(Amount::new(100.0, "USD")),
            TxnType::Income,
        );
        assert!(format_total(&same_currency).secondary.is_none());
    }

    #[test]
    fn test_total_formatter_degrades_when_absent() {
        let cell = format_total(&txn_with(None, None, TxnType::Expense));
        assert!(cell.is_empty());
    }

    #[test]
    fn test_files_formatter() {
        let mut txn = txn_with(None, None, TxnType::Other);
        assert!(format_files(&txn).is_empty());
        txn.files.push("a.pdf".to_string());
        assert_eq!(format_files(&txn).text, "1 file");
        txn.files.push("b.pdf".to_string());
        assert_eq!(format_files(&txn).text, "2 files");
    }

    #[test]
    fn test_total_footer_lines() {
        let txns = vec![
            txn_with(Some(Amount::new(100.0, "USD")), None, TxnType::Income),
            txn_with(Some(Amount::new(-40.0, "USD")), None, TxnType::Expense),
            txn_with(Some(Amount::new(50.0, "EUR")), None, TxnType::Income),
        ];
        let summary = total_footer(&txns);
        assert_eq!(summary.lines.len(), 2);
        let usd = summary
            .lines
            .iter()
            .find(|l| l.currency_code == "USD")
            .unwrap();
        assert_eq!(usd.net, 60.0);
        assert_eq!(usd.turnover, 140.0);
        let eur = summary
            .lines
            .iter()
            .find(|l| l.currency_code == "EUR")
            .unwrap();
        assert_eq!(eur.net, 50.0);
        assert_eq!(eur.turnover, 50.0);
    }
}
