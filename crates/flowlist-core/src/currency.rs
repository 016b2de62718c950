//! Per-currency aggregation and amount display
//!
//! Sums are grouped by currency code in the order each code is first
//! encountered in the transaction list. Amounts are summed exactly as
//! signed in the data; the income/expense sign convention belongs to
//! whoever produced the records.

use crate::models::Transaction;
use flowlist_utils::format_number;

/// Signed sum of transaction totals grouped by currency code
pub fn net_total_per_currency(transactions: &[Transaction]) -> Vec<(String, f64)> {
    accumulate(transactions, |v| v)
}

/// Sum of absolute transaction magnitudes grouped by currency code
pub fn turnover_per_currency(transactions: &[Transaction]) -> Vec<(String, f64)> {
    accumulate(transactions, f64::abs)
}

fn accumulate(transactions: &[Transaction], map: fn(f64) -> f64) -> Vec<(String, f64)> {
    let mut sums: Vec<(String, f64)> = Vec::new();
    for txn in transactions {
        let total = match &txn.total {
            Some(total) => total,
            None => continue,
        };
        match sums.iter_mut().find(|(code, _)| code == &total.currency_code) {
            Some((_, sum)) => *sum += map(total.value),
            None => sums.push((total.currency_code.clone(), map(total.value))),
        }
    }
    sums
}

/// Format an amount for display: grouped digits, two decimal places,
/// currency code suffix
pub fn format_currency(value: f64, currency_code: &str) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = format_number(int_part);
    if currency_code.is_empty() {
        format!("{}{}.{}", sign, grouped, frac_part)
    } else {
        format!("{}{}.{} {}", sign, grouped, frac_part, currency_code)
    }
}

// ==================== Tests ====================
