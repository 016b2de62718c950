//! Transactions page rendering - Full page endpoints
//!
//! Endpoints:
//! - page_transactions: Main transaction list page
//! - page_transaction_detail: Single transaction detail page

use crate::error::ApiError;
use crate::AppState;
use flowlist_core::{format_currency, Transaction, TxnType, ORDERING_PARAM};
use flowlist_utils::{escape_html, format_number};

/// Transaction list page
///
/// The table itself loads as an HTMX partial; the initial request carries
/// the view's current ordering token so a configured default sort applies
/// from the first render.
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
) -> axum::response::Html<String> {
    let view = state.view.read().await;
    let dataset = state.dataset.read().await;
    let summary = dataset.summary();

    let token_query = match view.sort().encode() {
        Some(token) => format!("?{}={}", ORDERING_PARAM, urlencoding::encode(&token)),
        None => String::new(),
    };

    let currencies = if summary.currencies.is_empty() {
        "-".to_string()
    } else {
        summary.currencies.join(", ")
    };

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>{}</h2>
            <button onclick='reloadData()' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200' title='Reload the data file'>
                Reload
            </button>
        </div>
        <div class='grid grid-cols-2 md:grid-cols-3 gap-3 mb-4'>
            <div class='bg-indigo-50 p-3 rounded-lg border border-indigo-100'><p class='text-xs text-indigo-600'>Transactions</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-purple-50 p-3 rounded-lg border border-purple-100'><p class='text-xs text-purple-600'>Columns</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100'><p class='text-xs text-green-600'>Currencies</p><p class='text-sm font-medium truncate'>{}</p></div>
        </div>
        <div id='transactions-content' hx-get='/transactions/list{}' hx-trigger='load' class='bg-white rounded-xl shadow-sm p-6'>
            <p class='text-gray-500 text-center'>Loading...</p>
        </div>
        <script>
        function reloadData() {{
            fetch('/api/reload', {{method: 'POST'}})
                .then(r => r.json())
                .then(data => {{
                    if (data.success) {{
                        window.location.reload();
                    }} else {{
                        alert('Reload failed: ' + data.message);
                    }}
                }})
                .catch(e => alert('Reload failed: ' + e));
        }}
        </script>"#,
        escape_html(&state.config.list.title),
        format_number(summary.total_transactions),
        format_number(summary.total_fields),
        escape_html(&currencies),
        token_query
    );

    axum::response::Html(crate::page_shell(
        &state.config.list.title,
        "/transactions",
        &inner_content,
    ))
}

/// Transaction detail page
pub async fn page_transaction_detail(
    state: axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> Result<axum::response::Html<String>, ApiError> {
    let dataset = state.dataset.read().await;
    let txn = dataset
        .transaction(&path.0)
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("transaction {}", path.0),
        })?;

    let inner_content = format!(
        r#"<div class='mb-4'>
            <a href='/transactions' class='text-sm text-indigo-600 hover:underline'>&larr; Back to list</a>
        </div>
        <h2 class='text-2xl font-bold mb-4'>{}</h2>
        <div class='bg-white rounded-xl shadow-sm p-6 max-w-2xl'>
            {}
        </div>"#,
        escape_html(&txn.name),
        render_transaction_detail(&txn)
    );

    Ok(axum::response::Html(crate::page_shell(
        &txn.name,
        "/transactions",
        &inner_content,
    )))
}

/// Render the attribute table for one transaction
pub fn render_transaction_detail(txn: &Transaction) -> String {
    let amount_class = match txn.txn_type {
        TxnType::Income => "text-green-600",
        TxnType::Expense => "text-red-600",
        TxnType::Other => "text-gray-600",
    };

    let total = match &txn.total {
        Some(total) => format!(
            "<span class='{}'>{}</span>",
            amount_class,
            escape_html(&format_currency(total.value, &total.currency_code))
        ),
        None => "-".to_string(),
    };
    let converted = match &txn.converted_total {
        Some(converted) => escape_html(&format_currency(converted.value, &converted.currency_code)),
        None => "-".to_string(),
    };

    let mut rows = vec![
        ("Merchant", escape_html(&txn.merchant)),
        ("Issue date", escape_html(&txn.issued_at)),
        ("Type", escape_html(&txn.txn_type.to_string())),
        ("Total", total),
        ("Converted total", converted),
        (
            "Project",
            escape_html(txn.project.as_deref().unwrap_or("-")),
        ),
        (
            "Category",
            escape_html(txn.category.as_deref().unwrap_or("-")),
        ),
    ];

    let files = if txn.files.is_empty() {
        "-".to_string()
    } else {
        txn.files
            .iter()
            .map(|file| format!("<div>{}</div>", escape_html(file)))
            .collect::<String>()
    };
    rows.push(("Files", files));

    let mut html = String::from("<dl class='space-y-3'>");
    for (label, value) in rows {
        html.push_str(&format!(
            r#"<div class='flex justify-between gap-4 border-b border-gray-100 pb-2'>
                <dt class='text-sm text-gray-500'>{}</dt>
                <dd class='text-sm text-right'>{}</dd>
            </div>"#,
            label, value
        ));
    }
    html.push_str("</dl>");

    if !txn.extra.is_empty() {
        let mut keys: Vec<&String> = txn.extra.keys().collect();
        keys.sort();
        html.push_str(
            "<div class='mt-4 pt-3 border-t border-gray-200'><h5 class='text-xs font-medium text-gray-500 mb-2'>Extra data</h5><dl class='space-y-2'>",
        );
        for key in keys {
            html.push_str(&format!(
                r#"<div class='flex justify-between gap-4'><dt class='text-xs text-gray-500 font-mono'>{}</dt><dd class='text-xs'>{}</dd></div>"#,
                escape_html(key),
                escape_html(&txn.extra[key])
            ));
        }
        html.push_str("</dl></div>");
    }

    html
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use flowlist_core::Amount;
    use std::collections::HashMap;

    #[test]
    fn test_detail_renders_optional_fields_as_placeholder() {
        let txn = Transaction {
            id: "t1".to_string(),
            name: "Bare".to_string(),
            merchant: String::new(),
            issued_at: "2024-06-15".to_string(),
            total: None,
            converted_total: None,
            project: None,
            category: None,
            files: vec![],
            txn_type: TxnType::Other,
            extra: HashMap::new(),
        };
        let html = render_transaction_detail(&txn);
        assert!(html.contains("Total"));
        assert!(html.contains("-"));
        assert!(!html.contains("Extra data"));
    }

    #[test]
    fn test_detail_renders_extra_mapping() {
        let txn = Transaction {
            id: "t1".to_string(),
            name: "With extras".to_string(),
            merchant: "Shop".to_string(),
            issued_at: "2024-06-15".to_string(),
            total: Some(Amount::new(-12.0, "USD")),
            converted_total: None,
            project: None,
            category: None,
            files: vec!["receipt.pdf".to_string()],
            txn_type: TxnType::Expense,
            extra: HashMap::from([("custom1".to_string(), "HQ".to_string())]),
        };
        let html = render_transaction_detail(&txn);
        assert!(html.contains("Extra data"));
        assert!(html.contains("custom1"));
        assert!(html.contains("HQ"));
        assert!(html.contains("receipt.pdf"));
        assert!(html.contains("text-red-600"));
    }
}
