//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Get transactions list (JSON)
//! - api_transaction_detail: Get single transaction (JSON)
//! - api_fields: Get field definitions (JSON)
//! - htmx_transactions_list: Transaction table (HTML fragment)
//! - htmx_toggle_row: Toggle one row in the selection
//! - htmx_toggle_all: Select all / select none
//! - htmx_bulk: Run a bulk action over the selection

use crate::error::ApiError;
use crate::AppState;
use axum::extract::Query;
use flowlist_core::{
    format_currency, CellValue, ListView, Selection, SortOrder, SortState, Transaction,
    TransactionsResponse, ORDERING_PARAM,
};
use flowlist_utils::escape_html;
use std::collections::HashMap;

/// Get transactions in token order (JSON API)
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let sort = SortState::parse(params.get(ORDERING_PARAM).map(|s| s.as_str()));
    let dataset = state.dataset.read().await;
    let transactions = dataset.transactions(&sort);

    let response = TransactionsResponse {
        total_count: transactions.len(),
        transactions,
        ordering: sort.encode(),
    };
    serde_json::to_string(&response).unwrap_or_default()
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(
    state: axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> Result<String, ApiError> {
    let dataset = state.dataset.read().await;
    match dataset.transaction(&path.0) {
        Some(txn) => Ok(serde_json::to_string(&txn).unwrap_or_default()),
        None => Err(ApiError::NotFound {
            resource: format!("transaction {}", path.0),
        }),
    }
}

/// Get field definitions (JSON API)
pub async fn api_fields(state: axum::extract::State<AppState>) -> String {
    let dataset = state.dataset.read().await;
    serde_json::to_string(&dataset.fields()).unwrap_or_default()
}

/// HTMX: the transaction table - partial page update
///
/// An `ordering` parameter syncs the sort state before rendering; without
/// the parameter the current state stands. Row order always comes from the
/// dataset query, never from the view.
pub async fn htmx_transactions_list(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let mut view = state.view.write().await;
    if let Some(token) = params.get(ORDERING_PARAM) {
        let token = if token.is_empty() {
            None
        } else {
            Some(token.as_str())
        };
        view.set_sort_token(token);
    }

    let dataset = state.dataset.read().await;
    let transactions = dataset.transactions(view.sort());
    render_table(&view, &transactions, state.config.list.highlight_incomplete)
}

/// HTMX: toggle one row in or out of the selection
///
/// The checkbox stops click propagation, so toggling never opens the row.
pub async fn htmx_toggle_row(
    state: axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> String {
    let mut view = state.view.write().await;
    view.toggle_row(&path.0);

    let dataset = state.dataset.read().await;
    let transactions = dataset.transactions(view.sort());
    render_table(&view, &transactions, state.config.list.highlight_incomplete)
}

/// HTMX: select every listed row, or clear when all are already selected
pub async fn htmx_toggle_all(state: axum::extract::State<AppState>) -> String {
    let mut view = state.view.write().await;
    let dataset = state.dataset.read().await;
    let transactions = dataset.transactions(view.sort());
    view.toggle_all(&transactions);
    render_table(&view, &transactions, state.config.list.highlight_incomplete)
}

/// HTMX: run a bulk action over the current selection
///
/// Completion resets the selection, whatever the action was.
pub async fn htmx_bulk(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<String, ApiError> {
    let action = params.get("action").map(|s| s.as_str()).unwrap_or("");

    let mut view = state.view.write().await;
    let dataset = state.dataset.read().await;
    let selected: Vec<Transaction> = view
        .selection()
        .ids()
        .iter()
        .filter_map(|id| dataset.transaction(id))
        .collect();

    let banner = match action {
        "export" => {
            let payload = serde_json::to_string(&selected).unwrap_or_default();
            log::info!(
                "Exported {} selected transactions ({} bytes)",
                selected.len(),
                payload.len()
            );
            format!(
                r#"<div class='mb-3 p-3 bg-green-50 border border-green-200 rounded-lg text-sm text-green-800'>Exported {} transactions ({} bytes)</div>"#,
                selected.len(),
                payload.len()
            )
        }
        "clear" => String::new(),
        _ => {
            return Err(ApiError::BadRequest {
                message: format!("Unknown bulk action: {}", action),
            })
        }
    };

    view.bulk_complete();
    let transactions = dataset.transactions(view.sort());
    Ok(format!(
        "{}{}",
        banner,
        render_table(&view, &transactions, state.config.list.highlight_incomplete)
    ))
}

// ==================== Table Rendering ====================

/// Render the full list table: bulk bar, sortable header, rows, footer
pub fn render_table(
    view: &ListView,
    transactions: &[Transaction],
    highlight_incomplete: bool,
) -> String {
    if view.columns().is_empty() {
        return "<div class='text-center py-12 text-gray-500'><p>No columns configured</p></div>"
            .to_string();
    }
    if transactions.is_empty() {
        return "<div class='text-center py-12 text-gray-500'><p>No transactions recorded</p></div>"
            .to_string();
    }

    let mut html = String::new();
    html.push_str(&render_bulk_bar(view.selection()));

    html.push_str("<table class='w-full text-sm' id='txn-table'><thead><tr class='border-b text-left text-gray-500'>");

    let all_selected = transactions
        .iter()
        .all(|txn| view.selection().contains(&txn.id));
    html.push_str(&format!(
        r#"<th class='w-8 px-2 py-2'><input type='checkbox' {} hx-post='/transactions/select-all' hx-target='#transactions-content'></th>"#,
        if all_selected { "checked" } else { "" }
    ));

    for column in view.columns() {
        let label = escape_html(&column.renderer.label);
        if column.renderer.sortable {
            let indicator = match view.sort().order_for(&column.renderer.code) {
                Some(SortOrder::Ascending) => " &#9650;",
                Some(SortOrder::Descending) => " &#9660;",
                None => "",
            };
            let href = match view.next_sort_token(&column.renderer.code) {
                Some(token) => format!(
                    "/transactions/list?{}={}",
                    ORDERING_PARAM,
                    urlencoding::encode(&token)
                ),
                None => "/transactions/list".to_string(),
            };
            html.push_str(&format!(
                r#"<th class='px-3 py-2'><a class='cursor-pointer hover:text-indigo-600' hx-get='{}' hx-target='#transactions-content'>{}{}</a></th>"#,
                href, label, indicator
            ));
        } else {
            html.push_str(&format!(r#"<th class='px-3 py-2'>{}</th>"#, label));
        }
    }
    html.push_str("</tr></thead><tbody>");

    for txn in transactions {
        let mut row_classes = vec!["border-b", "hover:bg-gray-50", "cursor-pointer"];
        if highlight_incomplete && view.is_incomplete(txn) {
            row_classes.push("row-incomplete");
        }
        if view.selection().contains(&txn.id) {
            row_classes.push("row-selected");
        }

        // The row body opens the detail view; the checkbox cell swallows
        // its clicks so selection and row-open stay separate gestures
        html.push_str(&format!(
            r#"<tr class='{}' onclick="window.location.href='/transactions/{}'">"#,
            row_classes.join(" "),
            urlencoding::encode(&txn.id)
        ));
        html.push_str(&format!(
            r#"<td class='px-2 py-2' onclick='event.stopPropagation()'><input type='checkbox' {} hx-post='/transactions/select/{}' hx-target='#transactions-content'></td>"#,
            if view.selection().contains(&txn.id) {
                "checked"
            } else {
                ""
            },
            urlencoding::encode(&txn.id)
        ));

        for column in view.columns() {
            html.push_str(&render_cell(&view.cell(column, txn)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody>");

    html.push_str(&render_footer(view, transactions));
    html.push_str("</table>");
    html
}

/// Render one cell: escaped text, optional color class and secondary line
fn render_cell(cell: &CellValue) -> String {
    let mut inner = if cell.class.is_empty() {
        escape_html(&cell.text)
    } else {
        format!(
            "<span class='{}'>{}</span>",
            cell.class,
            escape_html(&cell.text)
        )
    };
    if let Some(secondary) = &cell.secondary {
        inner.push_str(&format!(
            "<div class='text-xs text-gray-400'>{}</div>",
            escape_html(secondary)
        ));
    }
    format!("<td class='px-3 py-2'>{}</td>", inner)
}

/// Render the footer row when any column aggregates one
fn render_footer(view: &ListView, transactions: &[Transaction]) -> String {
    let summaries: Vec<_> = view
        .columns()
        .iter()
        .map(|column| view.footer(column, transactions))
        .collect();
    if summaries.iter().all(|summary| summary.is_none()) {
        return String::new();
    }

    let mut html =
        String::from("<tfoot><tr class='border-t font-medium'><td class='px-2 py-2'></td>");
    for summary in &summaries {
        match summary {
            Some(summary) => {
                let mut cell = String::new();
                for line in &summary.lines {
                    cell.push_str(&format!(
                        "<div>{} <span class='text-xs text-gray-400'>({} turnover)</span></div>",
                        escape_html(&format_currency(line.net, &line.currency_code)),
                        escape_html(&format_currency(line.turnover, &line.currency_code)),
                    ));
                }
                html.push_str(&format!("<td class='px-3 py-2'>{}</td>", cell));
            }
            None => html.push_str("<td class='px-3 py-2'></td>"),
        }
    }
    html.push_str("</tr></tfoot>");
    html
}

/// Render the bulk-action bar when the selection is non-empty
fn render_bulk_bar(selection: &Selection) -> String {
    if selection.is_empty() {
        return String::new();
    }
    format!(
        r#"<div class='flex items-center gap-3 mb-3 p-3 bg-indigo-50 border border-indigo-100 rounded-lg' id='bulk-bar'>
            <span class='text-sm text-indigo-700'>{} selected</span>
            <button hx-post='/transactions/bulk?action=export' hx-target='#transactions-content' class='px-3 py-1.5 text-sm bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Export</button>
            <button hx-post='/transactions/bulk?action=clear' hx-target='#transactions-content' class='px-3 py-1.5 text-sm border rounded-lg hover:bg-gray-50'>Clear selection</button>
        </div>"#,
        selection.len()
    )
}

// ==================== Tests ====================
