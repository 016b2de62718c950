//! HTTP server for the transaction list view, with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: list table, sorting, selection, bulk actions,
//!   detail view
//! - routes::settings: configuration and column display
//!
//! Sort state travels in the `ordering` query parameter; every column
//! header link carries the re-encoded token for its next cycle state, so
//! navigation is the only way the sort changes.

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use flowlist_config::Config;
use flowlist_core::{Dataset, ListView, RequiredFieldsCheck, SortState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<RwLock<Dataset>>,
    pub view: Arc<RwLock<ListView>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::settings::{api_settings, page_settings};
    use routes::transactions::{
        api_fields, api_transaction_detail, api_transactions, htmx_bulk, htmx_toggle_all,
        htmx_toggle_row, htmx_transactions_list, page_transaction_detail, page_transactions,
    };

    Router::new()
        // JSON API endpoints
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/:id", get(api_transaction_detail))
        .route("/api/fields", get(api_fields))
        .route("/api/settings", get(api_settings))
        .route("/api/reload", post(api_reload))
        // Full pages
        .route("/", get(page_transactions))
        .route("/transactions", get(page_transactions))
        .route("/transactions/:id", get(page_transaction_detail))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/select-all", post(htmx_toggle_all))
        .route("/transactions/select/:id", post(htmx_toggle_row))
        .route("/transactions/bulk", post(htmx_bulk))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build the list view and serve the application
pub async fn start_server(
    config: Config,
    dataset: Arc<RwLock<Dataset>>,
) -> anyhow::Result<()> {
    let view = {
        let dataset_guard = dataset.read().await;
        let mut view = ListView::new(
            config.list.default_ordering.as_deref(),
            Arc::new(RequiredFieldsCheck),
        );
        view.set_fields(dataset_guard.fields());
        view
    };

    let state = AppState {
        dataset,
        view: Arc::new(RwLock::new(view)),
        config: config.clone(),
    };

    let router = create_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Get dataset summary (JSON API)
async fn api_summary(state: axum::extract::State<AppState>) -> String {
    let dataset = state.dataset.read().await;
    let summary = dataset.summary();
    serde_json::to_string(&summary).unwrap_or_default()
}

/// Reload the data file and resync the view
async fn api_reload(state: axum::extract::State<AppState>) -> String {
    let mut dataset = state.dataset.write().await;
    match dataset.reload().await {
        Ok(()) => {
            let fields = dataset.fields();
            let transactions = dataset.transactions(&SortState::unsorted());
            drop(dataset);

            let mut view = state.view.write().await;
            view.set_fields(fields);
            // The selection must stay a subset of the surviving ids
            view.sync_listed(&transactions);

            r#"{"success": true}"#.to_string()
        }
        Err(e) => {
            log::error!("Reload failed: {}", e);
            format!(r#"{{"success": false, "message": "{}"}}"#, e)
        }
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Flowlist</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .row-incomplete {{ background: #FEF3C7; }}
        .row-selected {{ background: #EEF2FF; }}
        .row-incomplete.row-selected {{ background: #FDE68A; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/transactions", "Transactions", "transactions"),
        ("/settings", "Settings", "settings"),
    ];

    let mut nav = String::from(
        "<div class='bg-white border-r h-screen flex flex-col w-48 flex-shrink-0'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Flowlist</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>",
    );

    for (path, label, id) in &links {
        let is_active = current_path.starts_with(path)
            || (*id == "transactions" && current_path == "/");
        let active_class = if is_active {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'><span>{}</span></a></li>"#,
            path, active_class, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Full page shell: sidebar plus main content area
pub fn page_shell(title: &str, current_path: &str, inner_content: &str) -> String {
    let layout = format!(
        r#"<div class='flex'>
    {}
    <main class='flex-1 p-6 overflow-y-auto h-screen'>
        {}
    </main>
</div>"#,
        nav_sidebar(current_path),
        inner_content
    );
    base_html(title, &layout)
}
