//! Transaction list routes
//!
//! Features:
//! - Sortable table with configurable columns
//! - Row selection and bulk actions
//! - Per-currency footer totals
//! - HTMX partial page updates
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_fields,
    api_transaction_detail,
    api_transactions,
    htmx_bulk,
    htmx_toggle_all,
    htmx_toggle_row,
    htmx_transactions_list,
};

pub use page::{page_transaction_detail, page_transactions};
