//! Core list-view logic
//!
//! Two cooperating pieces live here:
//! - the field renderer registry ([`fields`]): field code -> column
//!   rendering strategy, with per-currency footer aggregation
//!   ([`currency`]);
//! - the list orchestrator ([`list`]): visible-column derivation, cell
//!   value derivation, sort state with its `ordering` token codec, and
//!   row selection.
//!
//! The dataset ([`dataset`]) supplies the records and materializes the row
//! order a sort token describes.

pub mod currency;
pub mod dataset;
pub mod error;
pub mod fields;
pub mod list;
pub mod models;

pub use currency::{format_currency, net_total_per_currency, turnover_per_currency};
pub use dataset::{Dataset, ListSummary};
pub use error::{CoreError, CoreResult};
pub use fields::{renderer_for, CellValue, FieldRenderer, FooterLine, FooterSummary};
pub use list::{
    Column, CompletenessCheck, ListView, RequiredFieldsCheck, Selection, SortKey, SortOrder,
    SortState, DESC_MARKER, ORDERING_PARAM,
};
pub use models::{Amount, FieldDefinition, Transaction, TransactionsResponse, TxnType};
