//! List view orchestration
//!
//! Owns the two pieces of interactive state the list carries (column sort
//! and row selection) and composes the field-renderer registry with the
//! current field definitions. The sort state round-trips through the
//! `ordering` query token; the actual row ordering is applied upstream by
//! the dataset query, never here.

use crate::fields::{renderer_for, CellValue, FieldRenderer, FooterSummary};
use crate::models::{FieldDefinition, Transaction};
use std::collections::HashSet;
use std::sync::Arc;

/// Name of the query parameter carrying the ordering token
pub const ORDERING_PARAM: &str = "ordering";

/// Token prefix marking a descending sort
pub const DESC_MARKER: char = '-';

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// The column a list is sorted on, with its direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub order: SortOrder,
}

/// Sort state: either unsorted, or one field with one direction
///
/// A direction can never exist without a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    key: Option<SortKey>,
}

impl SortState {
    /// The unsorted state
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Decode an ordering token
    ///
    /// Absent or empty = unsorted; a bare field code = ascending; a code
    /// prefixed with the descending marker = descending. A bare marker with
    /// no field decodes as unsorted.
    pub fn parse(token: Option<&str>) -> Self {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Self::unsorted(),
        };

        match token.strip_prefix(DESC_MARKER) {
            Some(field) if !field.is_empty() => Self {
                key: Some(SortKey {
                    field: field.to_string(),
                    order: SortOrder::Descending,
                }),
            },
            Some(_) => Self::unsorted(),
            None => Self {
                key: Some(SortKey {
                    field: token.to_string(),
                    order: SortOrder::Ascending,
                }),
            },
        }
    }

    /// Encode this state back into an ordering token
    pub fn encode(&self) -> Option<String> {
        self.key.as_ref().map(|key| match key.order {
            SortOrder::Ascending => key.field.clone(),
            SortOrder::Descending => format!("{}{}", DESC_MARKER, key.field),
        })
    }

    /// Current sort key, if any
    pub fn key(&self) -> Option<&SortKey> {
        self.key.as_ref()
    }

    /// Direction this state sorts the given field by, if it does
    pub fn order_for(&self, field: &str) -> Option<SortOrder> {
        self.key
            .as_ref()
            .filter(|key| key.field == field)
            .map(|key| key.order)
    }

    /// Advance the three-state cycle for a field
    ///
    /// Unsorted or sorted on another field -> ascending on this field;
    /// ascending -> descending; descending -> unsorted.
    pub fn cycle(&mut self, field: &str) {
        self.key = match self.key.take() {
            Some(key) if key.field == field => match key.order {
                SortOrder::Ascending => Some(SortKey {
                    field: key.field,
                    order: SortOrder::Descending,
                }),
                SortOrder::Descending => None,
            },
            _ => Some(SortKey {
                field: field.to_string(),
                order: SortOrder::Ascending,
            }),
        };
    }
}

/// Selected row identifiers
///
/// Always a subset of the identifiers present in the current list.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    /// Add the id if absent, remove it otherwise
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Select every listed id, unless all of them are already selected, in
    /// which case clear the selection entirely
    pub fn toggle_all(&mut self, listed: &[String]) {
        let all_selected = listed.iter().all(|id| self.ids.contains(id));
        if all_selected {
            self.ids.clear();
        } else {
            for id in listed {
                self.ids.insert(id.clone());
            }
        }
    }

    /// Drop ids that are no longer listed
    pub fn retain_listed(&mut self, listed: &[String]) {
        let keep: HashSet<&String> = listed.iter().collect();
        self.ids.retain(|id| keep.contains(id));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids in a stable order
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }
}

/// Incompleteness predicate seam
///
/// Hosts decide which fields a transaction must fill in; the view only
/// applies the verdict as a visual treatment.
pub trait CompletenessCheck: Send + Sync {
    fn is_incomplete(&self, fields: &[FieldDefinition], txn: &Transaction) -> bool;
}

/// Default rule: a transaction is incomplete when any visible standard
/// column resolves to an empty value for it
#[derive(Debug, Default)]
pub struct RequiredFieldsCheck;

impl CompletenessCheck for RequiredFieldsCheck {
    fn is_incomplete(&self, fields: &[FieldDefinition], txn: &Transaction) -> bool {
        fields
            .iter()
            .filter(|field| field.visible && !field.extra)
            .any(|field| match field.code.as_str() {
                "name" => txn.name.trim().is_empty(),
                "merchant" => txn.merchant.trim().is_empty(),
                "issuedAt" => txn.issued_at.trim().is_empty(),
                "total" => txn.total.is_none(),
                _ => false,
            })
    }
}

/// A visible column: its definition with the resolved renderer attached
#[derive(Clone)]
pub struct Column {
    pub definition: FieldDefinition,
    pub renderer: FieldRenderer,
}

/// The list view orchestrator
pub struct ListView {
    fields: Vec<FieldDefinition>,
    columns: Vec<Column>,
    sort: SortState,
    selection: Selection,
    checker: Arc<dyn CompletenessCheck>,
}

impl ListView {
    /// Create a view, deriving the initial sort state from the given
    /// ordering token
    pub fn new(default_ordering: Option<&str>, checker: Arc<dyn CompletenessCheck>) -> Self {
        Self {
            fields: Vec::new(),
            columns: Vec::new(),
            sort: SortState::parse(default_ordering),
            selection: Selection::default(),
            checker,
        }
    }

    /// Replace the field definitions and rederive the visible columns
    ///
    /// Visibility filtering preserves input order; each visible definition
    /// gets its renderer resolved once here.
    pub fn set_fields(&mut self, fields: Vec<FieldDefinition>) {
        self.columns = fields
            .iter()
            .filter(|field| field.visible)
            .map(|field| Column {
                definition: field.clone(),
                renderer: renderer_for(field),
            })
            .collect();
        self.fields = fields;
    }

    /// All field definitions, visible or not
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Visible columns in definition order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Current sort state
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Sync the sort state from an externally supplied ordering token
    pub fn set_sort_token(&mut self, token: Option<&str>) {
        self.sort = SortState::parse(token);
    }

    /// Apply a sort trigger on a column
    ///
    /// Returns false (no state change) when the code does not belong to a
    /// sortable visible column.
    pub fn toggle_sort(&mut self, code: &str) -> bool {
        let sortable = self
            .columns
            .iter()
            .any(|column| column.renderer.code == code && column.renderer.sortable);
        if !sortable {
            return false;
        }
        self.sort.cycle(code);
        true
    }

    /// The ordering token a sort trigger on this code would produce
    pub fn next_sort_token(&self, code: &str) -> Option<String> {
        let mut next = self.sort.clone();
        next.cycle(code);
        next.encode()
    }

    /// Current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Toggle a single row in or out of the selection
    pub fn toggle_row(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    /// Select all listed rows, or clear when all are already selected
    pub fn toggle_all(&mut self, transactions: &[Transaction]) {
        let ids: Vec<String> = transactions.iter().map(|txn| txn.id.clone()).collect();
        self.selection.toggle_all(&ids);
    }

    /// Reset the selection after a bulk action reports completion
    pub fn bulk_complete(&mut self) {
        self.selection.clear();
    }

    /// Keep the selection a subset of the listed transactions
    pub fn sync_listed(&mut self, transactions: &[Transaction]) {
        let ids: Vec<String> = transactions.iter().map(|txn| txn.id.clone()).collect();
        self.selection.retain_listed(&ids);
    }

    /// Derive the display value for one (transaction, column) pair
    ///
    /// Extra columns read the extra-data mapping (absent key = empty cell);
    /// otherwise the renderer's formatter applies; otherwise the matching
    /// transaction attribute in display form.
    pub fn cell(&self, column: &Column, txn: &Transaction) -> CellValue {
        if column.definition.extra {
            CellValue::text(txn.extra_value(&column.definition.code))
        } else if let Some(format) = column.renderer.format {
            format(txn)
        } else {
            CellValue::text(txn.attribute(&column.definition.code))
        }
    }

    /// Footer summary for a column, when its renderer aggregates one
    pub fn footer(&self, column: &Column, transactions: &[Transaction]) -> Option<FooterSummary> {
        column.renderer.footer.map(|footer| footer(transactions))
    }

    /// Apply the incompleteness predicate to a transaction
    pub fn is_incomplete(&self, txn: &Transaction) -> bool {
        let visible: Vec<FieldDefinition> = self
            .columns
            .iter()
            .map(|column| column.definition.clone())
            .collect();
        self.checker.is_incomplete(&visible, txn)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, TxnType};
    use std::collections::HashMap;

    fn txn(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            name: format!("txn {}", id),
            merchant: "Shop".to_string(),
            issued_at: "2024-06-15".to_string(),
            total: Some(Amount::new(10.0, "USD")),
            converted_total: None,
            project: None,
            category: None,
            files: vec![],
            txn_type: TxnType::Expense,
            extra: HashMap::new(),
        }
    }

    fn view() -> ListView {
        let mut view = ListView::new(None, Arc::new(RequiredFieldsCheck));
        view.set_fields(vec![
            FieldDefinition::standard("name", "Name"),
            FieldDefinition::standard("total", "Total"),
            FieldDefinition::standard("files", "Files"),
            FieldDefinition {
                code: "merchant".to_string(),
                name: "Merchant".to_string(),
                visible: false,
                extra: false,
            },
            FieldDefinition::extra("custom1", "Cost center"),
        ]);
        view
    }

    #[test]
    fn test_visible_columns_preserve_order() {
        let view = view();
        let codes: Vec<&str> = view
            .columns()
            .iter()
            .map(|c| c.definition.code.as_str())
            .collect();
        assert_eq!(codes, vec!["name", "total", "files", "custom1"]);
    }

    #[test]
    fn test_sort_cycle_three_states() {
        let mut view = view();
        assert!(view.sort().key().is_none());

        assert!(view.toggle_sort("name"));
        assert_eq!(view.sort().order_for("name"), Some(SortOrder::Ascending));

        assert!(view.toggle_sort("name"));
        assert_eq!(view.sort().order_for("name"), Some(SortOrder::Descending));

        assert!(view.toggle_sort("name"));
        assert!(view.sort().key().is_none());
    }

    #[test]
    fn test_sort_switching_column_resets_to_ascending() {
        let mut view = view();
        view.toggle_sort("name");
        view.toggle_sort("name");
        assert_eq!(view.sort().order_for("name"), Some(SortOrder::Descending));

        view.toggle_sort("total");
        assert_eq!(view.sort().order_for("total"), Some(SortOrder::Ascending));
        assert!(view.sort().order_for("name").is_none());
    }

    #[test]
    fn test_sort_ignores_non_sortable_columns() {
        let mut view = view();
        assert!(!view.toggle_sort("files"));
        assert!(!view.toggle_sort("custom1"));
        assert!(!view.toggle_sort("merchant"));
        assert!(view.sort().key().is_none());
    }

    #[test]
    fn test_token_round_trip() {
        for token in [None, Some("name"), Some("-issuedAt")] {
            let state = SortState::parse(token);
            assert_eq!(state.encode().as_deref(), token);
        }
    }

    #[test]
    fn test_token_parse_edge_cases() {
        assert!(SortState::parse(Some("")).key().is_none());
        assert!(SortState::parse(Some("-")).key().is_none());
        let desc = SortState::parse(Some("-total"));
        assert_eq!(desc.order_for("total"), Some(SortOrder::Descending));
    }

    #[test]
    fn test_next_sort_token_follows_cycle() {
        let mut view = view();
        assert_eq!(view.next_sort_token("name").as_deref(), Some("name"));
        view.toggle_sort("name");
        assert_eq!(view.next_sort_token("name").as_deref(), Some("-name"));
        view.toggle_sort("name");
        assert_eq!(view.next_sort_token("name"), None);
    }

    #[test]
    fn test_toggle_all_full_then_empty() {
        let mut view = view();
        let txns = vec![txn("a"), txn("b"), txn("c")];

        view.toggle_all(&txns);
        assert_eq!(view.selection().len(), 3);
        assert!(view.selection().contains("a"));
        assert!(view.selection().contains("b"));
        assert!(view.selection().contains("c"));

        view.toggle_all(&txns);
        assert!(view.selection().is_empty());
    }

    #[test]
    fn test_toggle_all_completes_partial_selection() {
        let mut view = view();
        let txns = vec![txn("a"), txn("b"), txn("c")];
        view.toggle_row("b");

        view.toggle_all(&txns);
        assert_eq!(view.selection().len(), 3);
    }

    #[test]
    fn test_toggle_row_is_symmetric_difference() {
        let mut view = view();
        view.toggle_row("a");
        assert!(view.selection().contains("a"));
        view.toggle_row("a");
        assert!(!view.selection().contains("a"));
    }

    #[test]
    fn test_bulk_complete_resets_selection() {
        let mut view = view();
        view.toggle_row("a");
        view.toggle_row("b");
        view.bulk_complete();
        assert!(view.selection().is_empty());
    }

    #[test]
    fn test_sync_listed_prunes_stale_ids() {
        let mut view = view();
        view.toggle_row("a");
        view.toggle_row("gone");
        view.sync_listed(&[txn("a"), txn("b")]);
        assert_eq!(view.selection().ids(), vec!["a".to_string()]);
    }

    #[test]
    fn test_cell_extra_field_absent_key_is_empty() {
        let view = view();
        let column = view
            .columns()
            .iter()
            .find(|c| c.definition.code == "custom1")
            .unwrap();
        let cell = view.cell(column, &txn("a"));
        assert!(cell.is_empty());
    }

    #[test]
    fn test_cell_formatter_and_attribute_fallback() {
        let view = view();
        let t = txn("a");

        let total = view
            .columns()
            .iter()
            .find(|c| c.definition.code == "total")
            .unwrap();
        assert_eq!(view.cell(total, &t).text, "10.00 USD");

        let name = view
            .columns()
            .iter()
            .find(|c| c.definition.code == "name")
            .unwrap();
        assert_eq!(view.cell(name, &t).text, "txn a");
    }

    #[test]
    fn test_incomplete_flag_is_independent_of_selection() {
        let mut view = view();
        let mut t = txn("a");
        t.total = None;

        assert!(view.is_incomplete(&t));
        view.toggle_row("a");
        assert!(view.is_incomplete(&t));
        assert!(view.selection().contains("a"));
    }

    #[test]
    fn test_complete_transaction_is_not_flagged() {
        let view = view();
        assert!(!view.is_incomplete(&txn("a")));
    }
}
