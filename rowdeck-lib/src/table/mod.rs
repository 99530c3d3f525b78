//! The table engine: one instance per displayed table.
//!
//! A [`Table`] owns its rows, filter, sort criteria and selection. Input
//! events map onto named transitions:
//!
//! - header click -> [`Table::sort_click`]
//! - row or checkbox click -> [`Table::row_click`]
//! - select-all checkbox -> [`Table::toggle_all`]
//! - filter input -> [`Table::set_filter`] / [`Table::apply_filter_set`]
//!
//! None of these repaint. The host calls [`Table::render`] afterwards to
//! re-derive visibility and order and get the rows to display.
//!
//! # Example
//!
//! ```
//! use rowdeck_lib::input::Modifiers;
//! use rowdeck_lib::model::{Column, RowData, RowKey};
//! use rowdeck_lib::table::{RowClickTarget, Table, TriState};
//!
//! let mut table = Table::builder()
//!     .columns(vec![Column::new("Name", "name").sortable()])
//!     .row_key(|data| RowKey::new(data.get_or_empty("name")))
//!     .build()
//!     .unwrap();
//!
//! table
//!     .load(["b", "a", "c"].map(|n| RowData::new().with("name", n)))
//!     .unwrap();
//! table.sort_click("name", Modifiers::NONE);
//! table.row_click(0, RowClickTarget::Row, Modifiers::NONE);
//!
//! let output = table.render().unwrap();
//! assert_eq!(output.rows[0].key, RowKey::new("a"));
//! assert_eq!(output.select_all, TriState::Indeterminate);
//! ```

mod config;
mod gateway;
mod render;
mod selection;

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;

use crate::error::{PredicateError, StoreError};
use crate::filter::{FilterEvaluator, FilterSet};
use crate::input::Modifiers;
use crate::model::{Column, Row, RowData, RowKey};
use crate::selection::Selection;
use crate::sort::{SortCriteria, SortCriterion};
use crate::store::RowStore;

pub use config::{
    AppliedFn, KeyFn, SelectableFn, SelectionChangedFn, TableBuilder, TableOptions, VetoFn,
};
pub use gateway::{ActionContext, ActionKind, ActionOutcome, ActionTicket};
pub use render::{RenderOutput, RenderedRow, TriState};
pub use selection::RowClickTarget;

/// Selection, sort and filter state for one table.
pub struct Table {
    columns: Vec<Column>,
    store: RowStore,
    filter: FilterEvaluator,
    criteria: SortCriteria,
    selection: Selection,
    row_key: Box<KeyFn>,
    selectable: Box<SelectableFn>,
    on_selection_changed: Option<Box<SelectionChangedFn>>,
    on_filter_or_sort_applied: Option<Box<AppliedFn>>,
    options: TableOptions,
    vetoes: HashMap<ActionKind, Box<VetoFn>>,
    next_ticket: u64,
}

impl Table {
    /// Starts building a table.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    // -------------------------------------------------------------------------
    // Configuration access
    // -------------------------------------------------------------------------

    /// Column descriptors in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by key.
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Declarative options.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Replaces all rows.
    ///
    /// Selection and the range anchor reset; filter and sort criteria are
    /// kept and take effect on the next render.
    pub fn load<I>(&mut self, records: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = RowData>,
    {
        let row_key = &self.row_key;
        self.store.load(records, |data| row_key(data))?;
        let had_selection = !self.selection.is_empty();
        self.selection.clear();
        if had_selection {
            self.notify_selection();
        }
        Ok(())
    }

    /// The row store.
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// Rows in current display order.
    pub fn rows(&self) -> &[Row] {
        self.store.all()
    }

    /// Drops rows by key and purges them from the selection.
    ///
    /// Returns the keys that were present. The range anchor resets because
    /// display indices shift.
    pub fn remove(&mut self, keys: &HashSet<RowKey>) -> Vec<RowKey> {
        let removed = self.store.remove(keys);
        if removed.is_empty() {
            return removed;
        }

        self.selection.set_last_touched(None);
        let purged = self.selection.purge(&removed);
        if !purged.is_empty() {
            debug!("Table::remove: purged {} selected keys", purged.len());
            self.notify_selection();
        }
        removed
    }

    /// Whether a row can be selected under the host's rule.
    pub fn is_selectable(&self, row: &Row) -> bool {
        (self.selectable)(&row.data)
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Installs a visibility predicate. Takes effect on the next render.
    pub fn set_filter<F>(&mut self, predicate: F)
    where
        F: Fn(&RowData) -> Result<bool, PredicateError> + 'static,
    {
        self.filter.set_predicate(predicate);
    }

    /// Installs a composed text/flag filter, honouring the table's
    /// case-sensitivity option. An empty set clears the filter.
    pub fn apply_filter_set(&mut self, set: FilterSet) {
        if set.is_empty() {
            self.filter.clear();
            return;
        }
        let set = set.case_sensitive(self.options.case_sensitive_filters);
        self.filter.set_predicate(set.into_predicate());
    }

    /// Removes the visibility predicate.
    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    /// Whether a filter predicate is installed.
    pub fn is_filtered(&self) -> bool {
        self.filter.is_active()
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Current sort criteria.
    pub fn criteria(&self) -> &SortCriteria {
        &self.criteria
    }

    /// Applies a header click. Returns whether the criteria changed.
    ///
    /// Unknown and non-sortable columns are ignored. Rows are reordered on
    /// the next render.
    pub fn sort_click(&mut self, column: &str, modifiers: Modifiers) -> bool {
        match self.column(column) {
            Some(c) if c.sortable => {}
            _ => {
                debug!("Table::sort_click: '{}' is not a sortable column", column);
                return false;
            }
        }

        let changed = self.criteria.click(column, modifiers);
        debug!(
            "Table::sort_click: '{}' {:?} -> {:?}",
            column,
            modifiers,
            self.criteria.criteria()
        );
        changed
    }

    /// Replaces the criteria, dropping entries for non-sortable or unknown
    /// columns and repeated columns.
    pub fn set_sort(&mut self, criteria: Vec<SortCriterion>) {
        let mut seen = HashSet::new();
        let valid: Vec<SortCriterion> = criteria
            .into_iter()
            .filter(|c| {
                let ok = self.column(&c.column).is_some_and(|col| col.sortable)
                    && seen.insert(c.column.clone());
                if !ok {
                    debug!("Table::set_sort: dropping criterion on '{}'", c.column);
                }
                ok
            })
            .collect();
        self.criteria.set(valid);
    }

    /// Removes all criteria; the next render restores load order.
    pub fn clear_sort(&mut self) {
        self.criteria.clear();
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    fn notify_selection(&mut self) {
        let keys = self.selected_keys();
        if let Some(callback) = self.on_selection_changed.as_mut() {
            callback(&keys, keys.len());
        }
    }

    fn notify_applied(&mut self) {
        if let Some(callback) = self.on_filter_or_sort_applied.as_mut() {
            callback();
        }
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("rows", &self.store.len())
            .field("filter", &self.filter)
            .field("criteria", &self.criteria)
            .field("selected", &self.selection.len())
            .field("options", &self.options)
            .finish()
    }
}
