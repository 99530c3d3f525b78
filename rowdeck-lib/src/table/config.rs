//! Table configuration.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::filter::FilterEvaluator;
use crate::model::{Column, RowData, RowKey};
use crate::selection::Selection;
use crate::sort::SortCriteria;
use crate::store::RowStore;

use super::Table;
use super::gateway::{ActionContext, ActionKind};

/// Derives a row's key from its data.
pub type KeyFn = dyn Fn(&RowData) -> RowKey;
/// Decides whether a row may be selected.
pub type SelectableFn = dyn Fn(&RowData) -> bool;
/// Receives the selected keys (display order) and their count.
pub type SelectionChangedFn = dyn FnMut(&[RowKey], usize);
/// Fired after every render.
pub type AppliedFn = dyn FnMut();
/// Returns whether an action is allowed in the given context.
pub type VetoFn = dyn Fn(&ActionContext) -> bool;

/// Declarative table options.
///
/// # Example
///
/// ```
/// use rowdeck_lib::table::TableOptions;
///
/// let options = TableOptions::from_json(r#"{ "no_data_label": "Nothing here" }"#).unwrap();
/// assert_eq!(options.no_data_label, "Nothing here");
/// assert!(!options.case_sensitive_filters);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Label shown when no row is visible.
    ///
    /// Default: `"No data"`
    pub no_data_label: String,

    /// Whether [`FilterSet`](crate::filter::FilterSet) text terms match case.
    ///
    /// Default: false
    pub case_sensitive_filters: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            no_data_label: "No data".to_string(),
            case_sensitive_filters: false,
        }
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidOptions(e.to_string()))
    }

    /// Sets the no-data label.
    pub fn with_no_data_label(mut self, label: impl Into<String>) -> Self {
        self.no_data_label = label.into();
        self
    }

    /// Sets case-sensitive text filtering.
    pub fn with_case_sensitive_filters(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive_filters = case_sensitive;
        self
    }
}

/// Builder for [`Table`].
///
/// Columns and a row key deriver are required; everything else has a
/// default.
///
/// # Example
///
/// ```
/// use rowdeck_lib::model::{Column, RowKey};
/// use rowdeck_lib::table::Table;
///
/// let table = Table::builder()
///     .columns(vec![Column::new("Name", "name").sortable()])
///     .row_key(|data| RowKey::new(data.get_or_empty("id")))
///     .no_data_label("No rows")
///     .build()
///     .unwrap();
/// assert_eq!(table.columns().len(), 1);
/// ```
#[derive(Default)]
pub struct TableBuilder {
    columns: Vec<Column>,
    row_key: Option<Box<KeyFn>>,
    selectable: Option<Box<SelectableFn>>,
    on_selection_changed: Option<Box<SelectionChangedFn>>,
    on_filter_or_sort_applied: Option<Box<AppliedFn>>,
    options: TableOptions,
    vetoes: HashMap<ActionKind, Box<VetoFn>>,
}

impl TableBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ordered column descriptors.
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the row key deriver.
    pub fn row_key<F>(mut self, f: F) -> Self
    where
        F: Fn(&RowData) -> RowKey + 'static,
    {
        self.row_key = Some(Box::new(f));
        self
    }

    /// Sets the selectability rule. Default: every row is selectable.
    pub fn selectable<F>(mut self, f: F) -> Self
    where
        F: Fn(&RowData) -> bool + 'static,
    {
        self.selectable = Some(Box::new(f));
        self
    }

    /// Sets the selection-changed callback.
    pub fn on_selection_changed<F>(mut self, f: F) -> Self
    where
        F: FnMut(&[RowKey], usize) + 'static,
    {
        self.on_selection_changed = Some(Box::new(f));
        self
    }

    /// Sets the callback fired after every render.
    pub fn on_filter_or_sort_applied<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_filter_or_sort_applied = Some(Box::new(f));
        self
    }

    /// Sets the label reported when no row is visible.
    pub fn no_data_label(mut self, label: impl Into<String>) -> Self {
        self.options.no_data_label = label.into();
        self
    }

    /// Replaces all declarative options.
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers a veto for an action kind. The closure returns whether the
    /// action is allowed.
    pub fn veto<F>(mut self, kind: ActionKind, f: F) -> Self
    where
        F: Fn(&ActionContext) -> bool + 'static,
    {
        self.vetoes.insert(kind, Box::new(f));
        self
    }

    /// Validates the configuration and builds the table.
    pub fn build(self) -> Result<Table, ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.key.trim().is_empty() {
                return Err(ConfigError::EmptyColumnKey {
                    label: column.label.clone(),
                });
            }
            if !seen.insert(column.key.as_str()) {
                return Err(ConfigError::DuplicateColumn {
                    key: column.key.clone(),
                });
            }
        }

        let row_key = self.row_key.ok_or(ConfigError::MissingRowKey)?;

        Ok(Table {
            columns: self.columns,
            store: RowStore::new(),
            filter: FilterEvaluator::new(),
            criteria: SortCriteria::new(),
            selection: Selection::new(),
            row_key,
            selectable: self.selectable.unwrap_or_else(|| Box::new(|_| true)),
            on_selection_changed: self.on_selection_changed,
            on_filter_or_sort_applied: self.on_filter_or_sort_applied,
            options: self.options,
            vetoes: self.vetoes,
            next_ticket: 1,
        })
    }
}
