//! Render coordination: filter, sort, emit, recount.

use serde::Serialize;

use crate::error::PredicateError;
use crate::model::{RowData, RowKey};
use crate::filter::FilterEvaluator;
use crate::sort::SortPlan;

use super::Table;

/// State of the select-all checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    /// No visible, selectable row is selected.
    Unchecked,
    /// Some but not all are selected.
    Indeterminate,
    /// All are selected.
    Checked,
}

/// One row as handed to the display layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub key: RowKey,
    pub data: RowData,
    pub visible: bool,
    pub selected: bool,
    /// Whether the row's checkbox should be enabled.
    pub selectable: bool,
}

/// Result of [`Table::render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    /// All rows in display order, hidden ones included.
    pub rows: Vec<RenderedRow>,
    /// Rows passing the filter.
    pub visible_count: usize,
    /// Selected rows, including ones the filter hides.
    pub selected_count: usize,
    /// Select-all checkbox state over visible, selectable rows.
    pub select_all: TriState,
    /// Whether any visible row is selectable.
    pub select_all_enabled: bool,
    /// The no-data label when nothing is visible.
    pub empty_label: Option<String>,
}

impl RenderOutput {
    /// Only the visible rows, in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &RenderedRow> {
        self.rows.iter().filter(|r| r.visible)
    }
}

impl Table {
    /// Re-derives visibility and order, then reports what to display.
    ///
    /// Runs the filter, sorts when criteria are set (or restores load order
    /// when they are not), and recomputes the counters. Filter and parser
    /// errors are returned before any visibility flag or position is written.
    /// Calling it twice in a row gives the same output.
    pub fn render(&mut self) -> Result<RenderOutput, PredicateError> {
        let verdicts = self.filter.evaluate(self.store.all())?;
        let plan = SortPlan::build(&self.store, &self.criteria, &self.columns)?;

        let visible_count = FilterEvaluator::commit(self.store.all_mut(), verdicts);
        plan.apply(&mut self.store);

        let mut scope = 0;
        let mut scope_selected = 0;
        let rows: Vec<RenderedRow> = self
            .store
            .all()
            .iter()
            .map(|row| {
                let selectable = (self.selectable)(&row.data);
                if row.visible && selectable {
                    scope += 1;
                    if row.selected {
                        scope_selected += 1;
                    }
                }
                RenderedRow {
                    key: row.key.clone(),
                    data: row.data.clone(),
                    visible: row.visible,
                    selected: row.selected,
                    selectable,
                }
            })
            .collect();

        let select_all = if scope_selected == 0 {
            TriState::Unchecked
        } else if scope_selected == scope {
            TriState::Checked
        } else {
            TriState::Indeterminate
        };

        let output = RenderOutput {
            rows,
            visible_count,
            selected_count: self.selection.len(),
            select_all,
            select_all_enabled: scope > 0,
            empty_label: (visible_count == 0)
                .then(|| self.options.no_data_label.clone()),
        };

        self.notify_applied();
        Ok(output)
    }
}
