//! Selection transitions: single toggle, select-all, range and row clicks.

use log::{debug, trace};

use crate::input::Modifiers;
use crate::model::RowKey;
use crate::selection::{Selection, SelectionChange};

use super::Table;

/// Which part of a row was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClickTarget {
    /// Anywhere on the row except its checkbox: flips the row.
    Row,
    /// The row's checkbox, carrying its new checked state.
    Checkbox(bool),
}

impl Table {
    /// The selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether a key is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selection.contains(key)
    }

    /// Selected keys in display order.
    pub fn selected_keys(&self) -> Vec<RowKey> {
        self.store
            .all()
            .iter()
            .filter(|row| row.selected)
            .map(|row| row.key.clone())
            .collect()
    }

    /// Number of selected rows, visible or not.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Display index of the range anchor.
    pub fn last_touched(&self) -> Option<usize> {
        self.selection.last_touched()
    }

    /// Writes one row's flag and the key set. Never notifies.
    ///
    /// Selecting an unselectable row is refused; deselecting always works.
    fn set_row_selected(&mut self, index: usize, selected: bool, change: &mut SelectionChange) {
        let Some(row) = self.store.get(index) else {
            return;
        };
        if row.selected == selected {
            return;
        }
        if selected && !(self.selectable)(&row.data) {
            trace!("Table: row {} is not selectable", row.key);
            return;
        }

        let key = row.key.clone();
        if let Some(row) = self.store.get_mut(index) {
            row.selected = selected;
        }
        self.selection.set(&key, selected);
        if selected {
            change.added.push(key);
        } else {
            change.removed.push(key);
        }
    }

    fn finish_change(&mut self, change: SelectionChange) -> SelectionChange {
        if !change.is_empty() {
            self.notify_selection();
        }
        change
    }

    /// Sets one row's selection by key.
    ///
    /// Unknown keys are ignored.
    pub fn toggle(&mut self, key: &RowKey, selected: bool) -> SelectionChange {
        let mut change = SelectionChange::default();
        match self.store.index_of(key) {
            Some(index) => self.set_row_selected(index, selected, &mut change),
            None => debug!("Table::toggle: unknown key {}", key),
        }
        self.finish_change(change)
    }

    /// Sets selection on every visible, selectable row.
    ///
    /// Hidden rows keep whatever state they had.
    pub fn toggle_all(&mut self, selected: bool) -> SelectionChange {
        let mut change = SelectionChange::default();
        for index in 0..self.store.len() {
            if self.in_scope(index) {
                self.set_row_selected(index, selected, &mut change);
            }
        }
        debug!(
            "Table::toggle_all({}): {} added, {} removed",
            selected,
            change.added.len(),
            change.removed.len()
        );
        self.finish_change(change)
    }

    /// Sets selection on the visible, selectable rows in the inclusive
    /// display-index span between `from` and `to`, in either direction.
    ///
    /// An end past the last row is clamped to it; a span lying entirely
    /// past the end selects nothing.
    pub fn range_select(&mut self, from: usize, to: usize, selected: bool) -> SelectionChange {
        let mut change = SelectionChange::default();
        let Some(last) = self.store.len().checked_sub(1) else {
            return change;
        };

        let start = from.min(to);
        if start > last {
            debug!(
                "Table::range_select: {}..={} is past the end",
                start,
                from.max(to)
            );
            return change;
        }
        let end = from.max(to).min(last);
        for index in start..=end {
            if self.in_scope(index) {
                self.set_row_selected(index, selected, &mut change);
            }
        }
        debug!(
            "Table::range_select({}..={}, {}): {} added, {} removed",
            start,
            end,
            selected,
            change.added.len(),
            change.removed.len()
        );
        self.finish_change(change)
    }

    /// Handles a click on the row at a display index.
    ///
    /// The new state is the row's flipped state for [`RowClickTarget::Row`]
    /// or the checkbox's value. With shift held and a different anchor, the
    /// state is applied to the whole span from the anchor. The clicked row
    /// becomes the new anchor. Out-of-range indices are ignored.
    pub fn row_click(
        &mut self,
        index: usize,
        target: RowClickTarget,
        modifiers: Modifiers,
    ) -> SelectionChange {
        let Some(row) = self.store.get(index) else {
            debug!("Table::row_click: index {} out of range", index);
            return SelectionChange::default();
        };

        let selected = match target {
            RowClickTarget::Row => !row.selected,
            RowClickTarget::Checkbox(checked) => checked,
        };
        let key = row.key.clone();

        let change = match self.selection.last_touched() {
            Some(anchor) if modifiers.shift && anchor != index => {
                self.range_select(anchor, index, selected)
            }
            _ => self.toggle(&key, selected),
        };

        self.selection.set_last_touched(Some(index));
        change
    }

    fn in_scope(&self, index: usize) -> bool {
        self.store
            .get(index)
            .is_some_and(|row| row.visible && (self.selectable)(&row.data))
    }
}
