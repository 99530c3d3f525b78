//! Key-based selection state.
//!
//! Selection is tracked by [`RowKey`] so it survives re-sorting and
//! filtering. The last-touched index anchors shift-click range selection.

use std::collections::HashSet;

use crate::model::RowKey;

/// Keys added to and removed from the selection by one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    /// Newly selected keys, in display order.
    pub added: Vec<RowKey>,
    /// Newly deselected keys, in display order.
    pub removed: Vec<RowKey>,
}

impl SelectionChange {
    /// Whether the operation changed nothing.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Selected keys plus the range-selection anchor.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Currently selected keys
    selected: HashSet<RowKey>,
    /// Display index of the most recently clicked row
    last_touched: Option<usize>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected keys (sorted for deterministic ordering).
    pub fn keys(&self) -> Vec<RowKey> {
        let mut keys: Vec<_> = self.selected.iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Check if a key is selected.
    pub fn contains(&self, key: &RowKey) -> bool {
        self.selected.contains(key)
    }

    /// Get the number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Get the range-selection anchor.
    pub fn last_touched(&self) -> Option<usize> {
        self.last_touched
    }

    pub(crate) fn set_last_touched(&mut self, index: Option<usize>) {
        self.last_touched = index;
    }

    /// Add or remove a key. Returns true if the set changed.
    pub(crate) fn set(&mut self, key: &RowKey, selected: bool) -> bool {
        if selected {
            self.selected.insert(key.clone())
        } else {
            self.selected.remove(key)
        }
    }

    /// Drop keys that left the row store.
    /// Returns the keys that were selected.
    pub(crate) fn purge(&mut self, keys: &[RowKey]) -> Vec<RowKey> {
        keys.iter()
            .filter(|key| self.selected.remove(*key))
            .cloned()
            .collect()
    }

    /// Clear all selection and the anchor.
    pub(crate) fn clear(&mut self) {
        self.selected.clear();
        self.last_touched = None;
    }
}
