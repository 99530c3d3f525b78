//! Row store: the ordered, authoritative collection of rows.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::error::StoreError;
use crate::model::{Row, RowData, RowKey};

/// Ordered collection of rows, keyed by [`RowKey`].
///
/// Order is the current display order. The store never renders and never
/// sorts on its own; callers reorder it explicitly.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: Vec<Row>,
    /// key -> position in `rows`. Rebuilt after every reorder or removal.
    positions: HashMap<RowKey, usize>,
}

impl RowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all rows, deriving keys and load positions.
    ///
    /// Fails without touching the store if two records derive the same key.
    pub fn load<I, F>(&mut self, records: I, key_fn: F) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = RowData>,
        F: Fn(&RowData) -> RowKey,
    {
        let mut rows = Vec::new();
        let mut positions = HashMap::new();

        for (index, data) in records.into_iter().enumerate() {
            let key = key_fn(&data);
            if positions.insert(key.clone(), index).is_some() {
                return Err(StoreError::DuplicateKey { key, index });
            }
            rows.push(Row::new(key, data, index));
        }

        debug!("RowStore::load: {} rows", rows.len());
        self.rows = rows;
        self.positions = positions;
        Ok(())
    }

    /// All rows in display order.
    pub fn all(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable access to all rows. Order and keys must not be changed
    /// through this slice.
    pub(crate) fn all_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Row at a display position.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    /// Display position of a key.
    pub fn index_of(&self, key: &RowKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Row with a given key.
    pub fn find(&self, key: &RowKey) -> Option<&Row> {
        self.index_of(key).and_then(|i| self.rows.get(i))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drops rows whose keys are in `keys`.
    ///
    /// Returns the keys that were actually present, in display order. Unknown
    /// keys are ignored. Selection purging is done by the owning table.
    pub fn remove(&mut self, keys: &HashSet<RowKey>) -> Vec<RowKey> {
        if keys.is_empty() {
            return Vec::new();
        }

        let mut removed = Vec::new();
        self.rows.retain(|row| {
            if keys.contains(&row.key) {
                removed.push(row.key.clone());
                false
            } else {
                true
            }
        });

        if !removed.is_empty() {
            debug!("RowStore::remove: dropped {} rows", removed.len());
            self.rebuild_positions();
        }
        removed
    }

    /// Stable reorder with the given comparator.
    pub(crate) fn reorder_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Row, &Row) -> Ordering,
    {
        self.rows.sort_by(compare);
        self.rebuild_positions();
        trace!("RowStore::reorder_by: {} rows reordered", self.rows.len());
    }

    /// Whether rows are in load order.
    pub fn is_in_load_order(&self) -> bool {
        self.rows
            .windows(2)
            .all(|w| w[0].original_index < w[1].original_index)
    }

    /// Puts rows back into load order.
    pub(crate) fn restore_load_order(&mut self) {
        if !self.is_in_load_order() {
            self.reorder_by(|a, b| a.original_index.cmp(&b.original_index));
        }
    }

    fn rebuild_positions(&mut self) {
        self.positions.clear();
        for (i, row) in self.rows.iter().enumerate() {
            self.positions.insert(row.key.clone(), i);
        }
    }
}
