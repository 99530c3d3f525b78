//! Multi-criterion comparison and reordering.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, trace};

use crate::error::PredicateError;
use crate::model::{Column, SortValue};
use crate::store::RowStore;

use super::{SortCriteria, SortDirection};

/// Compares two precomputed key tuples.
///
/// The first non-equal position decides, negated for descending criteria.
/// Returns `Equal` when every position ties; the caller adds the final
/// load-order tie-break.
pub fn compare_keys(a: &[SortValue], b: &[SortValue], directions: &[SortDirection]) -> Ordering {
    for ((x, y), direction) in a.iter().zip(b).zip(directions) {
        let ord = match direction {
            SortDirection::Ascending => x.cmp(y),
            SortDirection::Descending => y.cmp(x),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Parsed sort keys, ready to reorder a store.
///
/// Building a plan parses every cell but leaves the store untouched, so a
/// caller can bail out on a parser error before committing anything.
#[derive(Debug)]
pub struct SortPlan {
    keys: HashMap<usize, Vec<SortValue>>,
    directions: Vec<SortDirection>,
}

impl SortPlan {
    /// Parses the key tuple of every row. Criteria naming unknown columns
    /// are skipped.
    pub fn build(
        store: &RowStore,
        criteria: &SortCriteria,
        columns: &[Column],
    ) -> Result<Self, PredicateError> {
        let resolved: Vec<(&Column, SortDirection)> = criteria
            .criteria()
            .iter()
            .filter_map(|c| {
                let column = columns.iter().find(|col| col.key == c.column);
                if column.is_none() {
                    debug!("SortPlan::build: skipping unknown column '{}'", c.column);
                }
                column.map(|col| (col, c.direction))
            })
            .collect();

        let mut keys = HashMap::new();
        if !resolved.is_empty() {
            for row in store.all() {
                let tuple = resolved
                    .iter()
                    .map(|(column, _)| column.parse(row.data.get_or_empty(&column.key)))
                    .collect::<Result<Vec<_>, _>>()?;
                keys.insert(row.original_index, tuple);
            }
        }

        Ok(Self {
            keys,
            directions: resolved.iter().map(|(_, d)| *d).collect(),
        })
    }

    /// Whether no criterion resolved; applying restores load order.
    pub fn is_load_order(&self) -> bool {
        self.directions.is_empty()
    }

    /// Reorders the store, falling back to load order on ties.
    pub fn apply(self, store: &mut RowStore) {
        if self.is_load_order() {
            store.restore_load_order();
            return;
        }

        let empty: Vec<SortValue> = Vec::new();
        store.reorder_by(|a, b| {
            let ka = self.keys.get(&a.original_index).unwrap_or(&empty);
            let kb = self.keys.get(&b.original_index).unwrap_or(&empty);
            compare_keys(ka, kb, &self.directions)
                .then(a.original_index.cmp(&b.original_index))
        });

        trace!(
            "SortPlan::apply: sorted {} rows by {} criteria",
            store.len(),
            self.directions.len()
        );
    }
}
