//! Predicate evaluation over the row store.

use std::fmt;

use log::trace;

use crate::error::PredicateError;
use crate::model::{Row, RowData};

/// Visibility predicate signature.
pub type Predicate = dyn Fn(&RowData) -> Result<bool, PredicateError>;

/// Computes `visible` for every row from a single predicate.
#[derive(Default)]
pub struct FilterEvaluator {
    predicate: Option<Box<Predicate>>,
}

impl FilterEvaluator {
    /// Creates an evaluator that lets every row through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the predicate.
    pub fn set_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(&RowData) -> Result<bool, PredicateError> + 'static,
    {
        self.predicate = Some(Box::new(predicate));
    }

    /// Removes the predicate; every row becomes visible on the next render.
    pub fn clear(&mut self) {
        self.predicate = None;
    }

    /// Whether a predicate is installed.
    pub fn is_active(&self) -> bool {
        self.predicate.is_some()
    }

    /// Runs the predicate over every row without touching any flag.
    ///
    /// Returns one verdict per row, in row order.
    pub fn evaluate(&self, rows: &[Row]) -> Result<Vec<bool>, PredicateError> {
        match &self.predicate {
            Some(predicate) => rows.iter().map(|row| predicate(&row.data)).collect(),
            None => Ok(vec![true; rows.len()]),
        }
    }

    /// Writes verdicts from [`evaluate`](Self::evaluate) into `visible`.
    /// Returns the visible count.
    pub fn commit(rows: &mut [Row], verdicts: Vec<bool>) -> usize {
        let mut visible = 0;
        for (row, keep) in rows.iter_mut().zip(verdicts) {
            row.visible = keep;
            if keep {
                visible += 1;
            }
        }
        trace!(
            "FilterEvaluator::commit: {}/{} visible",
            visible,
            rows.len()
        );
        visible
    }
}

impl fmt::Debug for FilterEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEvaluator")
            .field("active", &self.is_active())
            .finish()
    }
}
