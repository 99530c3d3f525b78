//! Multi-column sorting.
//!
//! [`SortCriteria`] is the header-click state machine; [`SortPlan`] parses
//! the keys and applies them to a [`RowStore`](crate::store::RowStore).

mod comparator;
mod criteria;

pub use comparator::{SortPlan, compare_keys};
pub use criteria::{SortCriteria, SortCriterion, SortDirection};
