//! Sort criteria and the header-click state machine.

use serde::{Deserialize, Serialize};

use crate::input::Modifiers;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// One `(column, direction)` instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortCriterion {
    /// Column key.
    pub column: String,
    /// Direction.
    pub direction: SortDirection,
}

impl SortCriterion {
    /// Ascending criterion on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending criterion on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Ordered list of sort criteria. Earlier entries take priority.
///
/// Header clicks drive it through [`click`](Self::click):
///
/// - plain click: single-column sort cycling ascending, descending, unsorted;
///   on a column that is one of several criteria, only that entry cycles
/// - shift+click: add the column ascending, or flip it in place
/// - ctrl/cmd+click: drop the column
///
/// # Example
///
/// ```
/// use rowdeck_lib::input::Modifiers;
/// use rowdeck_lib::sort::{SortCriteria, SortCriterion};
///
/// let mut criteria = SortCriteria::new();
/// criteria.click("date", Modifiers::NONE);
/// criteria.click("start_time", Modifiers::SHIFT);
/// assert_eq!(
///     criteria.criteria(),
///     &[SortCriterion::asc("date"), SortCriterion::asc("start_time")]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortCriteria {
    entries: Vec<SortCriterion>,
}

impl SortCriteria {
    /// Creates empty criteria (load order).
    pub fn new() -> Self {
        Self::default()
    }

    /// The criteria in priority order.
    pub fn criteria(&self) -> &[SortCriterion] {
        &self.entries
    }

    /// Whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Replaces all criteria.
    pub fn set(&mut self, entries: Vec<SortCriterion>) {
        self.entries = entries;
    }

    /// Removes all criteria.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Direction of a column, if it is sorted.
    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.direction)
    }

    /// 1-based priority of a column (for header badges).
    pub fn position_of(&self, column: &str) -> Option<usize> {
        self.index_of(column).map(|i| i + 1)
    }

    fn index_of(&self, column: &str) -> Option<usize> {
        self.entries.iter().position(|c| c.column == column)
    }

    /// Applies a header click. Returns whether the criteria changed.
    ///
    /// The caller is responsible for checking the column is sortable and
    /// for re-sorting afterwards.
    pub fn click(&mut self, column: &str, modifiers: Modifiers) -> bool {
        let before = self.entries.clone();
        let index = self.index_of(column);

        if modifiers.primary() {
            if let Some(i) = index {
                self.entries.remove(i);
            }
        } else if modifiers.shift {
            match index {
                Some(i) => self.entries[i].direction = self.entries[i].direction.flipped(),
                None => self.entries.push(SortCriterion::asc(column)),
            }
        } else {
            match index {
                None => self.entries = vec![SortCriterion::asc(column)],
                Some(i) => match self.entries[i].direction {
                    SortDirection::Ascending => {
                        self.entries[i].direction = SortDirection::Descending
                    }
                    SortDirection::Descending => {
                        self.entries.remove(i);
                    }
                },
            }
        }

        self.entries != before
    }
}
