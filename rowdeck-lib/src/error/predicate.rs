//! Predicate error types

/// A filter predicate or value parser failed.
///
/// Propagated out of [`Table::render`](crate::table::Table::render) as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.describe())]
pub struct PredicateError {
    /// The column being parsed, if the failure came from a sort parser.
    pub column: Option<String>,
    /// Human-readable failure message.
    pub message: String,
}

impl PredicateError {
    /// Creates a new predicate error with no column attached.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            column: None,
            message: message.into(),
        }
    }

    /// Attaches a column if none is set yet.
    pub fn in_column(mut self, column: &str) -> Self {
        if self.column.is_none() {
            self.column = Some(column.to_string());
        }
        self
    }

    fn describe(&self) -> String {
        match &self.column {
            Some(column) => format!("Column '{}': {}", column, self.message),
            None => format!("Predicate failed: {}", self.message),
        }
    }
}
