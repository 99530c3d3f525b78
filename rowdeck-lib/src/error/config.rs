//! Configuration error types

/// Errors raised while building a [`Table`](crate::table::Table).
///
/// These are fatal: a table with a broken descriptor never gets built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No row key deriver was supplied.
    #[error("Row key deriver is required")]
    MissingRowKey,

    /// The table was configured without any columns.
    #[error("At least one column is required")]
    NoColumns,

    /// A column has an empty key.
    #[error("Column '{label}' has an empty key")]
    EmptyColumnKey { label: String },

    /// Two columns share the same key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumn { key: String },

    /// Options could not be parsed.
    #[error("Invalid table options: {0}")]
    InvalidOptions(String),
}
