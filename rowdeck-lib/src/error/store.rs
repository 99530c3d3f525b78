//! Row store error types

use crate::model::RowKey;

/// Errors raised by [`RowStore`](crate::store::RowStore) mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Two records derived the same key.
    #[error("Duplicate row key '{key}' at record {index}")]
    DuplicateKey { key: RowKey, index: usize },
}
