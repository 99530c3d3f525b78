//! Row records and their transient display flags.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a logical row.
///
/// Derived from row data by the host's key function, so the same record keeps
/// its key across reloads and re-renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    /// Creates a key from any string-like value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RowKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Column name to value mapping for one record.
///
/// Values are kept as strings; derived flags (`overlapped`, `status`, ...)
/// live alongside the business fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowData(BTreeMap<String, String>);

impl RowData {
    /// Creates empty row data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the value of a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Gets the value of a field, or an empty string when absent.
    pub fn get_or_empty(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Sets a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Reads a boolean flag field.
    ///
    /// `true`, `1` and `yes` (any case) are true; anything else, including a
    /// missing field, is false.
    pub fn flag(&self, field: &str) -> bool {
        matches!(
            self.get(field)
                .map(|v| v.trim().to_ascii_lowercase())
                .as_deref(),
            Some("true" | "1" | "yes")
        )
    }

    /// Sets a boolean flag field.
    pub fn set_flag(&mut self, field: impl Into<String>, value: bool) {
        self.insert(field, if value { "true" } else { "false" });
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RowData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One displayed record plus its transient flags.
///
/// `visible` belongs to the filter, `selected` to the selection controller;
/// neither writes the other's flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Stable unique key.
    pub key: RowKey,
    /// Record contents.
    pub data: RowData,
    /// Whether the current filter lets the row through.
    pub visible: bool,
    /// Whether the row is selected.
    pub selected: bool,
    /// Position at load time. Final sort tie-break.
    pub original_index: usize,
}

impl Row {
    /// Creates a visible, unselected row.
    pub fn new(key: RowKey, data: RowData, original_index: usize) -> Self {
        Self {
            key,
            data,
            visible: true,
            selected: false,
            original_index,
        }
    }
}
