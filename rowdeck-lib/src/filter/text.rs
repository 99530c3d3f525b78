//! Text-field filter composition.

use crate::error::PredicateError;
use crate::model::RowData;

/// Substring filter on one field.
///
/// The input is split on commas; a row matches when its field contains any of
/// the terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    /// Field name.
    pub column: String,
    /// Non-empty trimmed terms.
    pub terms: Vec<String>,
}

impl FieldFilter {
    /// Parses raw filter input. Returns `None` when the input has no terms.
    pub fn parse(column: impl Into<String>, input: &str) -> Option<Self> {
        let terms: Vec<String> = input
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        if terms.is_empty() {
            return None;
        }
        Some(Self {
            column: column.into(),
            terms,
        })
    }

    /// Whether the row's field contains any term.
    pub fn matches(&self, data: &RowData, case_sensitive: bool) -> bool {
        let value = data.get_or_empty(&self.column);
        if case_sensitive {
            self.terms.iter().any(|t| value.contains(t.as_str()))
        } else {
            let value = value.to_lowercase();
            self.terms
                .iter()
                .any(|t| value.contains(t.to_lowercase().as_str()))
        }
    }
}

/// AND-composition of field filters and flag requirements.
///
/// # Example
///
/// ```
/// use rowdeck_lib::filter::FilterSet;
/// use rowdeck_lib::model::RowData;
///
/// let filter = FilterSet::new()
///     .with_field("instructor", "ana, luis")
///     .with_field("area", "kids")
///     .require_value("status", "active");
///
/// let row = RowData::new()
///     .with("instructor", "Luis Pérez")
///     .with("area", "KIDS online")
///     .with("status", "active");
/// assert!(filter.matches(&row));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    fields: Vec<FieldFilter>,
    required_flags: Vec<String>,
    required_values: Vec<(String, String)>,
    case_sensitive: bool,
}

impl FilterSet {
    /// Creates an empty filter set (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text field filter. Blank input is ignored.
    pub fn with_field(mut self, column: impl Into<String>, input: &str) -> Self {
        let column = column.into();
        self.fields.retain(|f| f.column != column);
        if let Some(field) = FieldFilter::parse(column, input) {
            self.fields.push(field);
        }
        self
    }

    /// Requires a boolean flag field to be true (e.g. `overlapped`).
    pub fn require_flag(mut self, flag: impl Into<String>) -> Self {
        self.required_flags.push(flag.into());
        self
    }

    /// Requires a field to equal a value (case-insensitive).
    pub fn require_value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.required_values.push((field.into(), value.into()));
        self
    }

    /// Switches text matching to case-sensitive.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Text field filters in insertion order.
    pub fn fields(&self) -> &[FieldFilter] {
        &self.fields
    }

    /// Whether the set has no constraints at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.required_flags.is_empty() && self.required_values.is_empty()
    }

    /// Evaluates the set against one row.
    pub fn matches(&self, data: &RowData) -> bool {
        self.fields
            .iter()
            .all(|f| f.matches(data, self.case_sensitive))
            && self.required_flags.iter().all(|flag| data.flag(flag))
            && self.required_values.iter().all(|(field, expected)| {
                data.get(field)
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
            })
    }

    /// Turns the set into a predicate for [`FilterEvaluator`](super::FilterEvaluator).
    pub fn into_predicate(self) -> impl Fn(&RowData) -> Result<bool, PredicateError> + 'static {
        move |data| Ok(self.matches(data))
    }
}
