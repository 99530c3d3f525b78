//! Column descriptors and typed value parsing for comparisons.

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::PredicateError;

/// Custom cell parser signature.
pub type ParseFn = dyn Fn(&str) -> Result<SortValue, PredicateError> + Send + Sync;

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?\s*([AaPp])\.?\s*[Mm]?\.?$|^(\d{1,2}):(\d{2})(?::(\d{2}))?$")
        .expect("clock regex is valid")
});

/// A comparable value produced by a column's parser.
///
/// Across kinds the order is `Number < Text < Missing`, so unparsable or
/// empty cells collect at the end of an ascending sort.
#[derive(Debug, Clone)]
pub enum SortValue {
    /// Numeric value (also used for clock times, as minutes since midnight).
    Number(f64),
    /// Normalized text (trimmed, lowercased).
    Text(String),
    /// Empty or unparsable cell.
    Missing,
}

impl SortValue {
    fn rank(&self) -> u8 {
        match self {
            SortValue::Number(_) => 0,
            SortValue::Text(_) => 1,
            SortValue::Missing => 2,
        }
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortValue {}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// How raw cell strings become comparable values.
#[derive(Clone, Default)]
pub enum ValueParser {
    /// Case-insensitive text.
    #[default]
    Text,
    /// Decimal number; unparsable cells are missing.
    Numeric,
    /// Time of day (`8:05`, `14:30`, `14:30:15`, `2:30 PM`) as minutes.
    ClockTime,
    /// Host-supplied parser. Errors propagate out of render.
    Custom(Arc<ParseFn>),
}

impl ValueParser {
    /// Wraps a closure as a custom parser.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<SortValue, PredicateError> + Send + Sync + 'static,
    {
        ValueParser::Custom(Arc::new(f))
    }

    /// Parses one raw cell.
    pub fn parse(&self, raw: &str) -> Result<SortValue, PredicateError> {
        let trimmed = raw.trim();
        match self {
            ValueParser::Custom(f) => f(raw),
            _ if trimmed.is_empty() => Ok(SortValue::Missing),
            ValueParser::Text => Ok(SortValue::Text(trimmed.to_lowercase())),
            ValueParser::Numeric => Ok(trimmed
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map_or(SortValue::Missing, SortValue::Number)),
            ValueParser::ClockTime => Ok(clock_to_minutes(trimmed)
                .map_or(SortValue::Missing, SortValue::Number)),
        }
    }
}

impl fmt::Debug for ValueParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueParser::Text => f.write_str("Text"),
            ValueParser::Numeric => f.write_str("Numeric"),
            ValueParser::ClockTime => f.write_str("ClockTime"),
            ValueParser::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Converts a time of day to minutes since midnight.
///
/// Accepts 24-hour `H:MM`/`HH:MM[:SS]` and 12-hour forms with an `AM`/`PM`
/// suffix. Seconds contribute a fraction of a minute.
pub fn clock_to_minutes(raw: &str) -> Option<f64> {
    let caps = CLOCK_RE.captures(raw.trim())?;

    let (hour, minute, second, meridiem) = if caps.get(1).is_some() {
        (caps.get(1)?, caps.get(2)?, caps.get(3), caps.get(4))
    } else {
        (caps.get(5)?, caps.get(6)?, caps.get(7), None)
    };

    let mut hour: u32 = hour.as_str().parse().ok()?;
    let minute: u32 = minute.as_str().parse().ok()?;
    let second: u32 = match second {
        Some(s) => s.as_str().parse().ok()?,
        None => 0,
    };
    if minute > 59 || second > 59 {
        return None;
    }

    match meridiem.map(|m| m.as_str().to_ascii_lowercase()) {
        Some(m) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            hour %= 12;
            if m == "p" {
                hour += 12;
            }
        }
        None if hour > 23 => return None,
        None => {}
    }

    Some(f64::from(hour * 60 + minute) + f64::from(second) / 60.0)
}

/// Column descriptor.
///
/// # Example
///
/// ```
/// use rowdeck_lib::model::{Column, ValueParser};
///
/// let columns = vec![
///     Column::new("Date", "date").sortable(),
///     Column::new("Start", "start_time").sortable().parser(ValueParser::ClockTime),
///     Column::new("Notes", "notes"),
/// ];
/// assert!(columns[1].sortable);
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Header text.
    pub label: String,
    /// Field name in [`RowData`](super::RowData).
    pub key: String,
    /// Whether header clicks sort by this column.
    pub sortable: bool,
    /// Comparison parser.
    pub parser: ValueParser,
}

impl Column {
    /// Creates a non-sortable text column.
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            sortable: false,
            parser: ValueParser::Text,
        }
    }

    /// Makes the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets the value parser.
    pub fn parser(mut self, parser: ValueParser) -> Self {
        self.parser = parser;
        self
    }

    /// Parses this column's cell, tagging errors with the column key.
    pub fn parse(&self, raw: &str) -> Result<SortValue, PredicateError> {
        self.parser.parse(raw).map_err(|e| e.in_column(&self.key))
    }
}
