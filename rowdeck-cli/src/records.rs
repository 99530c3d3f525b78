//! Record loading for schedule files.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use log::debug;
use rowdeck_lib::model::RowData;
use rowdeck_lib::schedule::FIELDS;
use serde_json::{Map, Value};

/// Input file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Tab-separated, no header, schedule field order.
    Tsv,
    /// Array of objects.
    Json,
}

impl Format {
    /// Guesses the format from the file extension, defaulting to TSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Tsv,
        }
    }
}

/// Reads every record from a file.
pub fn read(path: &Path, format: Format) -> Result<Vec<RowData>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let records = match format {
        Format::Tsv => parse_tsv(&text),
        Format::Json => parse_json(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
    };
    debug!(
        "records::read: {} records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

fn parse_tsv(text: &str) -> Vec<RowData> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            FIELDS
                .iter()
                .zip(line.split('\t'))
                .map(|(field, value)| (field.to_string(), value.trim().to_string()))
                .collect()
        })
        .collect()
}

fn parse_json(text: &str) -> Result<Vec<RowData>> {
    let objects: Vec<Value> = serde_json::from_str(text)?;
    objects
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(map) => Ok(from_object(map)),
            other => bail!("Record {} is not an object: {}", index, other),
        })
        .collect()
}

fn from_object(map: Map<String, Value>) -> RowData {
    map.into_iter()
        .filter_map(|(field, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((field, s)),
            other => Some((field, other.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_uses_schedule_field_order() {
        let rows = parse_tsv("2024-03-04\tAM\tKids\t08:00\t09:00\tYOGA\tAna\tG1\t60\t1\n\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("instructor"), Some("Ana"));
        assert_eq!(rows[0].get("units"), Some("1"));
    }

    #[test]
    fn test_short_tsv_lines_leave_fields_missing() {
        let rows = parse_tsv("2024-03-04\tAM");
        assert_eq!(rows[0].get("shift"), Some("AM"));
        assert_eq!(rows[0].get("area"), None);
    }

    #[test]
    fn test_json_values_become_strings() {
        let rows = parse_json(r#"[{"id": "a", "minutes": 45, "group": null}]"#).unwrap();
        assert_eq!(rows[0].get("minutes"), Some("45"));
        assert_eq!(rows[0].get("group"), None);
    }

    #[test]
    fn test_json_rejects_non_objects() {
        assert!(parse_json("[1]").is_err());
        assert!(parse_json("{").is_err());
    }
}
