//! Tab-separated export for copying rows out of a table.

use std::borrow::Cow;

use crate::model::RowData;

/// Neutralises spreadsheet formula injection.
///
/// Cells starting with `+`, `-`, `=` or `@` get a leading `'`. Tabs and line
/// breaks become spaces so a cell never splits the TSV layout.
pub fn sanitize_cell(value: &str) -> Cow<'_, str> {
    let needs_quote = value.starts_with(['+', '-', '=', '@']);
    let needs_flatten = value.contains(['\t', '\n', '\r']);

    if !needs_quote && !needs_flatten {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 1);
    if needs_quote {
        out.push('\'');
    }
    for c in value.chars() {
        out.push(match c {
            '\t' | '\n' | '\r' => ' ',
            c => c,
        });
    }
    Cow::Owned(out)
}

/// Renders rows as TSV: one line per row, fields in the given order, missing
/// fields empty. No header line, no trailing newline.
///
/// # Example
///
/// ```
/// use rowdeck_lib::export::to_tsv;
/// use rowdeck_lib::model::RowData;
///
/// let rows = vec![
///     RowData::new().with("code", "A1").with("units", "2"),
///     RowData::new().with("code", "=SUM(A1)"),
/// ];
/// assert_eq!(to_tsv(&["code", "units"], &rows), "A1\t2\n'=SUM(A1)\t");
/// ```
pub fn to_tsv<S: AsRef<str>>(fields: &[S], rows: &[RowData]) -> String {
    rows.iter()
        .map(|row| {
            fields
                .iter()
                .map(|field| sanitize_cell(row.get_or_empty(field.as_ref())))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
