//! Schedule preset: the class-schedule table of the admin page.
//!
//! Records carry ten business fields plus the derived `status` and
//! `overlapped` fields.

use std::collections::HashMap;

use crate::model::{clock_to_minutes, Column, RowData, RowKey, ValueParser};

/// Business fields in output order.
pub const FIELDS: [&str; 10] = [
    "date",
    "shift",
    "area",
    "start_time",
    "end_time",
    "code",
    "instructor",
    "group",
    "minutes",
    "units",
];

/// Derived flag set by [`mark_overlaps`].
pub const OVERLAPPED: &str = "overlapped";
/// Row lifecycle field.
pub const STATUS: &str = "status";

const KEY_SEPARATOR: char = '\u{1f}';

/// Record index with its start and end in minutes.
type Slot = (usize, f64, f64);

/// The ten schedule columns, all sortable, with typed parsers for times and
/// counts.
pub fn columns() -> Vec<Column> {
    vec![
        Column::new("Date", "date").sortable(),
        Column::new("Shift", "shift").sortable(),
        Column::new("Area", "area").sortable(),
        Column::new("Start", "start_time")
            .sortable()
            .parser(ValueParser::ClockTime),
        Column::new("End", "end_time")
            .sortable()
            .parser(ValueParser::ClockTime),
        Column::new("Code", "code").sortable(),
        Column::new("Instructor", "instructor").sortable(),
        Column::new("Group", "group").sortable(),
        Column::new("Minutes", "minutes")
            .sortable()
            .parser(ValueParser::Numeric),
        Column::new("Units", "units")
            .sortable()
            .parser(ValueParser::Numeric),
    ]
}

/// Composite key over all ten business fields.
pub fn business_key(data: &RowData) -> RowKey {
    let mut key = String::new();
    for (i, field) in FIELDS.iter().enumerate() {
        if i > 0 {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(data.get_or_empty(field).trim());
    }
    RowKey::new(key)
}

/// Prefers an explicit `id`, falling back to [`business_key`].
pub fn row_key(data: &RowData) -> RowKey {
    match data.get("id").map(str::trim) {
        Some(id) if !id.is_empty() => RowKey::new(id),
        _ => business_key(data),
    }
}

/// Whether a record is live (no status, or `active`).
pub fn is_active(data: &RowData) -> bool {
    data.get(STATUS)
        .is_none_or(|s| s.trim().eq_ignore_ascii_case("active"))
}

/// Whether a record may be selected.
///
/// Rows already `assigned` or `not_found` in an assignment preview are
/// locked.
pub fn is_selectable(data: &RowData) -> bool {
    !data.get(STATUS).is_some_and(|s| {
        let s = s.trim();
        s.eq_ignore_ascii_case("assigned") || s.eq_ignore_ascii_case("not_found")
    })
}

/// Sets `overlapped` on every record.
///
/// Two records overlap when they share instructor and date and their
/// `[start_time, end_time)` intervals intersect. Instructor names compare
/// case-insensitively. Records with a blank instructor or unparsable times
/// are never overlapped.
pub fn mark_overlaps(records: &mut [RowData]) {
    let mut groups: HashMap<(String, String), Vec<Slot>> = HashMap::new();

    for (index, data) in records.iter().enumerate() {
        let instructor = data.get_or_empty("instructor").trim().to_lowercase();
        if instructor.is_empty() {
            continue;
        }
        let start = clock_to_minutes(data.get_or_empty("start_time"));
        let end = clock_to_minutes(data.get_or_empty("end_time"));
        if let (Some(start), Some(end)) = (start, end)
            && start < end
        {
            let date = data.get_or_empty("date").trim().to_string();
            groups
                .entry((instructor, date))
                .or_default()
                .push((index, start, end));
        }
    }

    let mut overlapped = vec![false; records.len()];
    for slots in groups.values() {
        for (i, &(a, a_start, a_end)) in slots.iter().enumerate() {
            for &(b, b_start, b_end) in &slots[i + 1..] {
                if a_start < b_end && b_start < a_end {
                    overlapped[a] = true;
                    overlapped[b] = true;
                }
            }
        }
    }

    for (data, flag) in records.iter_mut().zip(overlapped) {
        data.set_flag(OVERLAPPED, flag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(instructor: &str, date: &str, start: &str, end: &str) -> RowData {
        RowData::new()
            .with("instructor", instructor)
            .with("date", date)
            .with("start_time", start)
            .with("end_time", end)
    }

    #[test]
    fn test_overlap_same_instructor_same_day() {
        let mut records = vec![
            slot("Ana", "2024-03-01", "08:00", "10:00"),
            slot("ana ", "2024-03-01", "09:30", "11:00"),
            slot("Ana", "2024-03-01", "10:00", "12:00"),
            slot("Ana", "2024-03-02", "08:00", "10:00"),
            slot("Luis", "2024-03-01", "08:00", "10:00"),
        ];
        mark_overlaps(&mut records);
        let flags: Vec<bool> = records.iter().map(|r| r.flag(OVERLAPPED)).collect();
        assert_eq!(flags, vec![true, true, true, false, false]);
    }

    #[test]
    fn test_touching_slots_do_not_overlap() {
        let mut records = vec![
            slot("Ana", "d", "08:00", "10:00"),
            slot("Ana", "d", "10:00", "12:00"),
        ];
        mark_overlaps(&mut records);
        assert!(records.iter().all(|r| !r.flag(OVERLAPPED)));
        assert_eq!(records[0].get(OVERLAPPED), Some("false"));
    }

    #[test]
    fn test_unparsable_and_blank_never_overlap() {
        let mut records = vec![
            slot("Ana", "d", "8am", "10:00"),
            slot("Ana", "d", "08:00", "10:00"),
            slot("", "d", "08:00", "10:00"),
            slot("", "d", "08:00", "10:00"),
        ];
        mark_overlaps(&mut records);
        assert!(records.iter().all(|r| !r.flag(OVERLAPPED)));
    }

    #[test]
    fn test_row_key_prefers_id() {
        let with_id = RowData::new().with("id", "abc").with("code", "X");
        let without = RowData::new().with("code", "X").with("date", "d");
        assert_eq!(row_key(&with_id), RowKey::new("abc"));
        assert_eq!(row_key(&without), business_key(&without));
        assert_ne!(
            business_key(&RowData::new().with("code", "a").with("group", "b")),
            business_key(&RowData::new().with("code", "ab"))
        );
    }

    #[test]
    fn test_status_rules() {
        assert!(is_active(&RowData::new()));
        assert!(is_active(&RowData::new().with(STATUS, "Active")));
        assert!(!is_active(&RowData::new().with(STATUS, "deleted")));
        assert!(is_selectable(&RowData::new().with(STATUS, "to_update")));
        assert!(!is_selectable(&RowData::new().with(STATUS, "assigned")));
        assert!(!is_selectable(&RowData::new().with(STATUS, "NOT_FOUND")));
    }
}
