use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use rowdeck_lib::filter::FilterSet;
use rowdeck_lib::input::Modifiers;
use rowdeck_lib::model::{Column, RowData, RowKey};
use rowdeck_lib::table::{RowClickTarget, Table};

fn record(id: &str, instructor: &str) -> RowData {
    RowData::new().with("id", id).with("instructor", instructor)
}

fn table_with(records: Vec<RowData>) -> Table {
    let mut table = Table::builder()
        .columns(vec![
            Column::new("Id", "id").sortable(),
            Column::new("Instructor", "instructor").sortable(),
        ])
        .row_key(|data| RowKey::new(data.get_or_empty("id")))
        .selectable(|data| data.get("locked").is_none())
        .build()
        .unwrap();
    table.load(records).unwrap();
    table
}

fn ten_rows() -> Table {
    table_with((0..10).map(|i| record(&format!("r{i}"), "A")).collect())
}

fn keys(ids: &[&str]) -> Vec<RowKey> {
    ids.iter().map(|id| RowKey::new(*id)).collect()
}

#[test]
fn test_scenario_filter_then_select_all() {
    let mut table = table_with(vec![
        record("k0", "A"),
        record("k1", "B"),
        record("k2", "A"),
        record("k3", "B"),
        record("k4", "A"),
    ]);
    table.apply_filter_set(FilterSet::new().with_field("instructor", "A"));
    let output = table.render().unwrap();

    let visible: Vec<usize> = table
        .rows()
        .iter()
        .filter(|r| r.visible)
        .map(|r| r.original_index)
        .collect();
    assert_eq!(visible, vec![0, 2, 4]);
    assert_eq!(output.visible_count, 3);

    table.toggle_all(true);
    assert_eq!(table.selected_keys(), keys(&["k0", "k2", "k4"]));
}

#[test]
fn test_select_all_skips_hidden_and_unselectable() {
    let mut table = table_with(vec![
        record("k0", "A"),
        record("k1", "A").with("locked", "1"),
        record("k2", "B"),
        record("k3", "A"),
    ]);
    table.apply_filter_set(FilterSet::new().with_field("instructor", "a"));
    table.render().unwrap();

    let change = table.toggle_all(true);
    assert_eq!(change.added, keys(&["k0", "k3"]));
    assert!(change.removed.is_empty());
    assert_eq!(table.selected_keys(), keys(&["k0", "k3"]));
}

#[test]
fn test_hidden_selection_survives_toggle_all() {
    let mut table = table_with(vec![record("k0", "A"), record("k1", "B")]);
    table.toggle(&RowKey::new("k1"), true);

    table.apply_filter_set(FilterSet::new().with_field("instructor", "A"));
    table.render().unwrap();
    table.toggle_all(true);
    table.toggle_all(false);

    assert_eq!(table.selected_keys(), keys(&["k1"]));
    assert!(table.is_selected(&RowKey::new("k1")));
}

#[test]
fn test_visibility_and_selection_are_independent() {
    let mut table = table_with(vec![record("k0", "A"), record("k1", "B")]);
    table.toggle(&RowKey::new("k0"), true);

    table.apply_filter_set(FilterSet::new().with_field("instructor", "B"));
    table.render().unwrap();
    let k0 = table.store().find(&RowKey::new("k0")).unwrap();
    assert!(!k0.visible);
    assert!(k0.selected);

    table.toggle(&RowKey::new("k0"), false);
    table.clear_filter();
    table.render().unwrap();
    let k0 = table.store().find(&RowKey::new("k0")).unwrap();
    assert!(k0.visible);
    assert!(!k0.selected);
}

#[test]
fn test_range_select_scope_and_direction() {
    let expected = keys(&["r2", "r3", "r5", "r7"]);

    for (anchor, target) in [(2, 7), (7, 2)] {
        let mut table = ten_rows();
        table.set_filter(|data| Ok(!matches!(data.get_or_empty("id"), "r4" | "r6")));
        table.render().unwrap();

        table.row_click(anchor, RowClickTarget::Checkbox(true), Modifiers::NONE);
        table.row_click(target, RowClickTarget::Checkbox(true), Modifiers::SHIFT);

        assert_eq!(
            table.selected_keys(),
            expected,
            "anchor {anchor} -> {target}"
        );
    }
}

#[test]
fn test_range_select_skips_unselectable() {
    let mut records: Vec<RowData> = (0..5).map(|i| record(&format!("r{i}"), "A")).collect();
    records[2] = records[2].clone().with("locked", "yes");
    let mut table = table_with(records);
    table.render().unwrap();

    let change = table.range_select(0, 4, true);
    assert_eq!(change.added, keys(&["r0", "r1", "r3", "r4"]));
}

#[test]
fn test_range_select_clamps_out_of_range() {
    let mut table = ten_rows();
    table.render().unwrap();

    table.range_select(8, 500, true);
    assert_eq!(table.selected_keys(), keys(&["r8", "r9"]));

    assert!(table.range_select(12, 10, false).is_empty());
    assert_eq!(table.selected_keys(), keys(&["r8", "r9"]));

    let mut empty = table_with(Vec::new());
    assert!(empty.range_select(0, 3, true).is_empty());
}

#[test]
fn test_range_deselect_uses_clicked_state() {
    let mut table = ten_rows();
    table.render().unwrap();
    table.toggle_all(true);

    table.row_click(1, RowClickTarget::Row, Modifiers::NONE);
    table.row_click(3, RowClickTarget::Row, Modifiers::SHIFT);

    assert_eq!(
        table.selected_keys(),
        keys(&["r0", "r4", "r5", "r6", "r7", "r8", "r9"])
    );
}

#[test]
fn test_row_click_flips_and_sets_anchor() {
    let mut table = ten_rows();
    table.render().unwrap();

    table.row_click(4, RowClickTarget::Row, Modifiers::NONE);
    assert!(table.is_selected(&RowKey::new("r4")));
    assert_eq!(table.last_touched(), Some(4));

    table.row_click(4, RowClickTarget::Row, Modifiers::NONE);
    assert!(!table.is_selected(&RowKey::new("r4")));

    table.row_click(6, RowClickTarget::Checkbox(false), Modifiers::NONE);
    assert!(!table.is_selected(&RowKey::new("r6")));
    assert_eq!(table.last_touched(), Some(6));
}

#[test]
fn test_shift_click_without_anchor_toggles_single_row() {
    let mut table = ten_rows();
    table.render().unwrap();

    table.row_click(5, RowClickTarget::Row, Modifiers::SHIFT);
    assert_eq!(table.selected_keys(), keys(&["r5"]));

    // Same row as the anchor: plain toggle, not a range.
    table.row_click(5, RowClickTarget::Row, Modifiers::SHIFT);
    assert!(table.selected_keys().is_empty());
}

#[test]
fn test_referential_noops() {
    let mut table = ten_rows();
    table.render().unwrap();

    assert!(table.toggle(&RowKey::new("missing"), true).is_empty());
    assert!(
        table
            .row_click(99, RowClickTarget::Row, Modifiers::NONE)
            .is_empty()
    );
    assert_eq!(table.last_touched(), None);
    assert_eq!(table.selected_count(), 0);
}

#[test]
fn test_unselectable_row_cannot_be_selected_but_can_be_cleared() {
    let mut table = table_with(vec![record("k0", "A").with("locked", "1")]);
    assert!(table.toggle(&RowKey::new("k0"), true).is_empty());
    assert!(!table.is_selected(&RowKey::new("k0")));
}

#[test]
fn test_removal_purges_selection() {
    let mut table = table_with(vec![
        record("k1", "A"),
        record("k2", "A"),
        record("k3", "A"),
    ]);
    table.toggle_all(true);

    let removed = table.remove(&HashSet::from([RowKey::new("k2"), RowKey::new("gone")]));
    assert_eq!(removed, keys(&["k2"]));
    assert_eq!(table.selection().keys(), keys(&["k1", "k3"]));
    assert_eq!(table.selected_count(), 2);
    assert_eq!(table.last_touched(), None);
}

#[test]
fn test_reload_resets_selection() {
    let mut table = table_with(vec![record("k1", "A"), record("k2", "A")]);
    table.toggle_all(true);
    table.row_click(0, RowClickTarget::Row, Modifiers::NONE);

    table.load(vec![record("k1", "A"), record("k2", "A")]).unwrap();
    assert_eq!(table.selected_count(), 0);
    assert!(table.rows().iter().all(|r| !r.selected && r.visible));
    assert_eq!(table.last_touched(), None);
}

#[test]
fn test_selection_callback_fires_once_per_operation() {
    let calls: Rc<RefCell<Vec<(Vec<RowKey>, usize)>>> = Rc::default();
    let sink = Rc::clone(&calls);

    let mut table = Table::builder()
        .columns(vec![Column::new("Id", "id")])
        .row_key(|data| RowKey::new(data.get_or_empty("id")))
        .on_selection_changed(move |keys, count| sink.borrow_mut().push((keys.to_vec(), count)))
        .build()
        .unwrap();
    table
        .load((0..4).map(|i| RowData::new().with("id", format!("r{i}"))))
        .unwrap();

    table.toggle_all(true);
    table.toggle_all(true);
    table.toggle(&RowKey::new("r1"), false);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, 4);
    assert_eq!(calls[1], (keys(&["r0", "r2", "r3"]), 3));
}
