use std::cell::Cell;
use std::rc::Rc;

use rowdeck_lib::error::PredicateError;
use rowdeck_lib::input::Modifiers;
use rowdeck_lib::model::{Column, RowData, RowKey, ValueParser};
use rowdeck_lib::sort::{SortCriterion, SortDirection};
use rowdeck_lib::table::Table;

fn people() -> Vec<RowData> {
    [
        ("p0", "Ruiz", "10"),
        ("p1", "Abad", "9"),
        ("p2", "Ruiz", "2"),
        ("p3", "Abad", "9"),
        ("p4", "Ruiz", ""),
    ]
    .into_iter()
    .map(|(id, name, score)| {
        RowData::new()
            .with("id", id)
            .with("name", name)
            .with("score", score)
    })
    .collect()
}

fn people_table() -> Table {
    let mut table = Table::builder()
        .columns(vec![
            Column::new("Id", "id"),
            Column::new("Name", "name").sortable(),
            Column::new("Score", "score")
                .sortable()
                .parser(ValueParser::Numeric),
        ])
        .row_key(|data| RowKey::new(data.get_or_empty("id")))
        .build()
        .unwrap();
    table.load(people()).unwrap();
    table
}

fn order(table: &Table) -> Vec<&str> {
    table.rows().iter().map(|r| r.key.as_str()).collect()
}

#[test]
fn test_plain_click_cycle() {
    let mut table = people_table();

    assert!(table.sort_click("name", Modifiers::NONE));
    assert_eq!(
        table.criteria().direction_of("name"),
        Some(SortDirection::Ascending)
    );
    table.render().unwrap();
    assert_eq!(order(&table), vec!["p1", "p3", "p0", "p2", "p4"]);

    assert!(table.sort_click("name", Modifiers::NONE));
    assert_eq!(
        table.criteria().direction_of("name"),
        Some(SortDirection::Descending)
    );
    table.render().unwrap();
    // Ties keep load order regardless of direction.
    assert_eq!(order(&table), vec!["p0", "p2", "p4", "p1", "p3"]);

    assert!(table.sort_click("name", Modifiers::NONE));
    assert!(table.criteria().is_empty());
    table.render().unwrap();
    assert_eq!(order(&table), vec!["p0", "p1", "p2", "p3", "p4"]);

    assert!(table.sort_click("name", Modifiers::NONE));
    assert_eq!(
        table.criteria().direction_of("name"),
        Some(SortDirection::Ascending)
    );
}

#[test]
fn test_shift_click_builds_multi_criteria() {
    let mut table = people_table();

    table.sort_click("name", Modifiers::NONE);
    table.sort_click("score", Modifiers::SHIFT);
    assert_eq!(table.criteria().position_of("name"), Some(1));
    assert_eq!(table.criteria().position_of("score"), Some(2));

    table.render().unwrap();
    // Missing scores sort last ascending.
    assert_eq!(order(&table), vec!["p1", "p3", "p2", "p0", "p4"]);

    table.sort_click("score", Modifiers::SHIFT);
    assert_eq!(
        table.criteria().direction_of("score"),
        Some(SortDirection::Descending)
    );

    table.sort_click("name", Modifiers::CTRL);
    assert_eq!(table.criteria().criteria(), &[SortCriterion::desc("score")]);
}

#[test]
fn test_multi_criterion_sort_is_stable() {
    let mut table = people_table();
    table.set_sort(vec![
        SortCriterion::asc("name"),
        SortCriterion::desc("score"),
    ]);
    table.render().unwrap();

    // p1 and p3 tie on both keys, so load order decides. Missing scores
    // come first when descending.
    assert_eq!(order(&table), vec!["p1", "p3", "p4", "p0", "p2"]);

    let again = table.render().unwrap();
    let keys: Vec<&str> = again.rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["p1", "p3", "p4", "p0", "p2"]);
}

#[test]
fn test_numeric_column_sorts_by_value() {
    let mut table = people_table();
    table.set_sort(vec![SortCriterion::asc("score")]);
    table.render().unwrap();
    assert_eq!(order(&table), vec!["p2", "p1", "p3", "p0", "p4"]);
}

#[test]
fn test_unsortable_and_unknown_columns_are_ignored() {
    let mut table = people_table();

    assert!(!table.sort_click("id", Modifiers::NONE));
    assert!(!table.sort_click("nope", Modifiers::SHIFT));
    assert!(table.criteria().is_empty());

    table.set_sort(vec![
        SortCriterion::asc("id"),
        SortCriterion::desc("name"),
        SortCriterion::asc("name"),
    ]);
    assert_eq!(table.criteria().criteria(), &[SortCriterion::desc("name")]);
}

#[test]
fn test_selection_follows_rows_across_sort() {
    let mut table = people_table();
    table.toggle(&RowKey::new("p2"), true);

    table.set_sort(vec![SortCriterion::asc("score")]);
    table.render().unwrap();

    assert_eq!(table.rows()[0].key, RowKey::new("p2"));
    assert!(table.rows()[0].selected);
    assert_eq!(table.selected_keys(), vec![RowKey::new("p2")]);
}

#[test]
fn test_parser_error_leaves_order_unchanged() {
    let strict = ValueParser::custom(|raw| {
        raw.parse::<f64>()
            .map(rowdeck_lib::model::SortValue::Number)
            .map_err(|_| PredicateError::new(format!("not a number: {raw:?}")))
    });
    let mut table = Table::builder()
        .columns(vec![
            Column::new("Score", "score").sortable().parser(strict),
        ])
        .row_key(|data| RowKey::new(data.get_or_empty("id")))
        .build()
        .unwrap();
    table.load(people()).unwrap();

    table.set_sort(vec![SortCriterion::desc("score")]);
    let err = table.render().unwrap_err();
    assert_eq!(err.column.as_deref(), Some("score"));
    assert_eq!(order(&table), vec!["p0", "p1", "p2", "p3", "p4"]);
}

#[test]
fn test_applied_callback_fires_per_render() {
    let renders = Rc::new(Cell::new(0));
    let counter = Rc::clone(&renders);

    let mut table = Table::builder()
        .columns(vec![Column::new("Name", "name").sortable()])
        .row_key(|data| RowKey::new(data.get_or_empty("id")))
        .on_filter_or_sort_applied(move || counter.set(counter.get() + 1))
        .build()
        .unwrap();
    table.load(people()).unwrap();

    table.render().unwrap();
    table.sort_click("name", Modifiers::NONE);
    table.render().unwrap();
    assert_eq!(renders.get(), 2);
}

#[test]
fn test_failed_render_commits_neither_filter_nor_sort() {
    let code = ValueParser::custom(|raw| match raw {
        "bad" => Err(PredicateError::new("unreadable code")),
        other => Ok(rowdeck_lib::model::SortValue::Text(other.to_string())),
    });
    let mut table = Table::builder()
        .columns(vec![
            Column::new("Name", "name"),
            Column::new("Code", "code").sortable().parser(code),
        ])
        .row_key(|data| RowKey::new(data.get_or_empty("name")))
        .build()
        .unwrap();
    table
        .load(
            [("a", "z"), ("b", "y"), ("c", "bad"), ("d", "x"), ("e", "w")]
                .map(|(name, code)| RowData::new().with("name", name).with("code", code)),
        )
        .unwrap();
    table.render().unwrap();

    table.set_filter(|data| Ok(data.get_or_empty("name") != "a"));
    table.sort_click("code", Modifiers::NONE);
    let err = table.render().unwrap_err();
    assert_eq!(err.column.as_deref(), Some("code"));

    assert!(table.rows().iter().all(|r| r.visible));
    assert_eq!(order(&table), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(table.toggle_all(true).added.len(), 5);
}
