//! Derived pages: status filter, text search, sort cycle, pagination, columns

use crate::test_utils::*;
use roster::{ActiveFilter, Record, Roster, SortDirection, Value};

#[test]
fn active_filter_then_name_sort_shows_bravo_charlie() {
    let db = three_clients();
    let mut session = db.session("clients").unwrap();
    session.set_active(ActiveFilter::Active).unwrap();
    session.toggle_sort("name").unwrap();

    let page = session.page();
    assert_eq!(first_column(page.rows()), vec!["Bravo", "Charlie"]);
    assert_eq!(page.fetched, 2);
    assert!(!page.page.has_next);
}

#[test]
fn inactive_filter_refetches() {
    let db = three_clients();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();
    assert_eq!(session.snapshot().len(), 3);

    session.set_active(ActiveFilter::Inactive).unwrap();
    assert_eq!(ids(session.snapshot()), vec!["a"]);
}

#[test]
fn search_filters_locally_and_clears() {
    let db = three_clients();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();

    session.set_query("BRA");
    let page = session.page();
    assert_eq!(first_column(page.rows()), vec!["Bravo"]);
    assert_eq!(page.fetched, 3);
    assert_eq!(page.matched(), 1);

    session.set_query("bravo ");
    assert!(session.page().is_empty());

    session.set_query("zzz");
    assert!(session.page().is_empty());
    assert!(session.is_empty());

    session.set_query("");
    assert_eq!(session.page().matched(), 3);
}

#[test]
fn search_is_case_insensitive_on_accented_text() {
    let db = Roster::cache().unwrap();
    db.insert("clients", client("q1", "Québec Métal", true)).unwrap();
    db.insert("clients", client("q2", "Laval Bois", true)).unwrap();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();

    session.set_query("MÉTAL");
    assert_eq!(first_column(session.page().rows()), vec!["Québec Métal"]);
}

#[test]
fn header_clicks_cycle_through_directions() {
    let db = three_clients();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();

    session.toggle_sort("name").unwrap();
    let sort = session.state().sort.clone().unwrap();
    assert_eq!(sort.direction, SortDirection::Ascending);

    session.toggle_sort("name").unwrap();
    assert_eq!(
        first_column(session.page().rows()),
        vec!["Charlie", "Bravo", "Alpha"]
    );

    session.toggle_sort("name").unwrap();
    assert!(session.state().sort.is_none());
    assert_eq!(
        first_column(session.page().rows()),
        vec!["Alpha", "Bravo", "Charlie"]
    );
}

#[test]
fn sort_rejects_unknown_and_unsortable_columns() {
    let db = Roster::cache().unwrap();
    let mut contacts = db.session("contacts").unwrap();
    assert!(contacts.toggle_sort("nope").is_err());
    assert!(contacts.toggle_sort("office_phone").is_err());
    assert!(contacts.state().sort.is_none());
}

#[test]
fn nulls_stay_last_when_sorting_descending() {
    let db = Roster::cache().unwrap();
    db.insert("clients", client("k1", "Alpha", true).with("city", "Laval"))
        .unwrap();
    db.insert("clients", client("k2", "Bravo", true).with("city", Value::Null))
        .unwrap();
    db.insert("clients", client("k3", "Charlie", true).with("city", "Montréal"))
        .unwrap();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();

    session.toggle_sort("city").unwrap();
    let asc: Vec<String> = session.page().ids().iter().map(|id| id.to_string()).collect();
    assert_eq!(asc, vec!["k1", "k3", "k2"]);

    session.toggle_sort("city").unwrap();
    let desc: Vec<String> = session.page().ids().iter().map(|id| id.to_string()).collect();
    assert_eq!(desc, vec!["k3", "k1", "k2"]);
}

fn many_clients(n: usize) -> Roster {
    let db = Roster::cache().unwrap();
    for i in 0..n {
        db.insert(
            "clients",
            Record::new(format!("c{:02}", i))
                .with("name", format!("Client {:02}", i))
                .with("active", true),
        )
        .unwrap();
    }
    db
}

#[test]
fn pages_split_and_clamp() {
    let db = many_clients(25);
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();

    let first = session.page();
    assert_eq!(first.page.page_count, 3);
    assert_eq!(first.page.items.len(), 10);
    assert!(!first.page.has_previous);
    assert!(!session.prev_page());

    session.go_to_page(99);
    let last = session.page();
    assert_eq!(last.page.index, 2);
    assert_eq!(last.page.items.len(), 5);
    assert!(!last.page.has_next);
    assert!(!session.next_page());

    assert!(session.prev_page());
    assert_eq!(session.state().page, 1);
}

#[test]
fn changing_the_query_returns_to_first_page() {
    let db = many_clients(25);
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();
    assert!(session.next_page());

    session.set_query("client 2");
    assert_eq!(session.state().page, 0);
    assert_eq!(session.page().matched(), 5);
}

#[test]
fn configured_page_size_applies_to_new_sessions() {
    let db = many_clients(12);
    db.set_page_size(5).unwrap();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();
    assert_eq!(session.page().page.page_count, 3);
    assert!(db.set_page_size(0).is_err());
}

#[test]
fn hidden_columns_toggle() {
    let db = three_clients();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();
    assert!(!session.page().headers().contains(&"Alias"));

    assert!(session.toggle_column("alias").unwrap());
    assert!(session.page().headers().contains(&"Alias"));
    assert!(!session.toggle_column("alias").unwrap());
    assert!(session.toggle_column("missing").is_err());
}

#[test]
fn status_column_and_blank_cells_render() {
    let db = Roster::cache().unwrap();
    db.insert("clients", client("x1", "Alpha", false)).unwrap();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();

    let page = session.page();
    let headers = page.headers();
    let row = &page.rows()[0];
    let cell = |label: &str| {
        let i = headers.iter().position(|h| *h == label).unwrap();
        row[i].clone()
    };
    assert_eq!(cell("Status"), "Inactive");
    assert_eq!(cell("City"), "-");
}
