//! Opening a database from options and a config file

use crate::test_utils::*;
use roster::{AccessMode, ActiveFilter, Error, OpenOptions, Roster};
use std::fs;
use tempfile::TempDir;

#[test]
fn seeded_read_only_database_lists_but_refuses_writes() {
    let options = OpenOptions::new().access_mode(AccessMode::ReadOnly).seed(3);
    let db = Roster::open(&options).unwrap();

    let info = db.info().unwrap();
    assert_eq!(info.access_mode, AccessMode::ReadOnly);
    let clients = info
        .collections
        .iter()
        .find(|c| c.name == "clients")
        .unwrap();
    assert_eq!(clients.count, 10);

    let err = db.insert("clients", client("x1", "Alpha", true)).unwrap_err();
    assert!(matches!(err, Error::AccessDenied { .. }));

    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();
    assert_eq!(session.page().page.items.len(), 10);

    session.open_create().unwrap();
    session.edit_field("name", "Alpha").unwrap();
    assert!(session.submit().is_err());
    assert!(session.dialog().is_open());
    assert_eq!(db.list("clients", ActiveFilter::All).unwrap().len(), 10);
}

#[test]
fn config_file_sets_page_size_and_default_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.toml");
    fs::write(
        &path,
        r#"
page_size = 2

[default_sort.clients]
field = "name"
direction = "descending"
"#,
    )
    .unwrap();

    let db = Roster::open(&OpenOptions::new().config_path(&path)).unwrap();
    db.insert("clients", client("b", "Bravo", true)).unwrap();
    db.insert("clients", client("a", "Alpha", true)).unwrap();
    db.insert("clients", client("c", "Charlie", true)).unwrap();

    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();
    let page = session.page();
    assert_eq!(page.page.page_count, 2);
    assert_eq!(first_column(page.rows()), vec!["Charlie", "Bravo"]);
}

#[test]
fn missing_config_file_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let options = OpenOptions::new().config_path(dir.path().join("absent.toml"));
    assert!(Roster::open(&options).is_err());
}

#[test]
fn ping_and_config() {
    let db = Roster::cache().unwrap();
    assert!(!db.ping().unwrap().is_empty());
    assert_eq!(db.config().unwrap().page_size, 10);
    db.set_page_size(25).unwrap();
    assert_eq!(db.config().unwrap().page_size, 25);
}
