//! Fetch sequencing and fetch failures

use crate::test_utils::*;
use roster::{ActiveFilter, Database, ErrorKind, Level, Record, Roster};

#[test]
fn stale_fetch_does_not_overwrite_newer_result() {
    let db = three_clients();
    let mut session = db.session("clients").unwrap();

    // fetch for "all" is in flight when the user switches to "active"
    let slow = session.begin_fetch();
    let slow_rows = session.run_fetch(&slow).unwrap();
    session.set_active(ActiveFilter::Active).unwrap();
    assert_eq!(session.snapshot().len(), 2);

    assert!(!session.complete_fetch(slow, Ok(slow_rows)));
    assert_eq!(session.snapshot().len(), 2);
    assert!(session.snapshot().iter().all(|r| r.active() == Some(true)));
}

#[test]
fn only_latest_ticket_is_applied_in_any_completion_order() {
    let db = three_clients();
    let mut session = db.session("clients").unwrap();

    let first = session.begin_fetch();
    let second = session.begin_fetch();
    assert!(session.is_loading());

    let second_rows = session.run_fetch(&second).unwrap();
    assert!(session.complete_fetch(second, Ok(second_rows)));
    assert!(!session.is_loading());

    let late = vec![Record::new("ghost").with("name", "Ghost")];
    assert!(!session.complete_fetch(first, Ok(late)));
    assert_eq!(ids(session.snapshot()), vec!["a", "b", "c"]);
}

#[test]
fn stale_failure_is_silent() {
    let db = three_clients();
    let mut session = db.session("clients").unwrap();

    let first = session.begin_fetch();
    session.refresh().unwrap();
    let err = roster::Error::Network {
        reason: "timed out".to_string(),
    };
    assert!(!session.complete_fetch(first, Err(err)));
    assert!(session.notifications().is_empty());
}

#[test]
fn fetch_failure_keeps_snapshot_and_notifies() {
    let inner = Database::cache().unwrap();
    let backend = Switchable::wrap(inner.clone());
    let db = Roster::with_backend(inner, backend.clone());
    db.insert("clients", client("x1", "Alpha", true)).unwrap();

    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();
    assert_eq!(session.snapshot().len(), 1);

    backend.set_down(true);
    let err = session.refresh().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    assert_eq!(session.snapshot().len(), 1);
    assert!(!session.is_loading());

    let notes = session.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Error);
    assert_eq!(notes[0].title, "Error");
    assert!(notes[0].message.contains("connection reset by peer"));

    backend.set_down(false);
    session.refresh().unwrap();
    assert!(session.notifications().is_empty());
}
