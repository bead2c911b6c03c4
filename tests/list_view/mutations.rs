//! Dialog writes, deletes and the refetch that follows them

use crate::test_utils::*;
use roster::{
    ActiveFilter, Database, Error, ErrorKind, FieldFilter, Level, RecordId, Roster, Value,
};

#[test]
fn create_then_delete_leaves_no_trace() {
    let db = Roster::cache().unwrap();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();

    let id = session.open_create().unwrap();
    session.edit_field("name", "Alpha").unwrap();
    session.submit().unwrap();

    assert!(!session.dialog().is_open());
    assert!(session.snapshot().iter().any(|r| r.id() == &id));
    let created = session.take_notifications();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].level, Level::Success);
    assert_eq!(created[0].message, format!("Record {} created", id));

    session.delete(&id).unwrap();
    assert!(session.snapshot().iter().all(|r| r.id() != &id));
    assert_eq!(
        session.take_notifications()[0].message,
        format!("Record {} deleted", id)
    );

    let rows = db.list("clients", ActiveFilter::All).unwrap();
    assert!(rows.is_empty());
    assert!(matches!(
        db.get("clients", id.as_str()),
        Err(Error::RecordNotFound { .. })
    ));
}

#[test]
fn new_records_start_active() {
    let db = Roster::cache().unwrap();
    let mut session = db.session("clients").unwrap();
    session.open_create().unwrap();
    let draft = session.dialog().draft().unwrap();
    assert_eq!(draft.get("active"), Some(&Value::Bool(true)));
}

#[test]
fn deactivated_row_leaves_active_list_after_refetch() {
    let db = Roster::cache().unwrap();
    db.insert("clients", client("x1", "Alpha", true)).unwrap();
    db.insert("clients", client("x2", "Bravo", true)).unwrap();

    let mut session = db.session("clients").unwrap();
    session.set_active(ActiveFilter::Active).unwrap();
    session.refresh().unwrap();
    assert_eq!(session.snapshot().len(), 2);

    let x1 = RecordId::new("x1");
    session.open_edit(&x1).unwrap();
    session.edit_field("active", false).unwrap();
    session.submit().unwrap();

    assert_eq!(ids(session.snapshot()), vec!["x2"]);
    assert_eq!(db.get("clients", "x1").unwrap().active(), Some(false));
}

#[test]
fn edit_sends_only_changed_fields() {
    let db = Roster::cache().unwrap();
    db.insert(
        "clients",
        client("x1", "Alpha", true).with("city", "Laval"),
    )
    .unwrap();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();

    session.open_edit(&RecordId::new("x1")).unwrap();
    session.edit_field("city", "Gatineau").unwrap();
    let pending = session.begin_submit().unwrap();
    match &pending.command {
        roster::Command::Update { patch, .. } => {
            let fields: Vec<&str> = patch.fields().map(|(f, _)| f).collect();
            assert_eq!(fields, vec!["city"]);
        }
        other => panic!("expected an update, got {:?}", other),
    }
    let result = session.run_mutation(&pending);
    session.complete_mutation(pending, result).unwrap();
    assert_eq!(text(&db.get("clients", "x1").unwrap(), "city"), "Gatineau");
}

#[test]
fn form_text_is_coerced_before_sending() {
    let db = Roster::cache().unwrap();
    let mut session = db.session("clients").unwrap();
    let id = session.open_create().unwrap();
    session.edit_field("name", "Alpha").unwrap();
    session.edit_field("discount_amount", "12,5").unwrap();
    session.submit().unwrap();

    let stored = db.get("clients", id.as_str()).unwrap();
    assert_eq!(stored.get("discount_amount"), Some(&Value::Number(12.5)));
}

#[test]
fn validation_failure_keeps_dialog_open_and_sends_nothing() {
    let db = Roster::cache().unwrap();
    let mut users = db.session("users").unwrap();
    users.open_create().unwrap();
    users.edit_field("last_name", "Tremblay").unwrap();

    let err = users.submit().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert!(users.dialog().is_open());
    assert!(users.dialog().error().unwrap().contains("role"));
    assert!(users.notifications().is_empty());
    assert!(db.list("users", ActiveFilter::All).unwrap().is_empty());

    // fixing the field and resubmitting succeeds
    users.edit_field("role", "manager").unwrap();
    users.submit().unwrap();
    assert_eq!(users.snapshot().len(), 1);
}

#[test]
fn backend_rejection_is_shown_verbatim() {
    let db = Roster::cache().unwrap();
    let mut session = db.session("clients").unwrap();
    session.open_create().unwrap();
    session.edit_field("name", "Alpha").unwrap();
    session.edit_field("nickname", "Al").unwrap();

    let err = session.submit().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BackendRejection);
    let expected = r#"column "nickname" of relation "clients" does not exist"#;
    assert_eq!(err.to_string(), expected);
    assert_eq!(session.dialog().error(), Some(expected));

    let notes = session.take_notifications();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].is_error());
    assert_eq!(notes[0].message, expected);
}

#[test]
fn network_failure_during_submit_keeps_draft() {
    let inner = Database::cache().unwrap();
    let backend = Switchable::wrap(inner.clone());
    let db = Roster::with_backend(inner, backend.clone());
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();

    session.open_create().unwrap();
    session.edit_field("name", "Alpha").unwrap();
    backend.set_down(true);

    let err = session.submit().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    assert!(session.dialog().is_open());
    assert_eq!(text(session.dialog().draft().unwrap(), "name"), "Alpha");
    assert!(session.snapshot().is_empty());
    assert_eq!(
        session.take_notifications()[0].kind,
        Some(ErrorKind::NetworkFailure)
    );

    backend.set_down(false);
    session.submit().unwrap();
    assert_eq!(session.snapshot().len(), 1);
}

#[test]
fn dialog_is_locked_while_submitting() {
    let db = Roster::cache().unwrap();
    let mut session = db.session("clients").unwrap();
    session.open_create().unwrap();
    session.edit_field("name", "Alpha").unwrap();

    let pending = session.begin_submit().unwrap();
    assert!(session.dialog().is_submitting());
    assert!(session.submit().is_err());
    assert!(session.edit_field("name", "Other").is_err());
    assert!(session.cancel_dialog().is_err());

    let result = session.run_mutation(&pending);
    session.complete_mutation(pending, result).unwrap();
    assert!(!session.dialog().is_open());
}

#[test]
fn deleting_a_missing_row_reports_not_found() {
    let db = three_clients();
    let mut session = db.session("clients").unwrap();
    session.refresh().unwrap();

    let err = session.delete(&RecordId::new("zz")).unwrap_err();
    assert!(matches!(err, Error::RecordNotFound { .. }));
    assert_eq!(session.snapshot().len(), 3);
    assert!(session.take_notifications()[0].is_error());
}

#[test]
fn scoped_session_only_sees_its_parent() {
    let db = Roster::cache().unwrap();
    db.seed(7).unwrap();
    let clients = db.list("clients", ActiveFilter::All).unwrap();
    let parent = clients[0].id().to_string();

    let mut contracts = db
        .session("contracts")
        .unwrap()
        .scoped(FieldFilter::eq("client_id", parent.as_str()));
    contracts.refresh().unwrap();

    assert!(!contracts.snapshot().is_empty());
    assert!(contracts
        .snapshot()
        .iter()
        .all(|r| text(r, "client_id") == parent));
}
