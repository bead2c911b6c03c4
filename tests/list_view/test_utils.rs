//! Shared fixtures

use roster::{
    Backend, Collection, Database, ListQuery, Patch, Record, RecordId, Roster, RosterError,
    RosterResult, Value,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn client(id: &str, name: &str, active: bool) -> Record {
    Record::new(id).with("name", name).with("active", active)
}

/// Alpha (inactive), Bravo and Charlie (active), inserted out of order
pub fn three_clients() -> Roster {
    let db = Roster::cache().unwrap();
    db.insert("clients", client("b", "Bravo", true)).unwrap();
    db.insert("clients", client("a", "Alpha", false)).unwrap();
    db.insert("clients", client("c", "Charlie", true)).unwrap();
    db
}

/// Visible text of the first column on the current page
pub fn first_column(rows: Vec<Vec<String>>) -> Vec<String> {
    rows.into_iter()
        .map(|row| row.into_iter().next().unwrap_or_default())
        .collect()
}

pub fn ids(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

/// Backend whose transport can be cut
pub struct Switchable {
    pub db: Arc<Database>,
    down: AtomicBool,
}

impl Switchable {
    pub fn wrap(db: Arc<Database>) -> Arc<Self> {
        Arc::new(Switchable {
            db,
            down: AtomicBool::new(false),
        })
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> RosterResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(RosterError::unavailable("connection reset by peer"));
        }
        Ok(())
    }
}

impl Backend for Switchable {
    fn list(&self, c: &Collection, q: &ListQuery) -> RosterResult<Vec<Record>> {
        self.check()?;
        self.db.list(c, q)
    }

    fn get(&self, c: &Collection, id: &RecordId) -> RosterResult<Record> {
        self.check()?;
        self.db.get(c, id)
    }

    fn insert(&self, c: &Collection, r: Record) -> RosterResult<Record> {
        self.check()?;
        self.db.insert(c, r)
    }

    fn update(&self, c: &Collection, id: &RecordId, p: &Patch) -> RosterResult<Record> {
        self.check()?;
        self.db.update(c, id, p)
    }

    fn delete(&self, c: &Collection, id: &RecordId) -> RosterResult<()> {
        self.check()?;
        self.db.delete(c, id)
    }
}

pub fn text(record: &Record, field: &str) -> String {
    record.get(field).map(Value::to_string).unwrap_or_default()
}
