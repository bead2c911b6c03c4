//! Form validation
//!
//! Form inputs arrive as text. Before a submission reaches the backend,
//! numeric, boolean and date fields are coerced to their schema kind and
//! required fields are checked. Any failure is a validation error: the
//! submission is blocked and nothing is sent.

use roster_core::{Patch, Record, Value};
use roster_engine::schema::parse_date;
use roster_engine::{EntitySchema, FieldKind};

use crate::{Error, Result};

/// Coerce one form value to a field kind
///
/// Blank text becomes null for non-text kinds. Unknown fields pass through
/// untouched; the backend decides about them.
pub fn coerce_value(schema: &EntitySchema, field: &str, value: &Value) -> Result<Value> {
    let Some(spec) = schema.field(field) else {
        return Ok(value.clone());
    };
    let text = match value {
        Value::String(s) => s.trim(),
        other => return check_kind(field, spec.kind, other.clone()),
    };

    match spec.kind {
        FieldKind::Text => Ok(value.clone()),
        _ if text.is_empty() => Ok(Value::Null),
        FieldKind::Number => text
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::Number)
            .ok_or_else(|| Error::validation(field, "must be a number")),
        FieldKind::Bool => match text.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" | "active" => Ok(Value::Bool(true)),
            "false" | "no" | "0" | "inactive" => Ok(Value::Bool(false)),
            _ => Err(Error::validation(field, "must be true or false")),
        },
        FieldKind::Date => match parse_date(text) {
            Some(date) => Ok(Value::from(date.format("%Y-%m-%d").to_string())),
            None => Err(Error::validation(field, "must be a date (YYYY-MM-DD)")),
        },
    }
}

fn check_kind(field: &str, kind: FieldKind, value: Value) -> Result<Value> {
    if kind.accepts(&value) {
        Ok(value)
    } else {
        Err(Error::validation(
            field,
            format!("expected {}, got {}", kind.sql_name(), value.type_name()),
        ))
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Validate and coerce a full record before insert
pub fn prepare_record(schema: &EntitySchema, draft: &Record) -> Result<Record> {
    let mut prepared = Record::new(draft.id().clone());
    for (field, value) in draft.fields() {
        prepared.set(field, coerce_value(schema, field, value)?);
    }
    for spec in schema.required_fields() {
        if is_blank(prepared.get(&spec.name)) {
            return Err(Error::validation(&spec.name, "is required"));
        }
    }
    Ok(prepared)
}

/// Validate and coerce a patch before update
pub fn prepare_patch(schema: &EntitySchema, patch: &Patch) -> Result<Patch> {
    let mut prepared = Patch::new();
    for (field, value) in patch.fields() {
        let value = coerce_value(schema, field, value)?;
        if schema.field(field).is_some_and(|f| f.required) && is_blank(Some(&value)) {
            return Err(Error::validation(field, "is required"));
        }
        prepared.insert(field, value);
    }
    Ok(prepared)
}
