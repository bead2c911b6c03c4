//! Entity schemas
//!
//! Each collection the database serves has an [`EntitySchema`]: its field
//! names and kinds, which fields are NOT NULL, the default list ordering and
//! the name of its status flag. The database enforces schemas on every
//! write the way a relational backend enforces column constraints.
//!
//! ## Built-in collections
//!
//! | Collection | Required | Default order |
//! |------------|----------|---------------|
//! | `clients` | `name` | `name` ascending |
//! | `contacts` | `client_id` | `last_name` ascending |
//! | `contracts` | `client_id` | `start_date` descending |
//! | `users` | `role` | `last_name` ascending |

use chrono::{DateTime, NaiveDate};
use roster_core::{Collection, OrderBy, Patch, Record, RosterError, RosterResult, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text
    Text,
    /// Numeric
    Number,
    /// Boolean flag
    Bool,
    /// Calendar date, `YYYY-MM-DD` or RFC 3339
    Date,
}

impl FieldKind {
    /// Check a non-null value against this kind
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (FieldKind::Text, Value::String(_)) => true,
            (FieldKind::Number, Value::Number(n)) => n.is_finite(),
            (FieldKind::Bool, Value::Bool(_)) => true,
            (FieldKind::Date, Value::String(s)) => parse_date(s).is_some(),
            _ => false,
        }
    }

    /// Postgres-style type name used in rejection messages
    pub fn sql_name(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "numeric",
            FieldKind::Bool => "boolean",
            FieldKind::Date => "date",
        }
    }
}

/// Parse a date field value
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// One column of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Column name
    pub name: String,
    /// Storage kind
    pub kind: FieldKind,
    /// NOT NULL constraint
    pub required: bool,
}

impl FieldSpec {
    /// Nullable column
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldSpec {
            name: name.into(),
            kind,
            required: false,
        }
    }

    /// NOT NULL column
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldSpec {
            name: name.into(),
            kind,
            required: true,
        }
    }
}

/// Schema of one collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Collection served
    pub collection: Collection,
    /// Columns other than `id`
    pub fields: Vec<FieldSpec>,
    /// Ordering applied when a list request names none
    pub default_order: OrderBy,
    /// Boolean status column, if the entity has one
    pub status_field: Option<String>,
}

impl EntitySchema {
    /// Create a schema with an `active` status flag
    pub fn new(collection: impl Into<Collection>, default_order: OrderBy) -> Self {
        EntitySchema {
            collection: collection.into(),
            fields: vec![FieldSpec::optional("active", FieldKind::Bool)],
            default_order,
            status_field: Some("active".to_string()),
        }
    }

    /// Add a nullable column (builder pattern)
    pub fn optional(mut self, name: &str, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec::optional(name, kind));
        self
    }

    /// Add a NOT NULL column (builder pattern)
    pub fn required(mut self, name: &str, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec::required(name, kind));
        self
    }

    /// Look up a column
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// NOT NULL columns
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Check a full row before insert
    pub fn check_record(&self, record: &Record) -> RosterResult<()> {
        for (name, value) in record.fields() {
            self.check_value(name, value)?;
        }
        for spec in self.required_fields() {
            if record.get(&spec.name).map_or(true, Value::is_null) {
                return Err(self.not_null_violation(&spec.name));
            }
        }
        Ok(())
    }

    /// Check a partial update
    ///
    /// Fields the patch does not name are not checked.
    pub fn check_patch(&self, patch: &Patch) -> RosterResult<()> {
        for (name, value) in patch.fields() {
            self.check_value(name, value)?;
            if value.is_null() && self.field(name).is_some_and(|f| f.required) {
                return Err(self.not_null_violation(name));
            }
        }
        Ok(())
    }

    fn check_value(&self, name: &str, value: &Value) -> RosterResult<()> {
        let spec = self.field(name).ok_or_else(|| {
            RosterError::rejected(format!(
                "column \"{}\" of relation \"{}\" does not exist",
                name, self.collection
            ))
        })?;
        if !spec.kind.accepts(value) {
            return Err(RosterError::rejected(format!(
                "invalid input syntax for type {}: \"{}\" (column \"{}\")",
                spec.kind.sql_name(),
                value,
                name
            )));
        }
        Ok(())
    }

    fn not_null_violation(&self, name: &str) -> RosterError {
        RosterError::rejected(format!(
            "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
            name, self.collection
        ))
    }
}

/// Schema of the `clients` collection
pub fn clients() -> EntitySchema {
    use FieldKind::*;
    EntitySchema::new(Collection::CLIENTS, OrderBy::asc("name"))
        .required("name", Text)
        .optional("company_name", Text)
        .optional("alias", Text)
        .optional("address", Text)
        .optional("apartment", Text)
        .optional("city", Text)
        .optional("province", Text)
        .optional("postal_code", Text)
        .optional("country", Text)
        .optional("payment_terms", Text)
        .optional("discount_amount", Number)
        .optional("electronic_payment_discount_percent", Number)
        .optional("reason", Text)
}

/// Schema of the `contacts` collection
pub fn contacts() -> EntitySchema {
    use FieldKind::*;
    EntitySchema::new(Collection::CONTACTS, OrderBy::asc("last_name"))
        .required("client_id", Text)
        .optional("salutation", Text)
        .optional("first_name", Text)
        .optional("last_name", Text)
        .optional("title", Text)
        .optional("position", Text)
        .optional("department", Text)
        .optional("email", Text)
        .optional("office_phone", Text)
        .optional("mobile_phone", Text)
        .optional("language", Text)
        .optional("birth_date", Date)
}

/// Schema of the `contracts` collection
pub fn contracts() -> EntitySchema {
    use FieldKind::*;
    EntitySchema::new(Collection::CONTRACTS, OrderBy::desc("start_date"))
        .required("client_id", Text)
        .optional("contact_id", Text)
        .optional("user_id", Text)
        .optional("parent_contract_id", Text)
        .optional("alias", Text)
        .optional("address", Text)
        .optional("apartment", Text)
        .optional("city", Text)
        .optional("province", Text)
        .optional("postal_code", Text)
        .optional("country", Text)
        .optional("start_date", Date)
        .optional("end_date", Date)
        .optional("price", Number)
        .optional("price_unit", Text)
        .optional("billing_unit", Text)
        .optional("cost", Number)
        .optional("status", Text)
        .optional("language", Text)
        .optional("entry_method", Text)
        .optional("notes", Text)
}

/// Schema of the `users` collection
pub fn users() -> EntitySchema {
    use FieldKind::*;
    EntitySchema::new(Collection::USERS, OrderBy::asc("last_name"))
        .required("role", Text)
        .optional("salutation", Text)
        .optional("first_name", Text)
        .optional("last_name", Text)
        .optional("alias", Text)
        .optional("position", Text)
        .optional("group_name", Text)
        .optional("supervisor_id", Text)
        .optional("company_name", Text)
        .optional("address", Text)
        .optional("apartment", Text)
        .optional("city", Text)
        .optional("province", Text)
        .optional("postal_code", Text)
        .optional("country", Text)
        .optional("office_phone", Text)
        .optional("mobile_phone", Text)
        .optional("language", Text)
        .optional("birth_date", Date)
        .optional("transportation", Text)
        .optional("years_of_experience", Number)
        .optional("coverage_radius_km", Number)
        .optional("locationless", Bool)
        .optional("notes", Text)
}

/// Schemas by collection name
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<Collection, EntitySchema>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four built-in collections
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for schema in [clients(), contacts(), contracts(), users()] {
            registry.register(schema);
        }
        registry
    }

    /// Add or replace a schema
    pub fn register(&mut self, schema: EntitySchema) {
        self.schemas.insert(schema.collection.clone(), schema);
    }

    /// Look up a schema
    pub fn get(&self, collection: &Collection) -> Option<&EntitySchema> {
        self.schemas.get(collection)
    }

    /// Registered collection names in order
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.schemas.keys()
    }
}
