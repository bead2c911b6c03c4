//! Field values for records
//!
//! This module defines the scalar value type stored in every record field:
//! - Value: String, Number, Bool or Null
//! - Collation: locale-aware string ordering used by every sort
//! - compare_for_sort: the single comparator shared by the backend's
//!   default ordering and the list view's column sort
//!
//! # Ordering Rules
//!
//! | Kind | Ascending order |
//! |------|-----------------|
//! | Null / missing | always last (see [`NullOrder`]) |
//! | Bool | `true` before `false` |
//! | Number | numeric total order |
//! | String | collated: accents and case folded, raw text breaks ties |

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A single field value
///
/// Serializes untagged, so a record round-trips through plain JSON:
/// `null`, `true`, `12.5`, `"Montréal"`.
///
/// # Examples
///
/// ```
/// use roster_core::Value;
///
/// let s = Value::from("hello");
/// let n = Value::from(42i64);
/// let b = Value::from(true);
/// let null = Value::from(None::<String>);
///
/// assert_eq!(s.as_str(), Some("hello"));
/// assert_eq!(n.as_f64(), Some(42.0));
/// assert_eq!(b.as_bool(), Some(true));
/// assert!(null.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    /// Boolean flag
    Bool(bool),
    /// Numeric value (integers are stored losslessly up to 2^53)
    Number(f64),
    /// Free text
    String(String),
}

impl Value {
    /// Check for null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the string content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the number, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the flag, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Human-readable name of the variant
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
        }
    }

    /// Rank used to order values of different kinds against each other
    fn kind_rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            Value::String(_) => 2,
            Value::Null => 3,
        }
    }

    /// Ascending comparison of two values
    ///
    /// Null compares greater than everything else here; callers that need
    /// direction-independent null placement use [`compare_for_sort`].
    pub fn ascending_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            // true sorts before false
            (Value::Bool(a), Value::Bool(b)) => b.cmp(a),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => collate(a, b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort direction for a column or a backend ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Where null and missing values land in a sorted sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullOrder {
    /// Nulls last in both directions
    #[default]
    Last,
    /// Nulls last when ascending, first when descending
    FirstWhenDescending,
}

/// Compare two optional field values for sorting
///
/// Missing fields are treated as null.
pub fn compare_for_sort(
    a: Option<&Value>,
    b: Option<&Value>,
    direction: SortDirection,
    nulls: NullOrder,
) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    let null_side = match (nulls, direction) {
        (NullOrder::FirstWhenDescending, SortDirection::Descending) => Ordering::Less,
        _ => Ordering::Greater,
    };
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => null_side,
        (Some(_), None) => null_side.reverse(),
        (Some(a), Some(b)) => {
            let ord = a.ascending_cmp(b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

/// Build the collation key for a string
///
/// Decomposes to NFD, drops combining marks and lowercases, so that
/// `"Côté"`, `"cote"` and `"COTE"` share a primary key.
pub fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Locale-aware string comparison
///
/// Primary order is the collation key; equal keys fall back to the raw
/// text so the result is a total order.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(3i32).as_f64(), Some(3.0));
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert!(Value::from(None::<bool>).is_null());
        assert_eq!(Value::from(1.5).as_str(), None);
    }

    #[test]
    fn test_value_json_untagged() {
        let values = vec![
            Value::Null,
            Value::Bool(true),
            Value::Number(2.5),
            Value::String("Québec".into()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,true,2.5,"Québec"]"#);
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_integer_json_reads_as_number() {
        let v: Value = serde_json::from_str("100").unwrap();
        assert_eq!(v, Value::Number(100.0));
    }

    #[test]
    fn test_bool_true_before_false() {
        assert_eq!(
            Value::Bool(true).ascending_cmp(&Value::Bool(false)),
            Ordering::Less
        );
    }

    #[test]
    fn test_collate_folds_accents_and_case() {
        assert_eq!(collation_key("Côté"), "cote");
        assert_eq!(collate("élise", "Frank"), Ordering::Less);
        assert_eq!(collate("alpha", "Bravo"), Ordering::Less);
        // Byte order would put "Z" before "a"
        assert_eq!(collate("Zoe", "anne"), Ordering::Greater);
    }

    #[test]
    fn test_collate_is_total() {
        assert_ne!(collate("Cote", "cote"), Ordering::Equal);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_nulls_last_both_directions() {
        let n = Value::Null;
        let one = Value::from(1i64);
        for dir in [SortDirection::Ascending, SortDirection::Descending] {
            assert_eq!(
                compare_for_sort(Some(&n), Some(&one), dir, NullOrder::Last),
                Ordering::Greater
            );
            assert_eq!(
                compare_for_sort(None, Some(&one), dir, NullOrder::Last),
                Ordering::Greater
            );
        }
    }

    #[test]
    fn test_nulls_first_when_descending() {
        let n = Value::Null;
        let one = Value::from(1i64);
        assert_eq!(
            compare_for_sort(
                Some(&n),
                Some(&one),
                SortDirection::Descending,
                NullOrder::FirstWhenDescending
            ),
            Ordering::Less
        );
        assert_eq!(
            compare_for_sort(
                Some(&n),
                Some(&one),
                SortDirection::Ascending,
                NullOrder::FirstWhenDescending
            ),
            Ordering::Greater
        );
    }

    #[test]
    fn test_descending_reverses_non_null() {
        let a = Value::from("Alpha");
        let b = Value::from("Bravo");
        assert_eq!(
            compare_for_sort(Some(&a), Some(&b), SortDirection::Ascending, NullOrder::Last),
            Ordering::Less
        );
        assert_eq!(
            compare_for_sort(Some(&a), Some(&b), SortDirection::Descending, NullOrder::Last),
            Ordering::Greater
        );
    }

    #[test]
    fn test_null_order_toml_names() {
        let json = serde_json::to_string(&NullOrder::FirstWhenDescending).unwrap();
        assert_eq!(json, "\"first_when_descending\"");
    }
}
