//! Free-text filter
//!
//! A record matches when at least one searchable string field contains the
//! query as a case-insensitive substring. The identifier and the status
//! field are never searched. A blank query matches everything; any other
//! query is matched as typed, surrounding spaces included.

use crate::config::{ListConfig, SearchScope};
use roster_core::{Record, Value};

/// Check one record against an already-lowercased, non-blank query
pub fn matches_query(record: &Record, needle: &str, config: &ListConfig) -> bool {
    let status = config.status_field.as_deref();
    let hit = |field: &str, value: &Value| {
        Some(field) != status
            && value
                .as_str()
                .map_or(false, |s| s.to_lowercase().contains(needle))
    };
    match &config.search {
        SearchScope::AllText => record.fields().any(|(field, value)| hit(field, value)),
        SearchScope::Fields(fields) => fields
            .iter()
            .any(|field| record.get(field).map_or(false, |value| hit(field, value))),
    }
}

/// Keep the records matching `query`, preserving order
pub fn filter_records<'a>(
    records: &'a [Record],
    query: &str,
    config: &ListConfig,
) -> Vec<&'a Record> {
    if query.trim().is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_query(r, &needle, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Record> {
        vec![
            Record::new("c1")
                .with("name", "Jean Tremblay")
                .with("city", "Montréal")
                .with("active", true),
            Record::new("c2")
                .with("name", "Marie Lavoie")
                .with("city", "Québec")
                .with("discount_amount", 50i64),
            Record::new("c3").with("name", "Luc Roy").with("city", "Laval"),
        ]
    }

    fn ids(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let rows = rows();
        let config = ListConfig::new("clients");
        assert_eq!(ids(&filter_records(&rows, "", &config)), vec!["c1", "c2", "c3"]);
        assert_eq!(filter_records(&rows, "   ", &config).len(), 3);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let rows = rows();
        let config = ListConfig::new("clients");
        assert_eq!(ids(&filter_records(&rows, "LAV", &config)), vec!["c2", "c3"]);
        assert_eq!(ids(&filter_records(&rows, "montréal", &config)), vec!["c1"]);
    }

    #[test]
    fn test_surrounding_spaces_are_part_of_the_query() {
        let rows = vec![
            Record::new("1").with("name", "Jeanne"),
            Record::new("2").with("name", "Jean Tremblay"),
        ];
        let config = ListConfig::new("clients");
        assert_eq!(ids(&filter_records(&rows, "jean ", &config)), vec!["2"]);
        assert_eq!(ids(&filter_records(&rows, "jean", &config)), vec!["1", "2"]);
    }

    #[test]
    fn test_identifier_and_non_strings_not_searched() {
        let rows = rows();
        let config = ListConfig::new("clients");
        assert!(filter_records(&rows, "c2", &config).is_empty());
        assert!(filter_records(&rows, "50", &config).is_empty());
    }

    #[test]
    fn test_status_field_not_searched() {
        let rows = vec![Record::new("u1").with("status", "archived")];
        let config = ListConfig::new("users").status_field(Some("status"));
        assert!(filter_records(&rows, "archived", &config).is_empty());
        let config = ListConfig::new("users").status_field(None);
        assert_eq!(filter_records(&rows, "archived", &config).len(), 1);
    }

    #[test]
    fn test_restricted_search_fields() {
        let rows = rows();
        let config = ListConfig::new("clients").search_fields(&["city"]);
        assert!(filter_records(&rows, "tremblay", &config).is_empty());
        assert_eq!(ids(&filter_records(&rows, "laval", &config)), vec!["c3"]);
    }
}
