//! Plain-text rendering

use roster_core::{Record, Value};
use roster_executor::{DatabaseInfo, Notification};
use roster_view::{DerivedPage, EditDialog, ViewState};

/// Render rows as an aligned table
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ");
    let mut out = vec![line(headers.to_vec()), rule];
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

/// Render a derived page with its position and state line
pub fn page(view: &DerivedPage, state: &ViewState, loading: bool) -> String {
    let mut out = String::new();
    if loading {
        out.push_str("Loading...\n");
    }
    if view.is_empty() {
        out.push_str("No records found.\n");
    } else {
        let mut headers = vec!["ID"];
        headers.extend(view.headers());
        let rows: Vec<Vec<String>> = view
            .ids()
            .into_iter()
            .zip(view.rows())
            .map(|(id, cells)| {
                let mut row = vec![short_id(id.as_str())];
                row.extend(cells);
                row
            })
            .collect();
        out.push_str(&table(&headers, &rows));
        out.push('\n');
    }

    let sort = match &state.sort {
        Some(s) => format!("{} {:?}", s.column, s.direction).to_lowercase(),
        None => "none".to_string(),
    };
    out.push_str(&format!(
        "page {}/{} | {} of {} rows | status {} | sort {}{}",
        view.page.index + 1,
        view.page.page_count.max(1),
        view.matched(),
        view.fetched,
        state.active,
        sort,
        if state.query.is_empty() {
            String::new()
        } else {
            format!(" | search \"{}\"", state.query)
        }
    ));
    out
}

/// Identifiers are UUIDs; eight characters are enough to tell rows apart
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Render one record as `field: value` lines
pub fn record(record: &Record) -> String {
    let mut out = format!("id: {}", record.id());
    for (field, value) in record.fields() {
        let shown = match value {
            Value::Null => "-".to_string(),
            other => other.to_string(),
        };
        out.push_str(&format!("\n{}: {}", field, shown));
    }
    out
}

/// Render a list of records with every field
pub fn records(rows: &[Record]) -> String {
    if rows.is_empty() {
        return "No records found.".to_string();
    }
    rows.iter().map(record).collect::<Vec<_>>().join("\n\n")
}

/// Render the dialog, if open
pub fn dialog(dialog: &EditDialog) -> Option<String> {
    let draft = dialog.draft()?;
    let state = if dialog.is_submitting() {
        "submitting"
    } else {
        "open"
    };
    let mode = match dialog.mode() {
        Some(roster_view::DialogMode::Edit { id }) => format!("edit {}", id),
        _ => "create".to_string(),
    };
    let mut out = format!("[dialog {}: {}]\n{}", state, mode, record(draft));
    if let Some(err) = dialog.error() {
        out.push_str(&format!("\n! {}", err));
    }
    Some(out)
}

/// Render database info
pub fn info(info: &DatabaseInfo) -> String {
    let rows: Vec<Vec<String>> = info
        .collections
        .iter()
        .map(|c| vec![c.name.clone(), c.count.to_string()])
        .collect();
    format!(
        "roster {} ({:?})\n{}",
        info.version,
        info.access_mode,
        table(&["COLLECTION", "ROWS"], &rows)
    )
}

/// Render a notification as a toast line
pub fn notification(n: &Notification) -> String {
    format!("[{}] {}", n.title, n.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_alignment() {
        let out = table(
            &["NAME", "CITY"],
            &[vec!["Alpha".into(), "Laval".into()], vec!["Bo".into(), "-".into()]],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "NAME   CITY");
        assert_eq!(lines[1], "-----  -----");
        assert_eq!(lines[2], "Alpha  Laval");
        assert_eq!(lines[3], "Bo     -");
    }

    #[test]
    fn test_record_shows_null_as_dash() {
        let r = Record::new("x1").with("reason", Value::Null);
        assert_eq!(record(&r), "id: x1\nreason: -");
    }
}
