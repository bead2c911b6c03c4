//! Command dispatch and the interactive loop

use anyhow::{anyhow, bail, Context};
use clap::ArgMatches;
use roster_core::{ActiveFilter, FieldFilter, Patch, Record, RecordId, Value};
use roster_executor::{ListSession, Roster};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::commands::{shell_command, where_pairs};
use crate::format;

/// What the loop does after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Database handle plus the open list view
pub struct Shell {
    db: Roster,
    session: Option<ListSession>,
    json: bool,
}

/// Interpret a literal typed on the command line
fn parse_scalar(s: &str) -> Value {
    match s {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => s
            .parse::<f64>()
            .map(Value::Number)
            .unwrap_or_else(|_| Value::from(s)),
    }
}

/// Log a failed history operation; returns whether it succeeded
fn history_ok<T>(op: &str, result: Result<T, ReadlineError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            debug!(target: "roster::cli", op, error = %e, "history unavailable");
            false
        }
    }
}

fn parse_status(s: &str) -> anyhow::Result<ActiveFilter> {
    s.parse::<ActiveFilter>().map_err(|e| anyhow!(e))
}

fn parse_object(text: &str) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    match serde_json::from_str(text).context("invalid JSON")? {
        serde_json::Value::Object(map) => Ok(map),
        _ => bail!("expected a JSON object"),
    }
}

impl Shell {
    pub fn new(db: Roster, json: bool) -> Self {
        Shell {
            db,
            session: None,
            json,
        }
    }

    fn session(&mut self) -> anyhow::Result<&mut ListSession> {
        self.session
            .as_mut()
            .ok_or_else(|| anyhow!("no list open; use `view <collection>` first"))
    }

    fn print_json<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print the page, the dialog and any queued notifications
    fn show(&mut self) -> anyhow::Result<()> {
        let json = self.json;
        let session = self.session()?;
        for note in session.take_notifications() {
            println!("{}", format::notification(&note));
        }
        let page = session.page();
        if json {
            println!("{}", serde_json::to_string_pretty(&page)?);
        } else {
            println!(
                "{}",
                format::page(&page, session.state(), session.is_loading())
            );
        }
        if let Some(dialog) = format::dialog(session.dialog()) {
            println!("{}", dialog);
        }
        Ok(())
    }

    /// Run a view-changing operation, then print the result
    ///
    /// Failures were already queued as notifications by the session, so
    /// they are printed with the page rather than returned.
    fn view_op<F>(&mut self, f: F) -> anyhow::Result<Flow>
    where
        F: FnOnce(&mut ListSession) -> roster_executor::Result<()>,
    {
        let session = self.session()?;
        if let Err(e) = f(session) {
            debug!(target: "roster::cli", error = %e, "view operation failed");
            if session.notifications().is_empty() {
                println!("! {}", e);
            }
        }
        self.show()?;
        Ok(Flow::Continue)
    }

    /// Execute one parsed command
    pub fn dispatch(&mut self, matches: &ArgMatches) -> anyhow::Result<Flow> {
        let Some((name, m)) = matches.subcommand() else {
            return Ok(Flow::Continue);
        };
        let arg = |key: &str| m.get_one::<String>(key).cloned().unwrap_or_default();

        match name {
            "ping" => println!("PONG {}", self.db.ping()?),
            "info" => {
                let info = self.db.info()?;
                if self.json {
                    self.print_json(&info)?;
                } else {
                    println!("{}", format::info(&info));
                }
            }
            "config" => {
                let cfg = self.db.config()?;
                println!("{}", cfg.to_toml_string()?);
            }
            "page-size" => {
                let size = m.get_one::<usize>("size").copied().unwrap_or(10);
                self.db.set_page_size(size)?;
                println!("OK");
            }
            "seed" => {
                let seed = m.get_one::<u64>("seed").copied().unwrap_or(42);
                let report = self.db.seed(seed)?;
                if self.json {
                    self.print_json(&report)?;
                } else {
                    println!(
                        "seeded {} clients, {} contacts, {} contracts, {} users",
                        report.clients, report.contacts, report.contracts, report.users
                    );
                }
            }
            "list" => {
                let status = parse_status(&arg("status"))?;
                let filters = where_pairs(m)
                    .into_iter()
                    .map(|(k, v)| FieldFilter::eq(k, parse_scalar(&v)))
                    .collect();
                let rows = self.db.list_where(&arg("collection"), status, filters)?;
                if self.json {
                    self.print_json(&rows)?;
                } else {
                    println!("{}", format::records(&rows));
                }
            }
            "get" => {
                let row = self.db.get(&arg("collection"), &arg("id"))?;
                if self.json {
                    self.print_json(&row)?;
                } else {
                    println!("{}", format::record(&row));
                }
            }
            "insert" => {
                let mut object = parse_object(&arg("json"))?;
                object
                    .entry("id")
                    .or_insert_with(|| RecordId::generate().to_string().into());
                let record: Record = serde_json::from_value(object.into())?;
                let row = self.db.insert(&arg("collection"), record)?;
                println!("OK {}", row.id());
            }
            "update" => {
                let patch: Patch = serde_json::from_value(parse_object(&arg("json"))?.into())?;
                let row = self.db.update(&arg("collection"), &arg("id"), patch)?;
                println!("{}", format::record(&row));
            }
            "delete" => {
                self.db.delete(&arg("collection"), &arg("id"))?;
                println!("OK");
            }

            "view" => {
                let mut session = self.db.session(&arg("collection"))?;
                if let Err(e) = session.refresh() {
                    debug!(target: "roster::cli", error = %e, "initial fetch failed");
                }
                self.session = Some(session);
                self.show()?;
            }
            "show" => self.show()?,
            "refresh" => return self.view_op(|s| s.refresh()),
            "search" => {
                let query = m
                    .get_many::<String>("query")
                    .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
                    .unwrap_or_default();
                return self.view_op(|s| {
                    s.set_query(query);
                    Ok(())
                });
            }
            "status" => {
                let filter = parse_status(&arg("filter"))?;
                return self.view_op(|s| s.set_active(filter));
            }
            "sort" => {
                let column = arg("column");
                return self.view_op(|s| s.toggle_sort(&column));
            }
            "next" => {
                return self.view_op(|s| {
                    s.next_page();
                    Ok(())
                })
            }
            "prev" => {
                return self.view_op(|s| {
                    s.prev_page();
                    Ok(())
                })
            }
            "page" => {
                let number = m.get_one::<usize>("number").copied().unwrap_or(1);
                return self.view_op(|s| {
                    s.go_to_page(number.saturating_sub(1));
                    Ok(())
                });
            }
            "columns" => {
                let session = self.session()?;
                match m.get_one::<String>("column") {
                    Some(column) => {
                        let visible = session.toggle_column(column)?;
                        println!("{} {}", column, if visible { "shown" } else { "hidden" });
                    }
                    None => {
                        for column in &session.config().columns {
                            let mark = if session.state().is_visible(&column.key) {
                                "x"
                            } else {
                                " "
                            };
                            println!("[{}] {} ({})", mark, column.key, column.label);
                        }
                    }
                }
            }
            "new" => {
                let id = self.session()?.open_create()?;
                println!("new record {}", id);
                self.show()?;
            }
            "edit" => {
                let id = RecordId::new(arg("id"));
                let session = self.session()?;
                // accept the short id shown in the table
                let full = session
                    .snapshot()
                    .iter()
                    .map(|r| r.id().clone())
                    .find(|rid| rid.as_str().starts_with(id.as_str()))
                    .unwrap_or(id);
                session.open_edit(&full)?;
                self.show()?;
            }
            "set" => {
                let field = arg("field");
                let value = m
                    .get_many::<String>("value")
                    .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
                    .map(|text| parse_scalar(&text))
                    .unwrap_or(Value::Null);
                self.session()?.edit_field(&field, value)?;
                self.show()?;
            }
            "submit" => return self.view_op(|s| s.submit()),
            "cancel" => return self.view_op(|s| s.cancel_dialog()),
            "rm" => {
                let prefix = arg("id");
                let session = self.session()?;
                let id = session
                    .snapshot()
                    .iter()
                    .map(|r| r.id().clone())
                    .find(|rid| rid.as_str().starts_with(&prefix))
                    .unwrap_or_else(|| RecordId::new(prefix));
                return self.view_op(move |s| s.delete(&id));
            }
            "quit" => return Ok(Flow::Quit),
            other => bail!("unknown command: {}", other),
        }
        Ok(Flow::Continue)
    }

    /// Parse and run one shell line
    pub fn run_line(&mut self, line: &str) -> anyhow::Result<Flow> {
        let Some(words) = shlex::split(line) else {
            bail!("unbalanced quotes");
        };
        if words.is_empty() {
            return Ok(Flow::Continue);
        }
        match shell_command().try_get_matches_from(words) {
            Ok(matches) => self.dispatch(&matches),
            Err(e) => {
                // help and usage errors print themselves
                let _ = e.print();
                Ok(Flow::Continue)
            }
        }
    }

    /// Read-eval-print loop with persistent history
    pub fn repl(&mut self, history: Option<std::path::PathBuf>) -> anyhow::Result<()> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = &history {
            history_ok("load", editor.load_history(path));
        }
        println!("roster shell. `help` lists commands, `quit` leaves.");

        loop {
            let prompt = match &self.session {
                Some(s) => format!("roster:{}> ", s.config().collection),
                None => "roster> ".to_string(),
            };
            match editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        history_ok("add", editor.add_history_entry(line.as_str()));
                    }
                    match self.run_line(&line) {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => println!("(error) {:#}", e),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(path) = &history {
            history_ok("save", editor.save_history(path));
        }
        Ok(())
    }
}
