//! `roster`: browse and edit client, contact, contract and user lists
//!
//! With a subcommand, runs it once and exits. Without one, starts an
//! interactive shell whose `view` command opens a paged list with search,
//! status filter, column sort and a create/edit dialog.
//!
//! ```text
//! roster --seed 42
//! roster> view clients
//! roster:clients> status active
//! roster:clients> sort name
//! roster:clients> next
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod commands;
mod format;
mod shell;

use std::path::PathBuf;
use std::process::ExitCode;

use roster_executor::Roster;
use roster_security::{AccessMode, OpenOptions};
use tracing_subscriber::EnvFilter;

use crate::shell::Shell;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn history_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".roster_history"))
}

fn run() -> anyhow::Result<()> {
    let matches = commands::cli_command().get_matches();

    let mut options = OpenOptions::new();
    if let Some(path) = matches.get_one::<String>("config") {
        options = options.config_path(path);
    }
    if matches.get_flag("read-only") {
        options = options.access_mode(AccessMode::ReadOnly);
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        options = options.seed(*seed);
    }

    let db = Roster::open(&options)?;
    let mut shell = Shell::new(db, matches.get_flag("json"));

    if matches.subcommand().is_some() {
        shell.dispatch(&matches)?;
        return Ok(());
    }
    shell.repl(history_path())
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
