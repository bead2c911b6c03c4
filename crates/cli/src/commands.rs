//! Command tree shared by one-shot invocations and the shell

use clap::{Arg, ArgAction, ArgMatches, Command};

fn collection_arg() -> Arg {
    Arg::new("collection")
        .required(true)
        .help("clients, contacts, contracts or users")
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Record identifier")
}

/// Subcommands available everywhere
pub fn data_commands() -> Vec<Command> {
    vec![
        Command::new("ping").about("Check the database answers"),
        Command::new("info").about("Show row counts and access mode"),
        Command::new("config").about("Show the configuration as TOML"),
        Command::new("page-size")
            .about("Change rows per page")
            .arg(
                Arg::new("size")
                    .required(true)
                    .value_parser(clap::value_parser!(usize)),
            ),
        Command::new("seed")
            .about("Fill every collection with synthetic rows")
            .arg(
                Arg::new("seed")
                    .default_value("42")
                    .value_parser(clap::value_parser!(u64)),
            ),
        Command::new("list")
            .about("List a collection in default order")
            .arg(collection_arg())
            .arg(
                Arg::new("status")
                    .long("status")
                    .short('s')
                    .default_value("all")
                    .help("all, active or inactive"),
            )
            .arg(
                Arg::new("where")
                    .long("where")
                    .short('w')
                    .action(ArgAction::Append)
                    .help("Equality filter FIELD=VALUE; may repeat"),
            ),
        Command::new("get")
            .about("Show one record")
            .arg(collection_arg())
            .arg(id_arg()),
        Command::new("insert")
            .about("Insert a record given as a JSON object")
            .arg(collection_arg())
            .arg(Arg::new("json").required(true)),
        Command::new("update")
            .about("Replace fields given as a JSON object")
            .arg(collection_arg())
            .arg(id_arg())
            .arg(Arg::new("json").required(true)),
        Command::new("delete")
            .about("Remove a record")
            .arg(collection_arg())
            .arg(id_arg()),
    ]
}

/// Subcommands that act on the open list view (shell only)
pub fn view_commands() -> Vec<Command> {
    vec![
        Command::new("view")
            .about("Open the list view of a collection")
            .arg(collection_arg()),
        Command::new("show").about("Print the current page"),
        Command::new("refresh").about("Refetch the current list"),
        Command::new("search")
            .about("Filter rows by text; no argument clears")
            .arg(Arg::new("query").num_args(0..).trailing_var_arg(true)),
        Command::new("status")
            .about("Refetch with a status filter")
            .arg(Arg::new("filter").required(true).help("all, active or inactive")),
        Command::new("sort")
            .about("Click a column header: ascending, descending, unsorted")
            .arg(Arg::new("column").required(true)),
        Command::new("next").about("Next page"),
        Command::new("prev").about("Previous page"),
        Command::new("page")
            .about("Jump to a page (1-based)")
            .arg(
                Arg::new("number")
                    .required(true)
                    .value_parser(clap::value_parser!(usize)),
            ),
        Command::new("columns")
            .about("List columns, or show/hide one")
            .arg(Arg::new("column")),
        Command::new("new").about("Open the dialog on a new record"),
        Command::new("edit")
            .about("Open the dialog on a row of the current list")
            .arg(id_arg()),
        Command::new("set")
            .about("Change a dialog field")
            .arg(Arg::new("field").required(true))
            .arg(Arg::new("value").num_args(0..).trailing_var_arg(true)),
        Command::new("submit").about("Send the dialog"),
        Command::new("cancel").about("Close the dialog"),
        Command::new("rm")
            .about("Delete a row of the current list and refetch")
            .arg(id_arg()),
        Command::new("quit").visible_alias("exit").about("Leave the shell"),
    ]
}

/// Parser for one shell line
pub fn shell_command() -> Command {
    Command::new("roster")
        .no_binary_name(true)
        .disable_version_flag(true)
        .subcommand_required(true)
        .subcommands(data_commands())
        .subcommands(view_commands())
}

/// Parser for the process arguments
pub fn cli_command() -> Command {
    Command::new("roster")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse and edit client, contact, contract and user lists")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("Load roster.toml from PATH"),
        )
        .arg(
            Arg::new("read-only")
                .long("read-only")
                .action(ArgAction::SetTrue)
                .help("Refuse every write"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(clap::value_parser!(u64))
                .help("Start with synthetic rows from RNG seed N"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print results as JSON"),
        )
        .subcommands(data_commands())
}

/// Collect repeated `--where FIELD=VALUE` pairs
pub fn where_pairs(matches: &ArgMatches) -> Vec<(String, String)> {
    matches
        .get_many::<String>("where")
        .map(|values| {
            values
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trees_are_consistent() {
        shell_command().debug_assert();
        cli_command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_filters() {
        let m = shell_command()
            .try_get_matches_from(["list", "contracts", "-s", "active", "-w", "client_id=c1"])
            .unwrap();
        let (name, sub) = m.subcommand().unwrap();
        assert_eq!(name, "list");
        assert_eq!(
            sub.get_one::<String>("status").map(String::as_str),
            Some("active")
        );
        assert_eq!(
            where_pairs(sub),
            vec![("client_id".to_string(), "c1".to_string())]
        );
    }

    #[test]
    fn test_exit_alias() {
        let m = shell_command().try_get_matches_from(["exit"]).unwrap();
        assert_eq!(m.subcommand_name(), Some("quit"));
    }
}
