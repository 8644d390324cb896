use crate::kanban::{Column, Direction};
use crate::repository::split_full_name;

/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    Explore,
    Save { name: String },
    LocalList,
    LocalRemove { repo: String },
    Fetch { repo: String },
    Board { repo: Option<String> },
    Column { column: Column },
    Move { id: u64, direction: Direction },
    Help,
    Unknown(String),
}

pub const USAGE: &str = "\
Usage: gh-kanban <command>

Commands:
  explore                          List repositories of the configured user
  save <name>                      Save one of the user's repositories locally
  local                            List saved repositories
  local remove <owner>/<repo>      Forget a saved repository
  fetch <owner>/<repo>             Fetch issues onto the board
  board [<owner>/<repo>]           Show all columns, fetching first if the board is empty
  column <backlog|next|doing|done> Show one column
  move <issue-id> <forward|backward>
                                   Move an issue one column
  help                             Show this message";

const INVALID_REPO: &str = "Invalid repository format. Please use <owner>/<repo>.";

fn with_repo(repo: &str, command: impl FnOnce(String) -> Command) -> Command {
    match split_full_name(repo) {
        Some(_) => command(repo.to_string()),
        None => Command::Unknown(INVALID_REPO.to_string()),
    }
}

fn missing_repo(usage: &str) -> Command {
    Command::Unknown(format!(
        "Missing repository argument. Usage: gh-kanban {usage} <owner>/<repo>"
    ))
}

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    let words: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();
    match words.as_slice() {
        [] | ["help", ..] => Command::Help,
        ["explore"] => Command::Explore,
        ["save"] => Command::Unknown(
            "Missing repository name. Usage: gh-kanban save <name>".to_string(),
        ),
        ["save", name, ..] => Command::Save {
            name: name.to_string(),
        },
        ["local"] => Command::LocalList,
        ["local", "remove"] => missing_repo("local remove"),
        ["local", "remove", repo, ..] => with_repo(repo, |repo| Command::LocalRemove { repo }),
        ["local", sub_cmd, ..] => Command::Unknown(format!("local {sub_cmd}")),
        ["fetch"] => missing_repo("fetch"),
        ["fetch", repo, ..] => with_repo(repo, |repo| Command::Fetch { repo }),
        ["board"] => Command::Board { repo: None },
        ["board", repo, ..] => with_repo(repo, |repo| Command::Board { repo: Some(repo) }),
        ["column"] => Command::Unknown(
            "Missing column. Usage: gh-kanban column <backlog|next|doing|done>".to_string(),
        ),
        ["column", name, ..] => match Column::from_name(name) {
            Some(column) => Command::Column { column },
            None => Command::Unknown(format!(
                "Unknown column {name}. Use one of backlog, next, doing, done."
            )),
        },
        ["move", id, direction, ..] => {
            match (id.parse::<u64>(), Direction::from_name(direction)) {
                (Ok(id), Some(direction)) => Command::Move { id, direction },
                (Err(_), _) => Command::Unknown(format!("Invalid issue id {id}.")),
                (_, None) => Command::Unknown(format!(
                    "Unknown direction {direction}. Use forward or backward."
                )),
            }
        }
        ["move", ..] => Command::Unknown(
            "Missing arguments. Usage: gh-kanban move <issue-id> <forward|backward>".to_string(),
        ),
        [cmd, ..] => Command::Unknown(cmd.to_string()),
    }
}
