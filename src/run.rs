use anyhow::Context;

use crate::cli::parser::{self, Command};
use crate::config::Settings;
use crate::github::GitHubFetcher;
use crate::issue_store::IssueStore;
use crate::kanban::{Board, BoardError, Column};
use crate::output;
use crate::repository::split_full_name;
use crate::saved_repos::{RepositorySaved, SaveOutcome, SavedRepositories};
use crate::storage::FileStore;

/// Executes one command line.
///
/// Everything printed also goes to `stdout_additional` when given, so callers can
/// capture the output.
pub async fn run<F: GitHubFetcher>(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
    fetcher: &F,
    settings: &Settings,
) -> anyhow::Result<()> {
    let out = &mut stdout_additional;
    let file_store = FileStore::new(&settings.data_dir);

    match parser::parse_args(&args) {
        Command::Explore => {
            let repositories = fetcher.fetch_repositories(&settings.username).await;
            if repositories.is_empty() {
                output::println(
                    &format!("No repositories found for {}.", settings.username),
                    out,
                )?;
            }
            for repository in &repositories {
                output::println(&output::repository_line(repository), out)?;
            }
        }
        Command::Save { name } => {
            let mut saved = SavedRepositories::new(file_store);
            if let Some(existing) = saved
                .find(&settings.username, &name)
                .context("Failed to load saved repositories")?
            {
                output::println(&format!("{} is already saved.", existing.full_name()), out)?;
                return Ok(());
            }

            let repositories = fetcher.fetch_repositories(&settings.username).await;
            let Some(repository) = repositories.into_iter().find(|r| r.name == name) else {
                output::println(
                    &format!("Repository {name} not found for {}.", settings.username),
                    out,
                )?;
                return Ok(());
            };

            saved.subscribe(Box::new(|event: &RepositorySaved| {
                tracing::info!(id = event.repository.id, name = %event.repository.full_name(), "repository saved");
            }));
            let full_name = repository.full_name();
            match saved.save(repository).context("Failed to save repository")? {
                SaveOutcome::Saved(_) => {
                    output::println(&format!("{full_name} saved to local."), out)?
                }
                SaveOutcome::AlreadySaved => {
                    output::println(&format!("{full_name} is already saved."), out)?
                }
            }
        }
        Command::LocalList => {
            let saved = SavedRepositories::new(file_store)
                .load()
                .context("Failed to load saved repositories")?;
            if saved.is_empty() {
                output::println("No saved repositories.", out)?;
            }
            for repository in &saved {
                output::println(&output::repository_line(repository), out)?;
            }
        }
        Command::LocalRemove { repo } => {
            let Some((owner, name)) = split_full_name(&repo) else {
                return Err(anyhow::anyhow!("Invalid repository {repo}"));
            };
            let removed = SavedRepositories::new(file_store)
                .remove(owner, name)
                .context("Failed to remove repository")?;
            match removed {
                Some(_) => output::println(&format!("Removed {repo}."), out)?,
                None => output::println(&format!("{repo} is not saved."), out)?,
            }
        }
        Command::Fetch { repo } => {
            let mut board = Board::new(IssueStore::new(file_store));
            fetch_onto_board(&mut board, &repo, fetcher, out).await?;
        }
        Command::Board { repo } => {
            let mut board = Board::new(IssueStore::new(file_store));
            if let Some(repo) = repo {
                if board.is_empty().context("Failed to load issues")? {
                    fetch_onto_board(&mut board, &repo, fetcher, out).await?;
                }
            }
            let snapshot = board.snapshot().context("Failed to load issues")?;
            for (column, issues) in &snapshot {
                print_column(*column, issues, out)?;
            }
        }
        Command::Column { column } => {
            let board = Board::new(IssueStore::new(file_store));
            let issues = board.column(column).context("Failed to load issues")?;
            print_column(column, &issues, out)?;
        }
        Command::Move { id, direction } => {
            let mut board = Board::new(IssueStore::new(file_store));
            match board.move_issue(id, direction) {
                Ok(moved) => output::println(
                    &format!(
                        "#{} {}: {} -> {}",
                        moved.issue.number, moved.issue.title, moved.from, moved.to
                    ),
                    out,
                )?,
                Err(BoardError::Store(err)) => {
                    return Err(err).context("Failed to move issue");
                }
                Err(err) => output::println(&err.to_string(), out)?,
            }
        }
        Command::Help => output::println(parser::USAGE, out)?,
        Command::Unknown(message) => {
            output::println(&message, out)?;
            output::println("Invalid command or arguments. Use help for usage.", out)?;
        }
    }
    Ok(())
}

async fn fetch_onto_board<F: GitHubFetcher>(
    board: &mut Board<FileStore>,
    repo: &str,
    fetcher: &F,
    out: &mut Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    let Some((owner, name)) = split_full_name(repo) else {
        return Err(anyhow::anyhow!("Invalid repository {repo}"));
    };

    let issues = fetcher.fetch_issues(name, owner).await;
    if issues.is_empty() {
        output::println(
            &format!("No issues fetched from {repo}; board left unchanged."),
            out,
        )?;
        return Ok(());
    }

    let stored = board
        .adopt_fetched(issues)
        .context("Failed to store fetched issues")?;
    output::println(&format!("Fetched {stored} issues from {repo}."), out)?;
    Ok(())
}

fn print_column(
    column: Column,
    issues: &[crate::issue::Issue],
    out: &mut Option<&mut dyn std::io::Write>,
) -> std::io::Result<()> {
    output::println(&output::column_header(column, issues.len()), out)?;
    if issues.is_empty() {
        output::println("  (empty)", out)?;
    }
    for issue in issues {
        output::println(&output::issue_line(issue), out)?;
    }
    Ok(())
}
