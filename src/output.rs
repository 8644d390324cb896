use crate::issue::Issue;
use crate::kanban::Column;
use crate::repository::Repository;
use std::io::{self, Write};

/// Writes `message` to stdout and, when present, to `writer` as well.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        tracing::warn!(error = %e, "failed to write to stdout");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}

pub fn issue_line(issue: &Issue) -> String {
    let comments = match issue.comments {
        1 => "1 comment".to_string(),
        n => format!("{n} comments"),
    };
    format!(
        "  [{}] #{} {} ({}, opened {})",
        issue.id, issue.number, issue.title, comments, issue.created_at
    )
}

pub fn repository_line(repository: &Repository) -> String {
    match repository.description.as_deref() {
        Some(description) if !description.is_empty() => {
            format!("{} [{}] - {}", repository.full_name(), repository.id, description)
        }
        _ => format!("{} [{}]", repository.full_name(), repository.id),
    }
}

pub fn column_header(column: Column, count: usize) -> String {
    format!("{} ({}) - {}", column, column.page_label(), count)
}
