//! GitHub issues on a four-column Kanban board.
//!
//! Issues fetched from a repository are persisted in a flat key-value store and
//! moved between Backlog, Next, Doing and Done. The [`issue_store::IssueStore`]
//! owns the persisted collection; [`kanban`] derives columns from it and decides
//! which moves are legal.

pub mod cli {
    pub mod parser;
}
pub mod config;
pub mod github;
pub mod issue;
pub mod issue_store;
pub mod kanban;
pub mod logging;
pub mod output;
pub mod repository;
pub mod run;
pub mod saved_repos;
pub mod storage;
