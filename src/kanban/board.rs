use std::collections::HashMap;

use super::column::{Column, Direction};
use super::transition::{TransitionError, transition};
use crate::issue::Issue;
use crate::issue_store::IssueStore;
use crate::storage::{KeyValueStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Issue {0} not found")]
    NotFound(u64),
    #[error("Issue {id} has state `{state}` and is not on the board")]
    NotOnBoard { id: u64, state: String },
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moved {
    pub issue: Issue,
    pub from: Column,
    pub to: Column,
}

/// The Kanban board over an [`IssueStore`].
///
/// Columns are never cached: each one is a filtered view of the persisted
/// collection, recomputed on every read.
#[derive(Debug)]
pub struct Board<S> {
    store: IssueStore<S>,
}

impl<S: KeyValueStore> Board<S> {
    pub fn new(store: IssueStore<S>) -> Self {
        Board { store }
    }

    pub fn store(&self) -> &IssueStore<S> {
        &self.store
    }

    pub fn column(&self, column: Column) -> Result<Vec<Issue>, StoreError> {
        self.store.filter_by_state(column.state_value())
    }

    /// All four columns in board order, read from a single load.
    pub fn snapshot(&self) -> Result<Vec<(Column, Vec<Issue>)>, StoreError> {
        let issues = self.store.load_all()?;
        Ok(Column::ALL
            .into_iter()
            .map(|column| {
                let members = issues
                    .iter()
                    .filter(|issue| issue.state == column.state_value())
                    .cloned()
                    .collect();
                (column, members)
            })
            .collect())
    }

    /// True when no issue has been persisted yet.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.store.load_all()?.is_empty())
    }

    /// Moves issue `id` one column in `direction` and persists its new state.
    pub fn move_issue(&mut self, id: u64, direction: Direction) -> Result<Moved, BoardError> {
        let moved = self.store.update(|issues| {
            let issue = issues
                .iter_mut()
                .find(|issue| issue.id == id)
                .ok_or(BoardError::NotFound(id))?;
            let from = Column::from_state(&issue.state).ok_or_else(|| BoardError::NotOnBoard {
                id,
                state: issue.state.clone(),
            })?;

            let step = transition(from, direction)?;
            *issue = issue.with_state(step.new_state);
            Ok::<_, BoardError>(Moved {
                issue: issue.clone(),
                from,
                to: step.destination,
            })
        })?;

        tracing::info!(id, from = %moved.from, to = %moved.to, "moved issue");
        Ok(moved)
    }

    /// Replaces the collection with a fresh fetch.
    ///
    /// Issues already on the board keep their local `state`; new issues arrive
    /// with the state reported by the tracker. Returns the number of issues stored.
    pub fn adopt_fetched(&mut self, fetched: Vec<Issue>) -> Result<usize, StoreError> {
        self.store.update(|issues| {
            let local: HashMap<u64, String> = issues
                .drain(..)
                .map(|issue| (issue.id, issue.state))
                .collect();

            issues.extend(fetched.into_iter().map(|issue| match local.get(&issue.id) {
                Some(state) => issue.with_state(state),
                None => issue,
            }));
            Ok(issues.len())
        })
    }
}
