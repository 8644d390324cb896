use crate::issue::Issue;
use crate::storage::{self, KeyValueStore, StoreError};

/// Key holding the JSON-encoded list of every tracked issue.
pub const SAVED_ISSUES_KEY: &str = "savedIssuesKey";

/// Sole owner of the persisted issue collection.
///
/// Every read and write of an issue's `state` goes through here. Each mutation
/// holds the store's lock on [`SAVED_ISSUES_KEY`] from load to write, so writers
/// in other processes cannot interleave with it.
#[derive(Debug, Clone)]
pub struct IssueStore<S> {
    store: S,
}

impl<S: KeyValueStore> IssueStore<S> {
    pub fn new(store: S) -> Self {
        IssueStore { store }
    }

    /// Every persisted issue in persisted order; empty if nothing was saved yet.
    pub fn load_all(&self) -> Result<Vec<Issue>, StoreError> {
        storage::read_list(&self.store, SAVED_ISSUES_KEY)
    }

    /// Overwrites the whole collection in one write.
    pub fn replace_all(&mut self, issues: &[Issue]) -> Result<(), StoreError> {
        let _lock = self.store.lock(SAVED_ISSUES_KEY)?;
        self.write(issues)
    }

    /// Replaces the issue with the same `id` in place, or appends it.
    ///
    /// On failure the previously persisted collection is left untouched.
    pub fn upsert(&mut self, issue: Issue) -> Result<(), StoreError> {
        self.update(|issues| {
            match issues.iter_mut().find(|existing| existing.id == issue.id) {
                Some(existing) => *existing = issue,
                None => issues.push(issue),
            }
            Ok::<_, StoreError>(())
        })
    }

    /// Loads the collection, applies `change` and writes the result back, all
    /// under one lock. Nothing is written when `change` fails.
    pub fn update<R, E>(
        &mut self,
        change: impl FnOnce(&mut Vec<Issue>) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let _lock = self.store.lock(SAVED_ISSUES_KEY).inspect_err(|err| {
            tracing::error!(error = %err, "failed to lock issues");
        })?;
        let mut issues = self.load_all()?;
        let result = change(&mut issues)?;
        self.write(&issues)?;
        Ok(result)
    }

    /// Issues whose `state` equals `state`, in persisted order.
    pub fn filter_by_state(&self, state: &str) -> Result<Vec<Issue>, StoreError> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|issue| issue.state == state)
            .collect())
    }

    fn write(&mut self, issues: &[Issue]) -> Result<(), StoreError> {
        storage::write_list(&mut self.store, SAVED_ISSUES_KEY, issues).inspect_err(|err| {
            tracing::error!(error = %err, count = issues.len(), "failed to persist issues");
        })
    }
}
