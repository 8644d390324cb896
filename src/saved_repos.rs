use crate::repository::Repository;
use crate::storage::{self, KeyValueStore, StoreError};

/// Key holding the JSON-encoded list of saved repositories.
pub const SAVED_REPOS_KEY: &str = "savedReposKey";

/// Emitted after a repository is appended to the saved list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySaved {
    pub repository: Repository,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(RepositorySaved),
    /// A repository with the same `id` was already saved; nothing was written.
    AlreadySaved,
}

/// Receives save events from [`SavedRepositories`].
pub trait RepositoryObserver {
    fn repository_saved(&self, event: &RepositorySaved);
}

impl<F> RepositoryObserver for F
where
    F: Fn(&RepositorySaved),
{
    fn repository_saved(&self, event: &RepositorySaved) {
        self(event)
    }
}

/// The locally persisted list of repositories chosen for Kanban tracking.
pub struct SavedRepositories<S> {
    store: S,
    observers: Vec<Box<dyn RepositoryObserver>>,
}

impl<S: KeyValueStore> SavedRepositories<S> {
    pub fn new(store: S) -> Self {
        SavedRepositories {
            store,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn RepositoryObserver>) {
        self.observers.push(observer);
    }

    pub fn load(&self) -> Result<Vec<Repository>, StoreError> {
        storage::read_list(&self.store, SAVED_REPOS_KEY)
    }

    /// Appends `repository` unless one with the same `id` is already saved.
    pub fn save(&mut self, repository: Repository) -> Result<SaveOutcome, StoreError> {
        let lock = self.store.lock(SAVED_REPOS_KEY)?;
        let mut saved = self.load()?;
        if saved.iter().any(|existing| existing.id == repository.id) {
            tracing::debug!(id = repository.id, "repository already saved");
            return Ok(SaveOutcome::AlreadySaved);
        }

        saved.push(repository.clone());
        storage::write_list(&mut self.store, SAVED_REPOS_KEY, &saved).inspect_err(|err| {
            tracing::error!(error = %err, id = repository.id, "failed to persist saved repositories");
        })?;
        drop(lock);

        let event = RepositorySaved { repository };
        for observer in &self.observers {
            observer.repository_saved(&event);
        }
        Ok(SaveOutcome::Saved(event))
    }

    /// The saved repository `<owner>/<name>`, if any.
    pub fn find(&self, owner: &str, name: &str) -> Result<Option<Repository>, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|repository| repository.matches(owner, name)))
    }

    /// Removes the saved repository `<owner>/<name>` and returns it, if present.
    pub fn remove(&mut self, owner: &str, name: &str) -> Result<Option<Repository>, StoreError> {
        let _lock = self.store.lock(SAVED_REPOS_KEY)?;
        let mut saved = self.load()?;
        let Some(index) = saved.iter().position(|r| r.matches(owner, name)) else {
            return Ok(None);
        };

        let removed = saved.remove(index);
        storage::write_list(&mut self.store, SAVED_REPOS_KEY, &saved)?;
        Ok(Some(removed))
    }
}
