use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Errors raised while reading or writing persisted values.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to lock `{key}`: {source}")]
    Lock {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to decode `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Abstract flat key-value persistence interface
pub trait KeyValueStore {
    /// Return the value stored under `key`. If none is stored, returns Ok(None)
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Persist `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Delete the value stored under `key`
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
    /// Blocks until no other writer holds `key`; the lock lasts as long as the guard.
    ///
    /// Stores that are not shared between processes need no lock.
    fn lock(&self, _key: &str) -> Result<StoreLock, StoreError> {
        Ok(StoreLock { file: None })
    }
}

/// Exclusive write lock on one key, released on drop.
#[derive(Debug)]
pub struct StoreLock {
    file: Option<fs::File>,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            let _ = FileExt::unlock(file);
        }
    }
}

/// File-based persistence: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StoreError::Read {
                key: key.to_string(),
                source,
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Each writer stages into its own file; the rename replaces the list whole.
        let mut staging = tempfile::NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        staging.write_all(value.as_bytes()).map_err(write_err)?;
        staging
            .persist(self.path_for(key))
            .map(|_| ())
            .map_err(|err| write_err(err.error))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|source| StoreError::Write {
                key: key.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    fn lock(&self, key: &str) -> Result<StoreLock, StoreError> {
        let lock_err = |source| StoreError::Lock {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(lock_err)?;

        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.dir.join(format!("{key}.lock")))
            .map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;
        Ok(StoreLock { file: Some(file) })
    }
}

/// In-process persistence, used by tests and by callers that do not need durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Decodes the JSON list stored under `key`.
///
/// A missing key or a blank value is an empty list, not an error.
pub fn read_list<T, S>(store: &S, key: &str) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(content) if !content.trim().is_empty() => {
            serde_json::from_str(&content).map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
        }
        _ => Ok(Vec::new()),
    }
}

/// Encodes `items` as a JSON list and stores it under `key` in a single write.
pub fn write_list<T, S>(store: &mut S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let content = serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &content)
}
