// persistence.rs: KeyValueStore trait and its backends.
//
// The goal store only needs two operations from durable storage: read the
// blob under a key and overwrite it. Keeping that behind a trait lets the
// store run against a file on disk in the app and against a plain map in
// tests, without changing any store code.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::GoalError;

/// Durable string storage addressed by key.
///
/// `#[async_trait]` lets the trait be used as `Arc<dyn KeyValueStore>` even
/// though its methods are async.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if nothing was ever stored.
    async fn get(&self, key: &str) -> Result<Option<String>, GoalError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), GoalError>;
}

/// Keeps values in memory only. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. a blob written by an earlier session.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), value.into());
        store
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, GoalError> {
        let values = self
            .values
            .lock()
            .map_err(|_| GoalError::PersistenceRead("memory store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), GoalError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| GoalError::PersistenceWrite("memory store lock poisoned".into()))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Stores each key as a JSON file: `<dir>/<key>.json`.
///
/// Writes go to `<key>.json.tmp` first and are then renamed over the real
/// file, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Open a store in `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, GoalError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|source| GoalError::IoError {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Keys become file names, so they may not name other directories.
    fn check_key(key: &str) -> Result<(), String> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(format!("invalid storage key '{}'", key));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, GoalError> {
        Self::check_key(key).map_err(GoalError::PersistenceRead)?;
        let path = self.key_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GoalError::IoError {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), GoalError> {
        Self::check_key(key).map_err(GoalError::PersistenceWrite)?;
        let path = self.key_path(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|source| GoalError::IoError {
                path: tmp.display().to_string(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| GoalError::IoError {
                path: path.display().to_string(),
                source,
            })?;
        Ok(())
    }
}
