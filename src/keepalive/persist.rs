//! State Persistence Module
//!
//! Optional durable storage for per-screen state, keyed by the same identity
//! as the view cache. The cache works without it and never evicts from it.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{KeepAliveError, Result};

// == State Persistence ==
/// Storage backend for screen state.
pub trait StatePersistence: Send + Sync {
    /// Returns `Ok(None)` when nothing was saved for `key`.
    fn load(&self, key: &str) -> Result<Option<Value>>;

    fn save(&self, key: &str, state: &Value) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

// == Memory Persistence ==
/// Keeps state for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    states: Mutex<HashMap<String, Value>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Value>>> {
        self.states
            .lock()
            .map_err(|_| KeepAliveError::Internal("state persistence lock poisoned".to_string()))
    }
}

impl StatePersistence for MemoryPersistence {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save(&self, key: &str, state: &Value) -> Result<()> {
        self.lock()?.insert(key.to_string(), state.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// == JSON File Persistence ==
/// Stores every key in one pretty-printed JSON object on disk.
#[derive(Debug)]
pub struct JsonFilePersistence {
    path: PathBuf,
    /// Serializes whole-file reads and rewrites
    write_lock: Mutex<()>,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(persistence_error(&self.path, e)),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|e| persistence_error(&self.path, e))
    }

    fn write_all(&self, states: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| persistence_error(parent, e))?;
            }
        }
        let raw =
            serde_json::to_string_pretty(states).map_err(|e| persistence_error(&self.path, e))?;

        // Readers never see a truncated file: write aside, then rename over.
        let staging = self.staging_path();
        fs::write(&staging, raw).map_err(|e| persistence_error(&staging, e))?;
        fs::rename(&staging, &self.path).map_err(|e| persistence_error(&self.path, e))
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| KeepAliveError::Internal("state file lock poisoned".to_string()))
    }

    fn update(&self, apply: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
        let _guard = self.lock()?;
        let mut states = self.read_all()?;
        apply(&mut states);
        self.write_all(&states)
    }
}

impl StatePersistence for JsonFilePersistence {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let _guard = self.lock()?;
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, state: &Value) -> Result<()> {
        self.update(|states| {
            states.insert(key.to_string(), state.clone());
        })?;
        debug!(key, path = %self.path.display(), "Screen state saved");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|states| {
            states.remove(key);
        })
    }
}

fn persistence_error(path: &Path, error: impl std::fmt::Display) -> KeepAliveError {
    KeepAliveError::Persistence(format!("{}: {}", path.display(), error))
}
