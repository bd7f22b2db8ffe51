//! Flag stores and save data
//!
//! Flags are plain strings keyed by strings, serialized as one JSON object.

use crate::error::StoreError;
use crate::host::FlagStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub mod progress;

pub use progress::{
    InMemoryProgressRepository, JsonProgressRepository, Progress, ProgressRepository,
    RepositoryError,
};

/// Flag snapshot as stored on disk
pub type FlagMap = BTreeMap<String, String>;

/// Save a flag snapshot to bytes using JSON serialization
pub fn save_flags(flags: &FlagMap) -> anyhow::Result<Vec<u8>> {
    let json = serde_json::to_string_pretty(flags)?;
    Ok(json.into_bytes())
}

/// Load a flag snapshot from bytes
pub fn load_flags(bytes: &[u8]) -> anyhow::Result<FlagMap> {
    let json = String::from_utf8(bytes.to_vec())?;
    let flags = serde_json::from_str(&json)?;
    Ok(flags)
}

/// Flags held in memory only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryFlagStore {
    flags: FlagMap,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags<I, K, V>(flags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            flags: flags
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn snapshot(&self) -> &FlagMap {
        &self.flags
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.flags.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.flags.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.flags.remove(key);
    }
}

/// Flags backed by a JSON file, durable across sessions
///
/// Writes are buffered in memory until [`FlagStore::flush`].
#[derive(Debug)]
pub struct JsonFlagStore {
    path: PathBuf,
    flags: FlagMap,
    dirty: bool,
}

impl JsonFlagStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let flags = if path.exists() {
            let bytes = std::fs::read(&path).map_err(|e| StoreError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            load_flags(&bytes).map_err(|e| StoreError::Corrupt {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            FlagMap::new()
        };

        Ok(Self {
            path,
            flags,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn snapshot(&self) -> &FlagMap {
        &self.flags
    }
}

impl FlagStore for JsonFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.flags.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.flags.insert(key.to_string(), value.to_string());
        self.dirty = true;
    }

    fn remove(&mut self, key: &str) {
        if self.flags.remove(key).is_some() {
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }

        let io_error = |message: String| StoreError::Io {
            path: self.path.display().to_string(),
            message,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| io_error(e.to_string()))?;
        }
        let bytes = save_flags(&self.flags).map_err(|e| io_error(e.to_string()))?;
        std::fs::write(&self.path, bytes).map_err(|e| io_error(e.to_string()))?;

        self.dirty = false;
        Ok(())
    }
}
