//! Key-value snapshot persistence
//!
//! The three column collections are persisted under fixed keys in a plain
//! key-value store (the browser's local storage in the original product).
//! [`SnapshotStore`] abstracts the backend; [`MemoryStore`] backs tests and
//! ephemeral sessions, [`JsonFileStore`] keeps one JSON file per key under a
//! directory.

use crate::error::StoreResult;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Process-wide key-value store for serialized column snapshots
pub trait SnapshotStore {
    /// Read the value stored under `key`, if any
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// In-memory snapshot store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Snapshot store keeping one `{key}.json` file per key under a directory
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a file store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for JsonFileStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read("main-columns").unwrap(), None);
        store.write("main-columns", "[]").unwrap();
        assert_eq!(store.read("main-columns").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(store.read("custom-columns").unwrap(), None);
        store.write("custom-columns", "[{\"id\":\"x\"}]").unwrap();
        assert_eq!(
            store.read("custom-columns").unwrap().as_deref(),
            Some("[{\"id\":\"x\"}]")
        );
    }

    #[test]
    fn file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.write("k", "a").unwrap();
        store.write("k", "b").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("b"));
    }
}
