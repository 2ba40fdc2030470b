//! Key-value persistence: file-backed store with atomic writes, plus an
//! in-memory store for tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::PersistenceError;

/// Scoped key-value store that outlives the process (or pretends to)
pub trait KeyValueStore {
    /// Stored value for `key`, or `None` if nothing was written yet
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the whole value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the store root. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Read { key: key.to_string(), source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let to_error = |source| PersistenceError::Write { key: key.to_string(), source };

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(to_error)?;
        }

        // Write atomically (temp file + rename)
        let path = self.path_for(key);
        let temp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&temp, value).map_err(to_error)?;
        fs::rename(&temp, &path).map_err(to_error)?;
        Ok(())
    }
}

/// In-memory store that can be told to fail, for exercising fallback paths
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value (bypasses failure injection and write counting)
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Raw stored value, for assertions
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if self.fail_reads.get() {
            return Err(PersistenceError::Read {
                key: key.to_string(),
                source: io::Error::other("store unavailable"),
            });
        }
        Ok(self.value(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes.get() {
            return Err(PersistenceError::Write {
                key: key.to_string(),
                source: io::Error::other("store unavailable"),
            });
        }
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).write(key, value)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        assert_eq!(store.read("history").unwrap(), None);
    }

    #[test]
    fn test_file_store_write_then_read() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("nested"));
        store.write("bookmarks", "[1,2]").unwrap();
        assert_eq!(store.read("bookmarks").unwrap().as_deref(), Some("[1,2]"));
        assert!(store.path_for("bookmarks").exists());
        assert!(!temp.path().join("nested").join("bookmarks.json.tmp").exists());
    }

    #[test]
    fn test_file_store_overwrites_fully() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        store.write("history", "[1,2,3,4,5]").unwrap();
        store.write("history", "[]").unwrap();
        assert_eq!(store.read("history").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_write_failure_reported() {
        let temp = TempDir::new().unwrap();
        // A regular file where the store directory should be
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let store = FileStore::new(&blocker);
        assert!(matches!(store.write("history", "[]"), Err(PersistenceError::Write { .. })));
    }

    #[test]
    fn test_memory_store_failure_injection() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.write("k", "v").is_err());
        assert_eq!(store.writes(), 0);

        store.set_fail_writes(false);
        store.write("k", "v").unwrap();
        store.set_fail_reads(true);
        assert!(store.read("k").is_err());
        assert_eq!(store.value("k").as_deref(), Some("v"));
    }
}
