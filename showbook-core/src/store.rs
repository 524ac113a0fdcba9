//! Key-value store holding the JSON-serialized collections.
//!
//! Each collection lives under its own key and is always read and written
//! wholesale. Reads never fail: a missing or unparsable entry yields the
//! caller's fallback value.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ShowbookResult;

pub const USER_KEY: &str = "user";
pub const EVENTS_KEY: &str = "events";
pub const BOOKINGS_KEY: &str = "bookings";
pub const COMMENTS_KEY: &str = "comments";

const LOCK_FILE: &str = ".lock";

/// Exclusive access to a store, released when dropped.
pub struct StoreLock {
    _file: Option<File>,
}

impl StoreLock {
    /// A lock for stores that are never shared between processes.
    pub fn none() -> Self {
        StoreLock { _file: None }
    }
}

/// Raw get/set-by-key access plus typed JSON helpers.
pub trait Store {
    fn read(&self, key: &str) -> ShowbookResult<Option<String>>;

    fn write(&self, key: &str, value: &str) -> ShowbookResult<()>;

    /// Block until this process has exclusive access for a read-modify-write.
    fn lock(&self) -> ShowbookResult<StoreLock>;

    /// Decode the entry under `key`, or return `fallback` when it is absent,
    /// unreadable or not valid JSON for `T`.
    fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let raw = match self.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return fallback,
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read store entry, using fallback");
                return fallback;
            }
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt store entry, using fallback");
                fallback
            }
        }
    }

    /// Decode a JSON array under `key` record by record, skipping records
    /// that are not valid `T` instead of dropping the whole collection.
    fn get_each<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.get::<Vec<serde_json::Value>>(key, Vec::new())
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key, index, error = %e, "skipping unreadable record");
                    None
                }
            })
            .collect()
    }

    /// Whether `key` holds a non-empty JSON array, whatever its records look like.
    fn has_records(&self, key: &str) -> bool {
        !self
            .get::<Vec<serde_json::Value>>(key, Vec::new())
            .is_empty()
    }

    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> ShowbookResult<()> {
        let raw = serde_json::to_string_pretty(value)?;
        self.write(key, &raw)
    }
}

/// Store backed by one `<key>.json` file per entry in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Store for FileStore {
    fn read(&self, key: &str) -> ShowbookResult<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> ShowbookResult<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path(key);
        let temp = self.dir.join(format!("{}.json.tmp", key));

        fs::write(&temp, value)?;
        fs::rename(&temp, &path)?;
        tracing::debug!(path = %path.display(), "wrote store entry");
        Ok(())
    }

    fn lock(&self) -> ShowbookResult<StoreLock> {
        fs::create_dir_all(&self.dir)?;
        let file = File::create(self.dir.join(LOCK_FILE))?;
        file.lock_exclusive()?;
        Ok(StoreLock { _file: Some(file) })
    }
}

/// In-process store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> ShowbookResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> ShowbookResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn lock(&self) -> ShowbookResult<StoreLock> {
        Ok(StoreLock::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;

    #[test]
    fn test_bad_record_does_not_drop_collection() {
        let store = MemoryStore::new();
        store.write(BOOKINGS_KEY, r#"[1, "two", 3]"#).unwrap();

        let numbers: Vec<u32> = store.get_each(BOOKINGS_KEY);
        assert_eq!(numbers, vec![1, 3]);
        assert!(store.has_records(BOOKINGS_KEY));

        store.write(BOOKINGS_KEY, r#"{"not": "an array"}"#).unwrap();
        assert!(!store.has_records(BOOKINGS_KEY));
        assert!(!store.has_records(COMMENTS_KEY));
    }

    #[test]
    fn test_missing_key_uses_fallback() {
        let store = MemoryStore::new();
        let events: Vec<String> = store.get(EVENTS_KEY, vec!["fallback".to_string()]);
        assert_eq!(events, vec!["fallback".to_string()]);
    }

    #[test]
    fn test_corrupt_json_uses_fallback() {
        let store = MemoryStore::new();
        store.write(BOOKINGS_KEY, "{not json").unwrap();
        let bookings: Vec<u32> = store.get(BOOKINGS_KEY, Vec::new());
        assert!(bookings.is_empty());

        // Valid JSON of the wrong shape also falls back
        store.write(USER_KEY, "[1, 2, 3]").unwrap();
        assert_eq!(store.get(USER_KEY, User::demo()), User::demo());
    }

    #[test]
    fn test_null_entry_uses_fallback() {
        let store = MemoryStore::new();
        store.write(USER_KEY, "null").unwrap();
        assert_eq!(store.get::<Option<User>>(USER_KEY, None), None);
        assert_eq!(store.get(USER_KEY, User::demo()), User::demo());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));

        store.set(COMMENTS_KEY, &vec![1, 2, 3]).unwrap();
        assert!(dir.path().join("data/comments.json").exists());
        assert!(!dir.path().join("data/comments.json.tmp").exists());

        let back: Vec<i32> = store.get(COMMENTS_KEY, Vec::new());
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn test_file_store_missing_dir_reads_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nowhere"));
        let events: Vec<i32> = store.get(EVENTS_KEY, Vec::new());
        assert!(events.is_empty());
    }

    #[test]
    fn test_file_store_lock_is_reacquirable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        {
            let _guard = store.lock().unwrap();
        }
        let _again = store.lock().unwrap();
        assert!(dir.path().join(LOCK_FILE).exists());
    }
}
