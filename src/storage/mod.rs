//! Persistent key-value store.
//!
//! This module provides the durable storage used by the task list and the
//! theme flag:
//! - `Backend` implementations moving raw JSON text (`FileBackend`, `MemoryBackend`)
//! - `Store`, a cheap-to-clone handle that (de)serializes values and fails soft
//! - `Persisted<T>`, a single value mirrored in memory and written through on change

mod backend;
mod error;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use error::StorageError;

use log::*;
use serde::{de::DeserializeOwned, Serialize};
use std::{path::PathBuf, sync::Arc};

/// Handle onto a storage backend.
///
/// `read` and `write` never fail: persistence problems are logged and the
/// caller carries on with in-memory data. Use `try_read`/`try_write` when the
/// error matters.
///
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl Store {
    /// Return a store over the given backend.
    ///
    pub fn new(backend: impl Backend + 'static) -> Self {
        Store {
            backend: Arc::new(backend),
        }
    }

    /// Return a store persisting documents under the given directory.
    ///
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let backend = FileBackend::new(dir);
        debug!("Opening file store at {}...", backend.dir().display());
        Store::new(backend)
    }

    /// Return a store that lives only as long as the process.
    ///
    pub fn in_memory() -> Self {
        Store::new(MemoryBackend::new())
    }

    /// Read the value stored under `key`, returning `default` when nothing is
    /// stored or the stored copy cannot be used.
    ///
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_read(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("No stored value for '{}', using default.", key);
                default
            }
            Err(e) => {
                warn!("Ignoring stored value for '{}': {}", key, e);
                default
            }
        }
    }

    /// Read and parse the value stored under `key`.
    ///
    pub fn try_read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Deserialization {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Write `value` under `key`. Failures are logged and swallowed.
    ///
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_write(key, value) {
            error!("Failed to persist '{}': {}", key, e);
        }
    }

    /// Serialize `value` and write it under `key`.
    ///
    pub fn try_write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.backend.set_item(key, &raw)
    }

    /// Forget the value under `key`. Failures are logged and swallowed.
    ///
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            error!("Failed to remove '{}': {}", key, e);
        }
    }
}

/// A single value kept in memory and written through to a store on every
/// mutation.
///
/// Loading never writes: a missing or unreadable durable copy yields the
/// default, and the store is first touched by the first mutation.
///
pub struct Persisted<T> {
    store: Store,
    key: String,
    value: T,
}

impl<T: Serialize + DeserializeOwned> Persisted<T> {
    /// Load the value under `key`, falling back to `default`.
    ///
    pub fn load(store: &Store, key: &str, default: T) -> Self {
        let value = store.read(key, default);
        Persisted {
            store: store.clone(),
            key: key.to_string(),
            value,
        }
    }

    /// Return the in-memory value.
    ///
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Return the key the value is stored under.
    ///
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the value and write it through.
    ///
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.persist();
    }

    /// Mutate the value in place and write it through.
    ///
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value);
        self.persist();
        result
    }

    fn persist(&self) {
        self.store.write(&self.key, &self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        tags: Vec<String>,
        nested: Option<BTreeMap<String, f64>>,
    }

    #[test]
    fn read_missing_returns_default() {
        let store = Store::in_memory();
        assert_eq!(42, store.read("missing", 42));
    }

    #[test]
    fn write_then_read_round_trip() {
        let store = Store::in_memory();
        let mut nested = BTreeMap::new();
        nested.insert("weight".to_string(), 1.5);
        let record = Record {
            name: "Buy milk".to_string(),
            tags: vec!["home".to_string(), "".to_string()],
            nested: Some(nested),
        };
        store.write("record", &record);
        assert_eq!(record, store.read("record", record.clone()));

        let value = serde_json::json!({"a": [1, null, true], "b": {"c": "d"}});
        store.write("value", &value);
        assert_eq!(value, store.read("value", serde_json::Value::Null));
    }

    #[test]
    fn read_unparsable_returns_default() {
        let backend = MemoryBackend::new();
        backend.set_item("tasks", "{not json").unwrap();
        let store = Store::new(backend);
        let tasks: Vec<u64> = store.read("tasks", vec![7]);
        assert_eq!(vec![7], tasks);
        assert!(matches!(
            store.try_read::<Vec<u64>>("tasks"),
            Err(StorageError::Deserialization { .. })
        ));
    }

    #[test]
    fn read_wrong_shape_returns_default() {
        let store = Store::in_memory();
        store.write("darkMode", &"yes");
        assert!(!store.read("darkMode", false));
    }

    #[test]
    fn write_failure_is_swallowed() {
        let store = Store::new(MemoryBackend::with_quota(4));
        store.write("tasks", &vec!["far too long for the quota"]);
        assert!(store.try_read::<Vec<String>>("tasks").unwrap().is_none());
        assert!(store.try_write("tasks", &vec!["x"; 10]).is_err());
    }

    #[test]
    fn remove_forgets_value() {
        let store = Store::in_memory();
        store.write("darkMode", &true);
        store.remove("darkMode");
        assert!(!store.read("darkMode", false));
    }

    #[test]
    fn persisted_load_does_not_write() {
        let store = Store::in_memory();
        let persisted = Persisted::load(&store, "tasks", vec![1u64, 2]);
        assert_eq!(&vec![1, 2], persisted.get());
        assert_eq!("tasks", persisted.key());
        assert!(store.try_read::<Vec<u64>>("tasks").unwrap().is_none());
    }

    #[test]
    fn persisted_set_writes_through() {
        let store = Store::in_memory();
        let mut persisted = Persisted::load(&store, "darkMode", false);
        persisted.set(true);
        assert!(*persisted.get());
        assert_eq!(Some(true), store.try_read("darkMode").unwrap());

        let reloaded = Persisted::load(&store, "darkMode", false);
        assert!(*reloaded.get());
    }

    #[test]
    fn persisted_update_writes_through() {
        let store = Store::in_memory();
        let mut persisted = Persisted::load(&store, "tasks", Vec::<u64>::new());
        let len = persisted.update(|tasks| {
            tasks.push(3);
            tasks.len()
        });
        assert_eq!(1, len);
        assert_eq!(Some(vec![3u64]), store.try_read("tasks").unwrap());
    }

    #[test]
    fn persisted_keeps_memory_when_write_fails() {
        let store = Store::new(MemoryBackend::with_quota(2));
        let mut persisted = Persisted::load(&store, "tasks", Vec::<String>::new());
        persisted.set(vec!["does not fit".to_string()]);
        assert_eq!(&vec!["does not fit".to_string()], persisted.get());
        assert!(store.try_read::<Vec<String>>("tasks").unwrap().is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = Store::open(dir.path());
            let mut persisted = Persisted::load(&store, "tasks", Vec::<String>::new());
            persisted.set(vec!["Buy milk".to_string()]);
        }
        let store = Store::open(dir.path());
        let tasks: Vec<String> = store.read("tasks", vec![]);
        assert_eq!(vec!["Buy milk".to_string()], tasks);
    }
}
