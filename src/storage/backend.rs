//! Durable backends for the key-value store.
//!
//! A backend only moves raw JSON text in and out; (de)serialization and the
//! fail-soft policy live in [`Store`](super::Store).

use super::StorageError;
use log::*;
use std::{
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

const FILE_EXTENSION: &str = "json";

/// Raw string storage addressed by key.
///
pub trait Backend: Send + Sync {
    /// Return the stored text for the key, or `None` if nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the stored text for the key.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Forget the key. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Stores every key as its own `<key>.json` document inside a directory.
///
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Return a backend rooted at the given directory. The directory is
    /// created lazily on first write.
    ///
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBackend { dir: dir.into() }
    }

    /// Return the directory holding the documents.
    ///
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

impl Backend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed {
                key: key.to_string(),
                path,
                source: e,
            }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_failed = |source| StorageError::WriteFailed {
            key: key.to_string(),
            path: path.clone(),
            source,
        };

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(write_failed)?;
        }

        // Write next to the target and swap it in, so a crash mid-write
        // never leaves a truncated document behind.
        let tmp_path = path.with_extension(format!("{}.tmp", FILE_EXTENSION));
        let written = fs::File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(value.as_bytes())?;
                file.flush()
            })
            .and_then(|_| fs::rename(&tmp_path, &path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                trace!("No temp file to clean up at {}: {}", tmp_path.display(), cleanup);
            }
            return Err(write_failed(e));
        }

        trace!("Wrote {} bytes for key '{}' to {}", value.len(), key, path.display());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::WriteFailed {
                key: key.to_string(),
                path,
                source: e,
            }),
        }
    }
}

/// Keeps values in process memory. Optionally enforces a byte quota over
/// the sum of all stored values.
///
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Return an empty, unbounded backend.
    ///
    pub fn new() -> Self {
        Self::default()
    }

    /// Return an empty backend refusing writes past `bytes` in total.
    ///
    pub fn with_quota(bytes: usize) -> Self {
        MemoryBackend {
            items: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.items
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

impl Backend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.lock()?;
        if let Some(quota) = self.quota {
            let used: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let available = quota.saturating_sub(used);
            if value.len() > available {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed: value.len(),
                    available,
                });
            }
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
