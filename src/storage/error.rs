//! Storage-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing persisted values.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to read a stored value
    #[error("Failed to read '{key}' from {path}: {source}")]
    ReadFailed {
        key: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a stored value
    #[error("Failed to write '{key}' to {path}: {source}")]
    WriteFailed {
        key: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backend refused the value because it is out of space
    #[error("Storage quota exceeded while writing '{key}' ({needed} bytes needed, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// Failed to serialize a value before writing it
    #[error("Failed to serialize '{key}': {source}")]
    Serialization {
        key: String,
        source: serde_json::Error,
    },

    /// Stored value could not be parsed into the requested type
    #[error("Failed to deserialize '{key}': {source}")]
    Deserialization {
        key: String,
        source: serde_json::Error,
    },

    /// Key cannot be mapped onto the backend
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Backend is not usable (e.g. a poisoned lock)
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let error = StorageError::QuotaExceeded {
            key: "tasks".to_string(),
            needed: 120,
            available: 64,
        };
        let error_str = error.to_string();
        assert!(error_str.contains("quota exceeded"));
        assert!(error_str.contains("tasks"));
        assert!(error_str.contains("120"));

        let error = StorageError::Unavailable("lock poisoned".to_string());
        assert!(error.to_string().contains("lock poisoned"));
    }

    #[test]
    fn test_storage_error_with_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = StorageError::WriteFailed {
            key: "darkMode".to_string(),
            path: PathBuf::from("/data/darkMode.json"),
            source: io_error,
        };
        let error_str = error.to_string();
        assert!(error_str.contains("darkMode"));
        assert!(error_str.contains("/data/darkMode.json"));
    }
}
