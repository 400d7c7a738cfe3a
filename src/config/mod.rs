//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the posts API location, the storage directory and request timeouts.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::posts::DEFAULT_API_BASE_URL;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/taskhub";
const STORAGE_DIRECTORY_NAME: &str = "storage";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub storage_dir: Option<PathBuf>,
    pub request_timeout_secs: u64, // 0 disables the timeout
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding default values.
    ///
    pub fn new() -> Config {
        Config {
            api_base_url: default_api_base_url(),
            storage_dir: None,
            request_timeout_secs: default_request_timeout_secs(),
            file_path: None,
        }
    }

    /// Load the configuration file from the custom directory if provided,
    /// otherwise from the default directory. A missing file is created with
    /// default values.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        self.file_path = Some(file_path.clone());

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.api_base_url = data.api_base_url;
            self.storage_dir = data.storage_dir;
            self.request_timeout_secs = data.request_timeout_secs;
            debug!("Loaded configuration from {}.", file_path.display());
        } else {
            info!(
                "No configuration found, writing defaults to {}...",
                file_path.display()
            );
            self.save()?;
        }

        self.validate()?;
        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            api_base_url: self.api_base_url.clone(),
            storage_dir: self.storage_dir.clone(),
            request_timeout_secs: self.request_timeout_secs,
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Check that configured values are usable.
    ///
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                message: format!("'{}' is not an http(s) URL", url),
            });
        }
        Ok(())
    }

    /// Returns the directory holding persisted tasks and preferences: the
    /// configured one, or a `storage` directory next to the config file.
    ///
    pub fn storage_path(&self) -> Result<PathBuf, AppError> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }
        let config_dir = match self.file_path.as_ref().and_then(|p| p.parent()) {
            Some(dir) => dir.to_path_buf(),
            None => Config::default_path()?,
        };
        Ok(config_dir.join(STORAGE_DIRECTORY_NAME))
    }

    /// Returns the HTTP timeout, or `None` if disabled.
    ///
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir_str(dir: &tempfile::TempDir) -> String {
        dir.path().to_string_lossy().into_owned()
    }

    #[test]
    fn load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(Some(&dir_str(&dir))).unwrap();

        assert_eq!(DEFAULT_API_BASE_URL, config.api_base_url);
        assert_eq!(Some(Duration::from_secs(10)), config.request_timeout());
        assert!(dir.path().join(FILE_NAME).exists());
        assert_eq!(dir.path().join("storage"), config.storage_path().unwrap());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(Some(&dir_str(&dir))).unwrap();
        config.api_base_url = "http://localhost:3000".to_string();
        config.storage_dir = Some(PathBuf::from("/tmp/taskhub-data"));
        config.request_timeout_secs = 0;
        config.save().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(Some(&dir_str(&dir))).unwrap();
        assert_eq!("http://localhost:3000", reloaded.api_base_url);
        assert_eq!(PathBuf::from("/tmp/taskhub-data"), reloaded.storage_path().unwrap());
        assert_eq!(None, reloaded.request_timeout());
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "request_timeout_secs: 3\n").unwrap();
        let mut config = Config::new();
        config.load(Some(&dir_str(&dir))).unwrap();
        assert_eq!(DEFAULT_API_BASE_URL, config.api_base_url);
        assert_eq!(Some(Duration::from_secs(3)), config.request_timeout());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "api_base_url: [unterminated").unwrap();
        let mut config = Config::new();
        let result = config.load(Some(&dir_str(&dir)));
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::DeserializationFailed(_)))
        ));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "api_base_url: ftp://example.com\n").unwrap();
        let mut config = Config::new();
        assert!(matches!(
            config.load(Some(&dir_str(&dir))),
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn save_without_path_fails() {
        let config = Config::new();
        assert!(matches!(
            config.save(),
            Err(AppError::Config(ConfigError::FilePathNotSet))
        ));
    }
}
