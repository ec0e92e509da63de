//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dataset and storage locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Log level settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Directory index behavior
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Scheduled cleanup job settings
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.paths.storage_dir.trim().is_empty() {
            return Err(AppError::validation("paths.storage_dir is empty"));
        }
        if self.cleanup.interaction_retention_days == 0 {
            return Err(AppError::validation(
                "cleanup.interaction_retention_days must be > 0",
            ));
        }
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(AppError::validation(format!(
                "logging.level '{}' is not a log level",
                self.logging.level
            )));
        }
        Ok(())
    }
}

/// Locations of the static datasets and the document store.
///
/// Dataset paths are optional: when unset, the copies bundled into the binary
/// are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_universities: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_universities: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    /// Root of the local document store
    #[serde(default = "defaults::storage_dir")]
    pub storage_dir: String,
}

impl PathsConfig {
    /// Resolve a configured path against a base directory.
    pub fn resolve(base: &Path, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }

    /// Root of the local document store, resolved against `base`.
    pub fn storage_root(&self, base: &Path) -> PathBuf {
        Self::resolve(base, &self.storage_dir)
    }

    /// Whether every dataset is taken from the bundled copies.
    pub fn uses_bundled(&self) -> bool {
        self.private_universities.is_none()
            && self.public_universities.is_none()
            && self.series.is_none()
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            private_universities: None,
            public_universities: None,
            series: None,
            storage_dir: defaults::storage_dir(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// What to do when two records produce the same slug.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Warn and let the first record in file order shadow the others
    #[default]
    FirstWins,
    /// Refuse to build the directory
    Reject,
}

/// Directory index settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub duplicate_slugs: DuplicatePolicy,
}

/// Daily cleanup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Interactions older than this are deleted
    #[serde(default = "defaults::interaction_retention_days")]
    pub interaction_retention_days: u32,

    /// Delete scholarships whose deadline has passed
    #[serde(default = "defaults::purge_expired_scholarships")]
    pub purge_expired_scholarships: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interaction_retention_days: defaults::interaction_retention_days(),
            purge_expired_scholarships: defaults::purge_expired_scholarships(),
        }
    }
}

mod defaults {
    pub fn storage_dir() -> String {
        "storage".into()
    }
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn interaction_retention_days() -> u32 {
        90
    }
    pub fn purge_expired_scholarships() -> bool {
        true
    }
}
