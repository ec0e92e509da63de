// src/config.rs

//! Configuration loading utilities.
//!
//! Loads `data/config.toml` and `data/locale.toml` from a base directory and
//! builds the directory index they describe.

use std::path::Path;

use crate::directory::{Dataset, Directory};
use crate::error::Result;
use crate::models::{Config, LocaleConfig};

pub const CONFIG_FILE: &str = "data/config.toml";
pub const LOCALE_FILE: &str = "data/locale.toml";

/// Everything a command needs to run.
#[derive(Debug)]
pub struct Loaded {
    pub config: Config,
    pub locale: LocaleConfig,
    pub directory: Directory,
}

/// Load configuration and locale, falling back to defaults when the files
/// are missing or unreadable.
pub fn load_settings(base_path: &Path) -> Result<(Config, LocaleConfig)> {
    let config = Config::load_or_default(base_path.join(CONFIG_FILE));
    config.validate()?;

    let locale = LocaleConfig::load_or_default(base_path.join(LOCALE_FILE));
    Ok((config, locale))
}

/// Load the datasets named by `config` and build the directory index.
///
/// Dataset errors are fatal.
pub fn load_directory(config: &Config, base_path: &Path) -> Result<Directory> {
    let dataset = Dataset::load(&config.paths, base_path)?;
    if config.paths.uses_bundled() {
        log::debug!("Using bundled datasets");
    }
    Directory::new(dataset, config.directory.duplicate_slugs)
}

/// Load settings, then the datasets and the directory index.
pub fn load_all(base_path: &Path) -> Result<Loaded> {
    let (config, locale) = load_settings(base_path)?;
    let directory = load_directory(&config, base_path)?;
    Ok(Loaded {
        config,
        locale,
        directory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DuplicatePolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_all_defaults_without_files() {
        let tmp = TempDir::new().unwrap();
        let loaded = load_all(tmp.path()).unwrap();

        assert_eq!(loaded.config.directory.duplicate_slugs, DuplicatePolicy::FirstWins);
        assert!(!loaded.directory.private().is_empty());
        assert_eq!(
            loaded.locale.messages.series_not_found,
            "Série introuvable."
        );
    }

    #[test]
    fn test_load_all_reads_configured_dataset() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("data")).unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[paths]\nprivate_universities = \"privees.json\"\n",
        )
        .unwrap();
        fs::write(
            tmp.path().join("privees.json"),
            r#"[{"ID": 7, "Nom": "Institut Test", "Sigle": "IT"}]"#,
        )
        .unwrap();

        let loaded = load_all(tmp.path()).unwrap();
        assert_eq!(loaded.directory.private().len(), 1);
        assert!(loaded.directory.find_private("it-7").is_some());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("data")).unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[cleanup]\ninteraction_retention_days = 0\n",
        )
        .unwrap();

        assert!(load_all(tmp.path()).is_err());
    }

    #[test]
    fn test_malformed_dataset_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("data")).unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[paths]\nseries = \"s.json\"\n").unwrap();
        fs::write(tmp.path().join("s.json"), "{not json").unwrap();

        assert!(load_all(tmp.path()).is_err());
    }
}
