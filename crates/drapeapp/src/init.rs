//! # Context Initialization
//!
//! Resolves configuration and wires a [`DrapeApi`] over a catalog file.
//!
//! ## Config Discovery
//!
//! [`load_config`] layers, highest priority first:
//!
//! 1. environment (`DRAPE_*`)
//! 2. `<cwd>/drape.toml`
//! 3. `<global config dir>/drape.toml`
//!
//! The global directory comes from [`directories::ProjectDirs`]. Setting
//! `DRAPE_CONFIG_DIR` overrides it; this is primarily used by tests to keep
//! the user's real config out of the picture.
//!
//! Missing files are skipped. A file that exists but does not parse is a
//! [`DrapeError::Config`](crate::error::DrapeError::Config).

use crate::api::DrapeApi;
use crate::config::DrapeConfig;
use crate::error::Result;
use crate::store::fs::FileStore;
use confique::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "drape.toml";

pub struct DrapeContext {
    pub api: DrapeApi<FileStore>,
    pub config: DrapeConfig,
}

/// Directory holding the user-wide `drape.toml`.
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("DRAPE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "drape").map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn load_config(cwd: &Path) -> Result<DrapeConfig> {
    let mut builder = DrapeConfig::builder().env().file(cwd.join(CONFIG_FILE));
    if let Some(global) = global_config_dir() {
        builder = builder.file(global.join(CONFIG_FILE));
    }
    Ok(builder.load()?)
}

/// Load config from `cwd` and open the catalog at `catalog`.
pub fn initialize(cwd: &Path, catalog: &Path) -> Result<DrapeContext> {
    let config = load_config(cwd)?;
    let catalog = if catalog.is_absolute() {
        catalog.to_path_buf()
    } else {
        cwd.join(catalog)
    };
    tracing::debug!(catalog = %catalog.display(), "opening catalog");
    let api = DrapeApi::new(FileStore::new(catalog), config.clone());
    Ok(DrapeContext { api, config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_local_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "priority_keys = [\"Neck\", \"Fabric\"]\nmax_options_per_facet = 3\n",
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.priority_keys, vec!["Neck", "Fabric"]);
        assert_eq!(config.max_options_per_facet, Some(3));
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.priority_keys, DrapeConfig::default().priority_keys);
    }

    #[test]
    fn test_broken_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "priority_keys = [").unwrap();
        assert!(matches!(
            load_config(temp.path()),
            Err(crate::error::DrapeError::Config(_))
        ));
    }

    #[test]
    fn test_initialize_resolves_relative_catalog() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(temp.path(), Path::new("catalog.json")).unwrap();
        assert_eq!(ctx.api.store().path(), temp.path().join("catalog.json"));
    }
}
