//! Configuration loader
//!
//! Finds the nearest `.decogen.json` walking up from a directory and fills
//! in what it leaves unset from the environment.

use super::Config;
use crate::error::Result;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the current directory or environment
    pub fn load() -> Result<Config> {
        match std::env::current_dir() {
            Ok(cwd) => Self::load_from_path(&cwd),
            Err(_) => Self::finish(Config::default()),
        }
    }

    /// Load configuration starting the search at `path`
    pub fn load_from_path(path: &Path) -> Result<Config> {
        let start = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };

        let config = match Config::find_config_file(start) {
            Some(config_path) => {
                tracing::debug!("Found config at: {:?}", config_path);
                Config::load_from_file(&config_path)?
            }
            None => {
                tracing::debug!("No config found above {:?}, using defaults", start);
                Config {
                    root: Some(start.to_path_buf()),
                    ..Config::default()
                }
            }
        };
        Self::finish(config)
    }

    /// Load an explicitly named configuration file
    pub fn load_file(path: &Path) -> Result<Config> {
        tracing::debug!("Loading config file: {:?}", path);
        Self::finish(Config::load_from_file(path)?)
    }

    fn finish(mut config: Config) -> Result<Config> {
        config.fill_from_env();
        tracing::debug!(
            "Effective config: goroot={:?}, gopath={:?}, {} module mappings",
            config.goroot,
            config.gopath,
            config.modules.len()
        );
        Ok(config)
    }
}
