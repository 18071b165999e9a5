// src/config.rs
//
// Application configuration
//
// Loading order:
// 1. Explicit file (--config)
// 2. {CONFIG_DIR}/reloop/config.toml, when present
// 3. Defaults
// RELOOP_DATABASE_PATH then overrides the database location.

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::get_database_path;
use crate::error::{AppError, AppResult};

pub const DATABASE_PATH_ENV: &str = "RELOOP_DATABASE_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file; the platform data directory when unset
    pub database_path: Option<PathBuf>,

    pub pool_max_size: u32,

    /// Fallback filter when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            pool_max_size: 8,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve the configuration for this process
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        debug!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// {CONFIG_DIR}/reloop/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("reloop").join("config.toml"))
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DATABASE_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            self.database_path = Some(PathBuf::from(path));
        }
    }

    /// Configured path, or the default data-directory location
    pub fn resolved_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => get_database_path(),
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.pool_max_size == 0 {
            return Err(AppError::Config(
                "pool_max_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
