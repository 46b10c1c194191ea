//! # Application Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LOGIPRO_DB_PATH=/data/logipro.db                                   │
//! │     LOGIPRO_DEBOUNCE_MS=250                                            │
//! │     LOGIPRO_ALLOW_PAST_DATES=true                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/logipro/logipro.toml (Linux)                             │
//! │     ~/Library/Application Support/com.logipro.app/logipro.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/home/ali/.local/share/logipro/logipro.db"
//! max_connections = 5
//!
//! [search]
//! debounce_ms = 300
//!
//! [jobs]
//! allow_past_dates = false
//!
//! [account]
//! user_id = "3f1c..."   # optional, restores the last signed-in user
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ConfigError;

const CONFIG_FILE_NAME: &str = "logipro.toml";
const DATABASE_FILE_NAME: &str = "logipro.db";

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Empty means the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

/// `[search]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Quiet period before a typed query is applied.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    logipro_core::DEFAULT_SEARCH_DEBOUNCE_MS
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// `[jobs]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSettings {
    /// Accept planned jobs whose loading or delivery date is before today.
    #[serde(default)]
    pub allow_past_dates: bool,
}

/// `[account]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSettings {
    #[serde(default)]
    pub user_id: Option<String>,
}

// =============================================================================
// App Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub jobs: JobSettings,

    #[serde(default)]
    pub account: AccountSettings,
}

impl AppConfig {
    /// Loads configuration from a file, then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading configuration");

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Loads from the given path (or the default location) when the file
    /// exists, otherwise starts from defaults. Env overrides apply either way.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_config_path(),
        };

        if let Some(path) = path.filter(|p| p.exists()) {
            return Self::load(&path);
        }

        info!("No config file found, using defaults");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("LOGIPRO_DB_PATH") {
            debug!(%path, "Database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Ok(value) = std::env::var("LOGIPRO_DEBOUNCE_MS") {
            match value.parse() {
                Ok(ms) => self.search.debounce_ms = ms,
                Err(_) => warn!(%value, "Ignoring invalid LOGIPRO_DEBOUNCE_MS"),
            }
        }

        if let Ok(value) = std::env::var("LOGIPRO_ALLOW_PAST_DATES") {
            match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.jobs.allow_past_dates = true,
                "0" | "false" | "no" => self.jobs.allow_past_dates = false,
                _ => warn!(%value, "Ignoring invalid LOGIPRO_ALLOW_PAST_DATES"),
            }
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }

        if self.search.debounce_ms > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "search.debounce_ms must be at most 10000, got {}",
                self.search.debounce_ms
            )));
        }

        if let Some(user_id) = &self.account.user_id {
            if user_id.trim().is_empty() || user_id.contains('/') {
                return Err(ConfigError::Invalid(format!(
                    "account.user_id is not a valid id: '{}'",
                    user_id
                )));
            }
        }

        Ok(())
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    /// Configured database file, or `logipro.db` in the platform data
    /// directory (created if missing).
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::Write {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }

    /// Platform config location of `logipro.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "logipro", "app")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.debounce_delay(), Duration::from_millis(300));
        assert!(!config.jobs.allow_past_dates);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [jobs]
            allow_past_dates = true
            "#,
        )
        .unwrap();

        assert!(config.jobs.allow_past_dates);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.database.path, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.account.user_id = Some("a/b".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("logipro-config-{}", std::process::id()));
        let path = dir.join("logipro.toml");

        let mut config = AppConfig::default();
        config.search.debounce_ms = 150;
        config.database.path = Some(PathBuf::from("/tmp/x.db"));
        config.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: AppConfig = toml::from_str(&content).unwrap();
        assert_eq!(loaded.search.debounce_ms, 150);
        assert_eq!(loaded.database.path, Some(PathBuf::from("/tmp/x.db")));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = AppConfig::load(Path::new("/nonexistent/logipro.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
