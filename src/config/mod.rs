use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Which backend stores entries, settings, users and the audit trail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Sqlite,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_json_store")]
    pub json_store: String,
    #[serde(default)]
    pub storage: StorageKind,
    /// Use the JSON file when the SQLite database cannot be opened.
    #[serde(default = "default_true")]
    pub json_fallback: bool,
    #[serde(default = "default_server_host")]
    pub server_host: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    #[serde(default = "default_user")]
    pub default_user: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_json_store() -> String {
    Config::json_store_file().to_string_lossy().to_string()
}
fn default_true() -> bool {
    true
}
fn default_server_host() -> String {
    "127.0.0.1".to_string()
}
fn default_server_port() -> u16 {
    3001
}
fn default_user() -> String {
    "admin".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            json_store: default_json_store(),
            storage: StorageKind::default(),
            json_fallback: default_true(),
            server_host: default_server_host(),
            server_port: default_server_port(),
            default_user: default_user(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("caixa-tulsi")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".caixa-tulsi")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("caixa.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("caixa.sqlite")
    }

    pub fn json_store_file() -> PathBuf {
        Self::config_dir().join("caixa.json")
    }

    /// Relative paths given on the command line live in the config directory.
    pub fn resolve_path(name: &str) -> String {
        let p = Path::new(name);
        if p.is_absolute() {
            name.to_string()
        } else {
            Self::config_dir().join(p).to_string_lossy().to_string()
        }
    }

    /// Load configuration from file, or return defaults if not found.
    /// Keys missing from an older file take their default value.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(&content)?)
    }

    /// Create the config directory, the config file (unless `is_test`) and
    /// the parent directory of the database.
    ///
    /// `custom_db` relative paths are resolved inside the config directory.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        let mut config = Self::load().unwrap_or_default();

        if let Some(name) = custom_db {
            config.database = Self::resolve_path(name);
        }

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = Path::new(&config.database).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\nstorage: json\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.storage, StorageKind::Json);
        assert!(cfg.json_fallback);
        assert_eq!(cfg.server_port, 3001);
        assert_eq!(cfg.log_level, "warn");
    }
}
