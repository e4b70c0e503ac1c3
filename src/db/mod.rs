//! Persistence: the `Storage` trait and its SQLite and JSON-file backends.

pub mod initialize;
pub mod json_file;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod sqlite;

use crate::config::{Config, StorageKind};
use crate::core::range::DateRange;
use crate::errors::{AppError, AppResult};
use crate::models::audit::AuditRecord;
use crate::models::entry::DailyLogEntry;
use crate::models::user::User;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};

pub use json_file::JsonFileStorage;
pub use sqlite::SqliteStorage;

/// Closure applied to the current version of an entry (if any) to produce
/// the version to store.
pub type EntryUpdate<'a> = dyn FnMut(Option<DailyLogEntry>) -> AppResult<DailyLogEntry> + 'a;

/// Everything the application persists.
///
/// Implementations must make `update_entry` a single read-modify-write so
/// concurrent saves of the same date cannot lose each other's periods.
pub trait Storage: Send {
    fn backend(&self) -> &'static str;

    /// Entries in `range` (all when `None`), sorted by date.
    fn get_all_entries(&self, range: Option<&DateRange>) -> AppResult<Vec<DailyLogEntry>>;

    fn get_entry(&self, date: NaiveDate) -> AppResult<Option<DailyLogEntry>>;

    fn update_entry(&mut self, date: NaiveDate, apply: &mut EntryUpdate<'_>)
    -> AppResult<DailyLogEntry>;

    fn get_setting(&self, key: &str) -> AppResult<Option<Value>>;

    fn save_setting(&mut self, key: &str, value: &Value) -> AppResult<()>;

    fn all_settings(&self) -> AppResult<BTreeMap<String, Value>>;

    fn list_users(&self) -> AppResult<Vec<User>>;

    /// Insert, or replace the user with the same username.
    fn save_user(&mut self, user: &User) -> AppResult<User>;

    fn delete_user(&mut self, username: &str) -> AppResult<bool>;

    fn append_audit(&mut self, record: &AuditRecord) -> AppResult<()>;

    /// Most recent records first.
    fn list_audit(&self, limit: Option<usize>) -> AppResult<Vec<AuditRecord>>;
}

/// Open the configured backend, falling back to the JSON file when the
/// SQLite database cannot be opened and the fallback is enabled.
pub fn open_storage(cfg: &Config) -> AppResult<Box<dyn Storage>> {
    match cfg.storage {
        StorageKind::Json => Ok(Box::new(JsonFileStorage::open(&cfg.json_store)?)),
        StorageKind::Sqlite => match SqliteStorage::open(&cfg.database) {
            Ok(s) => {
                info!(path = %cfg.database, "using sqlite storage");
                Ok(Box::new(s))
            }
            Err(e) if cfg.json_fallback => {
                warn!(
                    path = %cfg.database,
                    error = %e,
                    fallback = %cfg.json_store,
                    "sqlite storage unavailable, falling back to json file"
                );
                Ok(Box::new(JsonFileStorage::open(&cfg.json_store)?))
            }
            Err(e) => Err(AppError::StorageUnavailable(format!(
                "{}: {}",
                cfg.database, e
            ))),
        },
    }
}
