//! Single-file JSON storage, used when no database is configured or the
//! database cannot be opened.

use crate::core::range::DateRange;
use crate::db::{EntryUpdate, Storage};
use crate::errors::{AppError, AppResult};
use crate::models::audit::AuditRecord;
use crate::models::entry::DailyLogEntry;
use crate::models::user::User;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Entries stay raw documents so one unreadable day neither blocks the
/// whole file nor gets lost on the next write.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonStoreData {
    #[serde(default)]
    entries: BTreeMap<String, Value>,
    #[serde(default)]
    settings: BTreeMap<String, Value>,
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    audit_logs: Vec<AuditRecord>,
}

fn decode_entry(id: &str, raw: &Value) -> Option<DailyLogEntry> {
    match DailyLogEntry::deserialize(raw) {
        Ok(mut entry) => {
            entry.id = id.to_string();
            Some(entry)
        }
        Err(e) => {
            warn!(entry = id, error = %e, "unreadable entry document skipped");
            None
        }
    }
}

pub struct JsonFileStorage {
    path: PathBuf,
    data: JsonStoreData,
}

impl JsonFileStorage {
    /// Load the store; a missing file is an empty store created on first write.
    pub fn open(path: &str) -> AppResult<Self> {
        let path = PathBuf::from(path);

        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                JsonStoreData::default()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    AppError::StorageUnavailable(format!("{}: {e}", path.display()))
                })?
            }
        } else {
            JsonStoreData::default()
        };

        info!(path = %path.display(), entries = data.entries.len(), "using json file storage");
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole store to a temporary file, then rename it over the
    /// original so readers never see a half-written file.
    fn persist(&self) -> AppResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.data)?)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "json store written");
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn backend(&self) -> &'static str {
        "json"
    }

    fn get_all_entries(&self, range: Option<&DateRange>) -> AppResult<Vec<DailyLogEntry>> {
        Ok(self
            .data
            .entries
            .iter()
            .filter_map(|(id, raw)| decode_entry(id, raw))
            .filter(|e| match (range, e.day()) {
                (None, _) => true,
                (Some(r), Some(day)) => r.contains(day),
                (Some(_), None) => false,
            })
            .collect())
    }

    fn get_entry(&self, date: NaiveDate) -> AppResult<Option<DailyLogEntry>> {
        let id = date.format("%Y-%m-%d").to_string();
        Ok(self.data.entries.get(&id).and_then(|raw| decode_entry(&id, raw)))
    }

    fn update_entry(
        &mut self,
        date: NaiveDate,
        apply: &mut EntryUpdate<'_>,
    ) -> AppResult<DailyLogEntry> {
        let id = date.format("%Y-%m-%d").to_string();
        let current = match self.data.entries.get(&id) {
            Some(raw) => match decode_entry(&id, raw) {
                Some(entry) => Some(entry),
                None => {
                    return Err(AppError::StorageUnavailable(format!(
                        "stored entry {id} is unreadable, refusing to overwrite it"
                    )));
                }
            },
            None => None,
        };
        let updated = apply(current)?;

        let previous = self
            .data
            .entries
            .insert(id.clone(), serde_json::to_value(&updated)?);
        if let Err(e) = self.persist() {
            // keep memory consistent with what is on disk
            match previous {
                Some(p) => self.data.entries.insert(id, p),
                None => self.data.entries.remove(&id),
            };
            return Err(e);
        }

        Ok(updated)
    }

    fn get_setting(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.data.settings.get(key).cloned())
    }

    fn save_setting(&mut self, key: &str, value: &Value) -> AppResult<()> {
        self.data.settings.insert(key.to_string(), value.clone());
        self.persist()
    }

    fn all_settings(&self) -> AppResult<BTreeMap<String, Value>> {
        Ok(self.data.settings.clone())
    }

    fn list_users(&self) -> AppResult<Vec<User>> {
        let mut users = self.data.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    fn save_user(&mut self, user: &User) -> AppResult<User> {
        let saved = match self
            .data
            .users
            .iter_mut()
            .find(|u| u.username == user.username)
        {
            Some(existing) => {
                let id = existing.id;
                *existing = User { id, ..user.clone() };
                existing.clone()
            }
            None => {
                let id = self.data.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
                let new_user = User { id, ..user.clone() };
                self.data.users.push(new_user.clone());
                new_user
            }
        };

        self.persist()?;
        Ok(saved)
    }

    fn delete_user(&mut self, username: &str) -> AppResult<bool> {
        let before = self.data.users.len();
        self.data.users.retain(|u| u.username != username);
        let removed = self.data.users.len() != before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    fn append_audit(&mut self, record: &AuditRecord) -> AppResult<()> {
        let id = self.data.audit_logs.last().map(|r| r.id).unwrap_or(0) + 1;
        self.data.audit_logs.push(AuditRecord {
            id,
            ..record.clone()
        });
        self.persist()
    }

    fn list_audit(&self, limit: Option<usize>) -> AppResult<Vec<AuditRecord>> {
        let records = self.data.audit_logs.iter().rev().cloned();
        Ok(match limit {
            Some(n) => records.take(n).collect(),
            None => records.collect(),
        })
    }
}
