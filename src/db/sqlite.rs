use crate::core::range::DateRange;
use crate::db::pool::DbPool;
use crate::db::initialize::init_db;
use crate::db::migrate::applied_versions;
use crate::db::{EntryUpdate, Storage};
use crate::errors::{AppError, AppResult};
use crate::models::audit::AuditRecord;
use crate::models::entry::DailyLogEntry;
use crate::models::user::{Role, User};
use chrono::NaiveDate;
use rusqlite::{OptionalExtension, Row, params};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

pub struct SqliteStorage {
    pool: DbPool,
}

fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Decode a stored entry document; a document that is not even a JSON
/// object is skipped rather than failing the whole read.
fn parse_entry(id: &str, data: &str) -> Option<DailyLogEntry> {
    match serde_json::from_str::<DailyLogEntry>(data) {
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

fn map_user(row: &Row) -> rusqlite::Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_code(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidInput(format!("Invalid role: {role_str}"))),
        )
    })?;
    let shifts: String = row.get("shifts")?;
    let pages: String = row.get("allowed_pages")?;

    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        role,
        shifts: serde_json::from_str(&shifts).unwrap_or_default(),
        allowed_pages: serde_json::from_str(&pages).unwrap_or_default(),
    })
}

fn map_audit(row: &Row) -> rusqlite::Result<AuditRecord> {
    Ok(AuditRecord {
        id: row.get("id")?,
        username: row.get("username")?,
        action: row.get("action")?,
        details: row.get("details")?,
        timestamp: row.get("timestamp")?,
    })
}

impl SqliteStorage {
    /// Open (creating if needed) the database file and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    /// Database integrity check, `"ok"` when healthy.
    pub fn integrity_check(&self) -> AppResult<String> {
        Ok(self
            .pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?)
    }

    pub fn vacuum(&self) -> AppResult<()> {
        self.pool.conn.execute_batch("VACUUM;")?;
        Ok(())
    }

    /// Row counts and applied schema versions.
    pub fn stats(&self) -> AppResult<DbStats> {
        let count = |table: &str| -> AppResult<i64> {
            Ok(self
                .pool
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?)
        };

        Ok(DbStats {
            entries: count("daily_entries")?,
            settings: count("settings")?,
            users: count("users")?,
            audit_records: count("audit_log")?,
            migrations: applied_versions(&self.pool.conn)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DbStats {
    pub entries: i64,
    pub settings: i64,
    pub users: i64,
    pub audit_records: i64,
    pub migrations: Vec<String>,
}

impl Storage for SqliteStorage {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn get_all_entries(&self, range: Option<&DateRange>) -> AppResult<Vec<DailyLogEntry>> {
        let (start, end) = match range {
            Some(r) => (r.start_str(), r.end_str()),
            None => ("0000-00-00".to_string(), "9999-99-99".to_string()),
        };

        let mut stmt = self.pool.conn.prepare_cached(
            "SELECT id, data FROM daily_entries
             WHERE id >= ?1 AND id <= ?2
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![start, end], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = Vec::new();
        for r in rows {
            let (id, data) = r?;
            if let Some(entry) = parse_entry(&id, &data) {
                out.push(entry);
            }
        }
        Ok(out)
    }

    fn get_entry(&self, date: NaiveDate) -> AppResult<Option<DailyLogEntry>> {
        let id = day_key(date);
        let data: Option<String> = self
            .pool
            .conn
            .query_row(
                "SELECT data FROM daily_entries WHERE id = ?1",
                [&id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(data.and_then(|d| parse_entry(&id, &d)))
    }

    fn update_entry(
        &mut self,
        date: NaiveDate,
        apply: &mut EntryUpdate<'_>,
    ) -> AppResult<DailyLogEntry> {
        let id = day_key(date);
        let tx = self.pool.conn.transaction()?;

        let existing: Option<String> = tx
            .query_row(
                "SELECT data FROM daily_entries WHERE id = ?1",
                [&id],
                |row| row.get(0),
            )
            .optional()?;

        let current = match existing {
            Some(d) => match parse_entry(&id, &d) {
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
        let data = serde_json::to_string(&updated)?;

        tx.execute(
            "INSERT INTO daily_entries (id, data, created_at, last_modified_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                data = excluded.data,
                last_modified_at = excluded.last_modified_at",
            params![id, data, updated.created_at, updated.last_modified_at],
        )?;
        tx.commit()?;

        Ok(updated)
    }

    fn get_setting(&self, key: &str) -> AppResult<Option<Value>> {
        let raw: Option<String> = self
            .pool
            .conn
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(match raw {
            Some(r) => Some(serde_json::from_str(&r)?),
            None => None,
        })
    }

    fn save_setting(&mut self, key: &str, value: &Value) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, serde_json::to_string(value)?],
        )?;
        Ok(())
    }

    fn all_settings(&self) -> AppResult<BTreeMap<String, Value>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT key, value FROM settings ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = BTreeMap::new();
        for r in rows {
            let (key, raw) = r?;
            match serde_json::from_str(&raw) {
                Ok(v) => {
                    out.insert(key, v);
                }
                Err(e) => warn!(key, error = %e, "unreadable setting ignored"),
            }
        }
        Ok(out)
    }

    fn list_users(&self) -> AppResult<Vec<User>> {
        let mut stmt = self.pool.conn.prepare_cached(
            "SELECT id, username, role, shifts, allowed_pages FROM users ORDER BY username ASC",
        )?;
        let rows = stmt.query_map([], map_user)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn save_user(&mut self, user: &User) -> AppResult<User> {
        self.pool.conn.execute(
            "INSERT INTO users (username, role, shifts, allowed_pages)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(username) DO UPDATE SET
                role = excluded.role,
                shifts = excluded.shifts,
                allowed_pages = excluded.allowed_pages",
            params![
                user.username,
                user.role.as_str(),
                serde_json::to_string(&user.shifts)?,
                serde_json::to_string(&user.allowed_pages)?,
            ],
        )?;

        let saved = self.pool.conn.query_row(
            "SELECT id, username, role, shifts, allowed_pages FROM users WHERE username = ?1",
            [&user.username],
            map_user,
        )?;
        Ok(saved)
    }

    fn delete_user(&mut self, username: &str) -> AppResult<bool> {
        let n = self
            .pool
            .conn
            .execute("DELETE FROM users WHERE username = ?1", [username])?;
        Ok(n > 0)
    }

    fn append_audit(&mut self, record: &AuditRecord) -> AppResult<()> {
        let mut stmt = self.pool.conn.prepare_cached(
            "INSERT INTO audit_log (timestamp, username, action, details)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        stmt.execute(params![
            record.timestamp,
            record.username,
            record.action,
            record.details
        ])?;
        Ok(())
    }

    fn list_audit(&self, limit: Option<usize>) -> AppResult<Vec<AuditRecord>> {
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = self.pool.conn.prepare_cached(
            "SELECT id, timestamp, username, action, details FROM audit_log
             ORDER BY id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit], map_audit)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::EntryLogic;
    use crate::core::range::parse_day;
    use serde_json::json;

    #[test]
    fn unreadable_row_is_never_overwritten() {
        let mut store = SqliteStorage::in_memory().unwrap();
        let legacy = r#"["legacy", {"jantar": 1}]"#;
        store
            .pool
            .conn
            .execute(
                "INSERT INTO daily_entries (id, data, created_at, last_modified_at)
                 VALUES ('2024-07-15', ?1, '2024-07-15T10:00:00', '2024-07-15T10:00:00')",
                [legacy],
            )
            .unwrap();

        let day = parse_day("2024-07-15").unwrap();
        let err = EntryLogic::save_patch(&mut store, day, &json!({ "generalObservations": "x" }), "ana")
            .unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));

        let kept: String = store
            .pool
            .conn
            .query_row("SELECT data FROM daily_entries WHERE id = '2024-07-15'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(kept, legacy);
        assert!(store.get_entry(day).unwrap().is_none());
    }
}
