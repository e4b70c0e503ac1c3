//! Versioned schema migrations.
//!
//! Each applied migration leaves a `migration_applied` record in the audit
//! log; a migration whose marker exists is skipped.

use rusqlite::{Connection, OptionalExtension, Result, params};
use tracing::info;

const MIGRATION_ACTION: &str = "migration_applied";
const SYSTEM_USER: &str = "system";

/// Ensure that the `audit_log` table exists (it also stores migration markers).
fn ensure_audit_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            username  TEXT NOT NULL,
            action    TEXT NOT NULL,
            details   TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_audit_log_timestamp ON audit_log(timestamp);
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM audit_log
         WHERE action = ?1 AND details = ?2
         LIMIT 1",
    )?;
    Ok(chk
        .query_row(params![MIGRATION_ACTION, version], |_| Ok(()))
        .optional()?
        .is_some())
}

fn mark_applied(conn: &Connection, version: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO audit_log (timestamp, username, action, details)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            chrono::Local::now().to_rfc3339(),
            SYSTEM_USER,
            MIGRATION_ACTION,
            version
        ],
    )?;
    info!(version, "migration applied");
    Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migrate_initial_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS daily_entries (
            id               TEXT PRIMARY KEY,   -- YYYY-MM-DD
            data             TEXT NOT NULL,      -- JSON document
            created_at       TEXT NOT NULL,
            last_modified_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL                  -- JSON value
        );

        CREATE TABLE IF NOT EXISTS users (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            role     TEXT NOT NULL CHECK(role IN ('administrator','operator')),
            shifts   TEXT NOT NULL DEFAULT '[]'  -- JSON array
        );
        "#,
    )
}

fn migrate_users_allowed_pages(conn: &Connection) -> Result<()> {
    if column_exists(conn, "users", "allowed_pages")? {
        return Ok(());
    }
    conn.execute(
        "ALTER TABLE users ADD COLUMN allowed_pages TEXT NOT NULL DEFAULT '[]';",
        [],
    )?;
    Ok(())
}

type Migration = (&'static str, fn(&Connection) -> Result<()>);

const MIGRATIONS: [Migration; 2] = [
    ("20240601_0001_initial_schema", migrate_initial_schema),
    ("20241010_0002_users_allowed_pages", migrate_users_allowed_pages),
];

/// Public entry point: run all pending migrations.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_audit_table(conn)?;

    for (version, migration) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }
        migration(conn)?;
        mark_applied(conn, version)?;
    }

    Ok(())
}

/// Versions already applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_audit_table(conn)?;
    let mut stmt = conn.prepare_cached(
        "SELECT details FROM audit_log WHERE action = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([MIGRATION_ACTION], |row| row.get(0))?;
    rows.collect()
}
