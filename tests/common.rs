#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use caixa_tulsi::models::entry::DailyLogEntry;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::PathBuf;

/// The `caixa` binary with HOME pointed at the temp dir, so a real
/// configuration file never leaks into the tests.
pub fn caixa() -> Command {
    let mut cmd = cargo_bin_cmd!("caixa");
    cmd.env("HOME", env::temp_dir()).env_remove("RUST_LOG");
    cmd
}

/// Unique test DB path inside the system temp dir; any previous file is removed.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_caixa.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Unique JSON store path inside the system temp dir.
pub fn setup_json_store(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_caixa.json", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Temporary output file path inside the temp dir, removed if present.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and record two lunch days in July 2024.
pub fn init_db_with_data(db_path: &str) {
    caixa()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (date, qty, value) in [("2024-07-15", "10", "250.00"), ("2024-07-16", "5", "125,00")] {
        caixa()
            .args([
                "--db",
                db_path,
                "entry",
                "channel",
                date,
                "almocoPrimeiroTurno",
                "hospedes",
                qty,
                value,
            ])
            .assert()
            .success();
    }
}

/// Build an entry for `date` from the JSON of its periods.
pub fn entry(date: &str, periods: Value) -> DailyLogEntry {
    let mut doc = periods;
    doc["id"] = Value::String(date.to_string());
    doc["date"] = Value::String(date.to_string());
    serde_json::from_value(doc).expect("entry json")
}
