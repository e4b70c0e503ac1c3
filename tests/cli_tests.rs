use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{caixa, init_db_with_data, setup_json_store, setup_test_db};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    caixa()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"))
        .stdout(contains("sqlite"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_entry_show_prints_totals() {
    let db_path = setup_test_db("cli_entry_show");
    init_db_with_data(&db_path);

    caixa()
        .args(["--db", &db_path, "entry", "show", "2024-07-15", "--json"])
        .assert()
        .success()
        .stdout(contains("\"grandTotalComCI\""))
        .stdout(contains("\"almocoPrimeiroTurno\""));

    caixa()
        .args(["--db", &db_path, "entry", "show", "2024-07-15"])
        .assert()
        .success()
        .stdout(contains("Almoço 1º turno"))
        .stdout(contains("R$ 250,00"));

    caixa()
        .args(["--db", &db_path, "entry", "show", "2024-07-20"])
        .assert()
        .success()
        .stdout(contains("No entry for 2024-07-20"));
}

#[test]
fn test_entry_rejects_bad_input() {
    let db_path = setup_test_db("cli_entry_bad");
    init_db_with_data(&db_path);

    caixa()
        .args(["--db", &db_path, "entry", "channel", "2024-07-15", "lanche", "pix", "1", "10"])
        .assert()
        .failure()
        .stderr(contains("unknown period id"));

    caixa()
        .args(["--db", &db_path, "entry", "channel", "15/07/2024", "jantar", "pix", "1", "10"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    caixa()
        .args(["--db", &db_path, "entry", "channel", "2024-07-15", "jantar", "pix", "1", "dez"])
        .assert()
        .failure()
        .stderr(contains("invalid amount"));
}

#[test]
fn test_entry_items_and_events() {
    let db_path = setup_test_db("cli_entry_items");
    init_db_with_data(&db_path);

    caixa()
        .args([
            "--db",
            &db_path,
            "entry",
            "faturado",
            "2024-07-15",
            "jantar",
            "Setor Financeiro",
            "2",
            "50",
            "--category",
            "employee",
        ])
        .assert()
        .success()
        .stdout(contains("Billed item for 'Setor Financeiro'"));

    caixa()
        .args([
            "--db", &db_path, "entry", "consumo", "2024-07-15", "jantar", "Cozinha", "1", "20",
        ])
        .assert()
        .success();

    caixa()
        .args([
            "--db", &db_path, "entry", "event", "2024-07-15", "Casamento", "off-site", "coffee",
            "40", "1200",
        ])
        .assert()
        .success();

    caixa()
        .args([
            "--db", &db_path, "entry", "event", "2024-07-15", "Casamento", "lua", "coffee", "1",
            "1",
        ])
        .assert()
        .failure()
        .stderr(contains("invalid location"));

    caixa()
        .args([
            "--db",
            &db_path,
            "report",
            "person",
            "--range",
            "2024-07",
            "--client",
            "Setor Financeiro",
        ])
        .assert()
        .success()
        .stdout(contains("Setor Financeiro"))
        .stdout(contains("Cozinha").not());
}

#[test]
fn test_entry_save_merges_patch_file() {
    let db_path = setup_test_db("cli_entry_save");
    init_db_with_data(&db_path);

    let patch = common::temp_out("cli_entry_save_patch", "json");
    fs::write(
        &patch,
        r#"{ "jantar": { "channels": { "pix": { "quantity": 3, "totalValue": 90 } } } }"#,
    )
    .unwrap();

    caixa()
        .args(["--db", &db_path, "entry", "save", "2024-07-15", "--file", &patch])
        .assert()
        .success();

    caixa()
        .args(["--db", &db_path, "report", "general", "--range", "2024-07-15", "--json"])
        .assert()
        .success()
        .stdout(contains("\"valor\": 340.0").or(contains("\"valor\": 340")));
}

#[test]
fn test_report_general_for_range() {
    let db_path = setup_test_db("cli_report_general");
    init_db_with_data(&db_path);

    caixa()
        .args(["--db", &db_path, "report", "general", "--range", "2024-07"])
        .assert()
        .success()
        .stdout(contains("2024-07-15"))
        .stdout(contains("2024-07-16"))
        .stdout(contains("R$ 375,00"));

    caixa()
        .args(["--db", &db_path, "report", "general", "--range", "2024-06"])
        .assert()
        .success()
        .stdout(contains("No entries found"));

    caixa()
        .args(["--db", &db_path, "report", "general", "--range", "2024-07-31:2024-07-01"])
        .assert()
        .failure()
        .stderr(contains("Invalid date range"));

    caixa()
        .args([
            "--db",
            &db_path,
            "report",
            "period",
            "almocoPrimeiroTurno",
            "--range",
            "2024-07",
        ])
        .assert()
        .success()
        .stdout(contains("hospedes"));
}

#[test]
fn test_settings_and_summary_toggle() {
    let db_path = setup_test_db("cli_settings");
    init_db_with_data(&db_path);

    caixa()
        .args([
            "--db",
            &db_path,
            "settings",
            "set",
            "summaryCardItems",
            r#"{"almocoPrimeiroTurno": false}"#,
        ])
        .assert()
        .success();

    caixa()
        .args(["--db", &db_path, "settings", "get", "summaryCardItems"])
        .assert()
        .success()
        .stdout(contains("\"almocoPrimeiroTurno\": false"));

    caixa()
        .args(["--db", &db_path, "settings", "set", "summaryCardItems", r#"{"lanche": true}"#])
        .assert()
        .failure()
        .stderr(contains("unknown summary category"));

    caixa()
        .args(["--db", &db_path, "entry", "show", "2024-07-15"])
        .assert()
        .success()
        .stdout(contains("TOTAL sem CI    :     0  R$ 0,00"));

    caixa()
        .args([
            "--db",
            &db_path,
            "settings",
            "set",
            "cardVisibility",
            r#"{"AlmocoPrimeiroTurno": false}"#,
        ])
        .assert()
        .success();

    caixa()
        .args(["--db", &db_path, "settings", "get", "cardVisibility"])
        .assert()
        .success()
        .stdout(contains("\"almocoPrimeiroTurno\": false"));

    caixa()
        .args(["--db", &db_path, "entry", "show", "2024-07-15"])
        .assert()
        .success()
        .stdout(contains("Almoço 1º turno").not());
}

#[test]
fn test_users_and_audit_log() {
    let db_path = setup_test_db("cli_users");
    init_db_with_data(&db_path);

    caixa()
        .args([
            "--db", &db_path, "--user", "gerente", "user", "add", "maria", "--shift", "jantar",
        ])
        .assert()
        .success();

    caixa()
        .args(["--db", &db_path, "user", "list"])
        .assert()
        .success()
        .stdout(contains("maria").and(contains("operator")).and(contains("jantar")));

    caixa()
        .args(["--db", &db_path, "user", "add", "chefe", "--role", "chef"])
        .assert()
        .failure()
        .stderr(contains("invalid role"));

    caixa()
        .args(["--db", &db_path, "user", "del", "maria"])
        .assert()
        .success();

    caixa()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("entry_channel"))
        .stdout(contains("gerente"))
        .stdout(contains("user_del"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("cli_db");
    init_db_with_data(&db_path);

    caixa()
        .args(["--db", &db_path, "db", "--info", "--check", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Entries   : 2"))
        .stdout(contains("20240601_0001_initial_schema"))
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_json_store_backend() {
    let store = setup_json_store("cli_json_backend");

    caixa()
        .args(["--json-store", &store, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("json"));

    caixa()
        .args([
            "--json-store",
            &store,
            "entry",
            "channel",
            "2024-07-15",
            "jantar",
            "pix",
            "2",
            "80",
        ])
        .assert()
        .success();

    let raw = fs::read_to_string(&store).unwrap();
    assert!(raw.contains("\"2024-07-15\""));
    assert!(raw.contains("\"auditLogs\""));
}
