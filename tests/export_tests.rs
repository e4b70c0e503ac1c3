use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{caixa, init_db_with_data, setup_test_db, temp_out};

#[test]
fn test_export_csv_month() {
    let db_path = setup_test_db("export_csv_month");
    init_db_with_data(&db_path);
    let out = temp_out("export_csv_month", "csv");

    caixa()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2024-07",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines[0].starts_with("date,cafeDaManha_qtd,cafeDaManha_valor,almocoPrimeiroTurno_qtd"));
    assert!(lines[0].ends_with("grandTotalComCI_qtd,grandTotalComCI_valor"));
    assert!(lines[1].starts_with("2024-07-15,0,0.00,10,250.00"));
    assert!(lines[2].starts_with("2024-07-16,0,0.00,5,125.00"));
    assert!(lines[3].starts_with("TOTAL,0,0.00,15,375.00"));
    assert!(lines[3].ends_with(",15,375.00"));
}

#[test]
fn test_export_json_all() {
    let db_path = setup_test_db("export_json_all");
    init_db_with_data(&db_path);
    let out = temp_out("export_json_all", "json");

    caixa()
        .args(["--db", &db_path, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["startDate"], "2024-07-15");
    assert_eq!(report["endDate"], "2024-07-16");
    assert_eq!(report["dailyBreakdown"].as_array().unwrap().len(), 2);
    assert_eq!(report["summary"]["daysWithEntries"], 2);
}

#[test]
fn test_export_xlsx_creates_file() {
    let db_path = setup_test_db("export_xlsx");
    init_db_with_data(&db_path);
    let out = temp_out("export_xlsx", "xlsx");

    caixa()
        .args([
            "--db", &db_path, "export", "--format", "xlsx", "--file", &out, "--range", "2024",
        ])
        .assert()
        .success();

    let meta = fs::metadata(&out).unwrap();
    assert!(meta.len() > 0);
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    init_db_with_data(&db_path);
    let out = temp_out("export_empty", "csv");

    caixa()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2023",
        ])
        .assert()
        .success()
        .stdout(contains("No entries found"));

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    caixa()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_existing_file_needs_force() {
    let db_path = setup_test_db("export_force");
    init_db_with_data(&db_path);
    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").unwrap();

    caixa()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "old");

    caixa()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("date,"));
}
