use caixa_tulsi::core::range::DateRange;
use caixa_tulsi::core::report::person::{TransactionKind, UNNAMED_CLIENT};
use caixa_tulsi::core::report::{PersonFilter, general_report, period_report, person_report};
use caixa_tulsi::models::period_id::PeriodId;
use caixa_tulsi::models::settings::{AggregationConfig, SummaryCategory};
use caixa_tulsi::models::totals::QtdValor;
use rust_decimal::Decimal;
use serde_json::json;

mod common;
use common::entry;

fn lunch(date: &str, qty: i64, value: i64) -> caixa_tulsi::models::entry::DailyLogEntry {
    entry(
        date,
        json!({
            "almocoPrimeiroTurno": {
                "channels": { "hospedes": { "quantity": qty, "totalValue": value } }
            }
        }),
    )
}

#[test]
fn test_general_report_sums_days_in_range() {
    let entries = vec![
        lunch("2024-07-16", 5, 125),
        lunch("2024-07-15", 10, 250),
        lunch("2024-08-01", 99, 9999),
    ];
    let range = DateRange::month("2024-07").unwrap();

    let report = general_report(&entries, &range, &AggregationConfig::default());

    assert_eq!(report.start_date, "2024-07-01");
    assert_eq!(report.end_date, "2024-07-31");
    let days: Vec<&str> = report.daily_breakdown.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(days, ["2024-07-15", "2024-07-16"]);

    let summary = &report.summary;
    assert_eq!(
        summary.period_totals[&SummaryCategory::AlmocoPrimeiroTurno],
        QtdValor::new(15, Decimal::from(375))
    );
    assert_eq!(summary.period_totals[&SummaryCategory::Jantar], QtdValor::ZERO);
    assert_eq!(summary.grand_total_com_ci.valor, Decimal::from(375));
    assert_eq!(summary.days_with_entries, 2);

    let as_json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        as_json["summary"]["periodTotals"]["almocoPrimeiroTurno"]["qtd"],
        json!(15)
    );
}

#[test]
fn test_general_report_of_empty_range() {
    let entries = vec![lunch("2024-07-15", 10, 250)];
    let range = DateRange::month("2024-06").unwrap();
    let report = general_report(&entries, &range, &AggregationConfig::default());

    assert!(report.daily_breakdown.is_empty());
    assert_eq!(report.summary.grand_total_sem_ci, QtdValor::ZERO);
    assert_eq!(report.summary.period_totals.len(), SummaryCategory::ALL.len());
}

#[test]
fn test_period_report_breaks_down_channels() {
    let entries = vec![
        entry(
            "2024-07-15",
            json!({ "jantar": {
                "channels": { "pix": { "quantity": 2, "totalValue": 80 } },
                "subTabs": { "varanda": { "channels": { "pix": { "quantity": 1, "totalValue": 40 } } } },
                "faturadoItems": [ { "clientName": "Diretoria", "quantity": 1, "value": 60 } ]
            } }),
        ),
        entry(
            "2024-07-16",
            json!({ "jantar": { "channels": { "pix": { "quantity": 3, "totalValue": 120 } } } }),
        ),
    ];
    let range = DateRange::parse("2024-07-15:2024-07-16").unwrap();

    let report = period_report(&entries, &range, PeriodId::Jantar, &AggregationConfig::default());

    assert_eq!(report.days.len(), 2);
    assert_eq!(report.days[0].lines["varanda/pix"], QtdValor::new(1, Decimal::from(40)));
    assert_eq!(report.days[0].total, QtdValor::new(4, Decimal::from(180)));
    assert_eq!(report.summary.lines["pix"], QtdValor::new(5, Decimal::from(200)));
    assert_eq!(report.summary.faturado, QtdValor::new(1, Decimal::from(60)));
    assert_eq!(report.summary.total, QtdValor::new(7, Decimal::from(300)));
}

#[test]
fn test_period_report_for_events_groups_by_location_and_service() {
    let entries = vec![entry(
        "2024-07-15",
        json!({ "eventos": { "items": [ { "eventName": "Casamento", "subEvents": [
            { "location": "on-site", "serviceType": "jantar", "quantity": 80, "totalValue": 8000 },
            { "location": "on-site", "serviceType": "jantar", "quantity": 10, "totalValue": 1000 }
        ] } ] } }),
    )];
    let range = DateRange::month("2024-07").unwrap();

    let report = period_report(&entries, &range, PeriodId::Eventos, &AggregationConfig::default());
    assert_eq!(
        report.summary.lines["on-site/jantar"],
        QtdValor::new(90, Decimal::from(9000))
    );
    assert_eq!(report.summary.total, QtdValor::new(90, Decimal::from(9000)));
}

#[test]
fn test_person_report_groups_exact_names() {
    let entries = vec![
        entry(
            "2024-07-15",
            json!({
                "almocoPrimeiroTurno": {
                    "faturadoItems": [ { "clientName": "Setor Financeiro", "quantity": 2, "value": 50 } ]
                },
                "jantar": {
                    "subTabs": { "varanda": {
                        "faturadoItems": [ { "clientName": "Setor Financeiro ", "quantity": 3, "value": 75 } ]
                    } },
                    "consumoInternoItems": [ { "clientName": "", "quantity": 1, "value": 10 } ]
                }
            }),
        ),
        entry(
            "2024-07-16",
            json!({
                "jantar": {
                    "faturadoItems": [ { "clientName": "setor financeiro", "quantity": 1, "value": 20 } ]
                }
            }),
        ),
    ];
    let range = DateRange::month("2024-07").unwrap();

    let report = person_report(&entries, &range, &PersonFilter::default());

    assert_eq!(report.faturado.len(), 2);
    let financeiro = report
        .faturado
        .iter()
        .find(|s| s.client_name == "Setor Financeiro")
        .unwrap();
    assert_eq!(financeiro.total_qtd, 5);
    assert_eq!(financeiro.total_value, Decimal::from(125));
    assert_eq!(financeiro.transactions, 2);

    assert_eq!(report.consumo_interno.len(), 1);
    assert_eq!(report.consumo_interno[0].client_name, UNNAMED_CLIENT);

    assert_eq!(report.transactions.len(), 4);
    let tabbed = report
        .transactions
        .iter()
        .find(|t| t.tab.is_some())
        .unwrap();
    assert_eq!(tabbed.tab.as_deref(), Some("varanda"));
    assert_eq!(tabbed.kind, TransactionKind::Faturado);

    let filtered = person_report(
        &entries,
        &range,
        &PersonFilter {
            client: Some("Setor Financeiro".into()),
        },
    );
    assert_eq!(filtered.transactions.len(), 2);
    assert!(filtered.consumo_interno.is_empty());
}
