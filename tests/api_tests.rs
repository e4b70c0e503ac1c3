use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use caixa_tulsi::api::{AppState, create_router};
use caixa_tulsi::core::entry::{EntryLogic, LineItem};
use caixa_tulsi::core::range::parse_day;
use caixa_tulsi::core::settings::SettingsLogic;
use caixa_tulsi::db::SqliteStorage;
use caixa_tulsi::models::period::FaturadoCategory;
use caixa_tulsi::models::period_id::PeriodId;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Router over an in-memory database holding two lunch days and a billed item.
fn test_app() -> Router {
    let mut store = SqliteStorage::in_memory().unwrap();

    for (date, qty, value) in [("2024-07-15", 10, 250), ("2024-07-16", 5, 125)] {
        EntryLogic::set_channel(
            &mut store,
            parse_day(date).unwrap(),
            PeriodId::AlmocoPrimeiroTurno,
            None,
            "hospedes",
            qty,
            Some(Decimal::from(value)),
            "test",
        )
        .unwrap();
    }
    EntryLogic::add_faturado(
        &mut store,
        parse_day("2024-07-15").unwrap(),
        PeriodId::Jantar,
        None,
        &LineItem {
            client_name: "Setor Financeiro".into(),
            quantity: 2,
            value: Decimal::from(50),
            note: String::new(),
            category: FaturadoCategory::Employee,
        },
        "test",
    )
    .unwrap();
    SettingsLogic::set(&mut store, "appName", &json!("Tulsi Hotel"), "test").unwrap();

    create_router(AppState::new(Box::new(store)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "sqlite");
}

#[tokio::test]
async fn test_general_report_by_month() {
    let (status, body) = get(test_app(), "/api/reports/general?month=2024-07").await;

    assert_eq!(status, StatusCode::OK);
    let lunch = &body["summary"]["periodTotals"]["almocoPrimeiroTurno"];
    assert_eq!(lunch["qtd"], 15);
    assert_eq!(lunch["valor"].as_f64(), Some(375.0));
    assert_eq!(body["dailyBreakdown"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_general_report_by_bounds() {
    let (status, body) = get(
        test_app(),
        "/api/reports/general?startDate=2024-07-16&endDate=2024-07-31",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["daysWithEntries"], 1);
    assert_eq!(body["summary"]["grandTotalSemCI"]["valor"].as_f64(), Some(125.0));
}

#[tokio::test]
async fn test_invalid_queries_are_client_errors() {
    for uri in [
        "/api/reports/general?startDate=2024-07-01",
        "/api/reports/general?startDate=15-07-2024&endDate=2024-07-31",
        "/api/reports/general?month=2024-13",
        "/api/reports/general?startDate=2024-07-31&endDate=2024-07-01",
        "/api/reports/period?periodId=lanche&startDate=2024-07-01&endDate=2024-07-31",
        "/api/reports/period?startDate=2024-07-01&endDate=2024-07-31",
        "/api/public/report?date=amanha",
    ] {
        let (status, body) = get(test_app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].as_str().is_some(), "{uri}");
    }
}

#[tokio::test]
async fn test_period_and_person_reports() {
    let (status, body) = get(
        test_app(),
        "/api/reports/period?periodId=jantar&startDate=2024-07-01&endDate=2024-07-31",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["periodId"], "jantar");
    assert_eq!(body["summary"]["faturado"]["qtd"], 2);

    let (status, body) = get(
        test_app(),
        "/api/reports/person?startDate=2024-07-01&endDate=2024-07-31",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["faturado"][0]["clientName"], "Setor Financeiro");
    assert_eq!(body["faturado"][0]["totalQtd"], 2);
    assert_eq!(body["transactions"][0]["kind"], "faturado");
    assert_eq!(body["transactions"][0]["category"], "employee");
}

#[tokio::test]
async fn test_public_report_allows_any_origin() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/public/report?date=2024-07-15")
                .header(header::ORIGIN, "https://painel.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["appName"], "Tulsi Hotel");
    assert_eq!(body["startDate"], "2024-07-15");
    assert_eq!(body["endDate"], "2024-07-15");
    assert_eq!(body["summary"]["grandTotalComCI"]["valor"].as_f64(), Some(300.0));
}
