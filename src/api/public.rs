//! Public report endpoint, readable from any origin.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::api::AppState;
use crate::core::range::{DateRange, parse_day};
use crate::core::report::{GeneralReport, general_report};
use crate::errors::AppResult;
use crate::models::settings::{AggregationConfig, app_name};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/report", get(get_public_report))
        .layer(CorsLayer::permissive())
}

/// `date=YYYY-MM-DD` for a single day, or `startDate` and `endDate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicReportQuery {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicReportResponse {
    pub app_name: String,
    #[serde(flatten)]
    pub report: GeneralReport,
}

/// GET /api/public/report
async fn get_public_report(
    State(state): State<AppState>,
    Query(q): Query<PublicReportQuery>,
) -> AppResult<Json<PublicReportResponse>> {
    let range = match q.date.as_deref() {
        Some(day) => DateRange::single(parse_day(day)?),
        None => DateRange::from_bounds(q.start_date.as_deref(), q.end_date.as_deref())?,
    };

    let (entries, settings) = state.snapshot(&range)?;
    let cfg = AggregationConfig::from_settings(&settings);

    Ok(Json(PublicReportResponse {
        app_name: app_name(&settings),
        report: general_report(&entries, &range, &cfg),
    }))
}
