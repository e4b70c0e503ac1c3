//! Report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::core::range::DateRange;
use crate::core::report::{
    GeneralReport, PeriodReport, PersonFilter, PersonReport, general_report, period_report,
    person_report,
};
use crate::errors::AppResult;
use crate::models::period_id::PeriodId;
use crate::models::settings::AggregationConfig;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/general", get(get_general))
        .route("/period", get(get_period))
        .route("/person", get(get_person))
}

/// Either `month=YYYY-MM` or both `startDate` and `endDate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub period_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub client: Option<String>,
}

/// GET /api/reports/general
async fn get_general(
    State(state): State<AppState>,
    Query(q): Query<GeneralQuery>,
) -> AppResult<Json<GeneralReport>> {
    let range = match q.month.as_deref() {
        Some(month) => DateRange::month(month)?,
        None => DateRange::from_bounds(q.start_date.as_deref(), q.end_date.as_deref())?,
    };

    let (entries, settings) = state.snapshot(&range)?;
    let cfg = AggregationConfig::from_settings(&settings);
    Ok(Json(general_report(&entries, &range, &cfg)))
}

/// GET /api/reports/period
async fn get_period(
    State(state): State<AppState>,
    Query(q): Query<PeriodQuery>,
) -> AppResult<Json<PeriodReport>> {
    let period: PeriodId = q.period_id.as_deref().unwrap_or_default().parse()?;
    let range = DateRange::from_bounds(q.start_date.as_deref(), q.end_date.as_deref())?;

    let (entries, settings) = state.snapshot(&range)?;
    let cfg = AggregationConfig::from_settings(&settings);
    Ok(Json(period_report(&entries, &range, period, &cfg)))
}

/// GET /api/reports/person
async fn get_person(
    State(state): State<AppState>,
    Query(q): Query<PersonQuery>,
) -> AppResult<Json<PersonReport>> {
    let range = DateRange::from_bounds(q.start_date.as_deref(), q.end_date.as_deref())?;
    let filter = PersonFilter {
        client: q.client.filter(|c| !c.trim().is_empty()),
    };

    let (entries, _) = state.snapshot(&range)?;
    Ok(Json(person_report(&entries, &range, &filter)))
}
