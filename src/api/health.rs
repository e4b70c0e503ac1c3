//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::api::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = state
        .store
        .lock()
        .map(|s| s.backend())
        .unwrap_or("unavailable");

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        storage,
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
