//! JSON HTTP API over the report generators.
//!
//! - `GET /health`
//! - `GET /api/reports/{general,period,person}`
//! - `GET /api/public/report` (cross-origin allowed)

pub mod error;
pub mod health;
pub mod public;
pub mod reports;

use crate::config::Config;
use crate::core::range::DateRange;
use crate::db::Storage;
use crate::errors::{AppError, AppResult};
use crate::models::entry::DailyLogEntry;
use axum::Router;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Box<dyn Storage>>>,
}

impl AppState {
    pub fn new(store: Box<dyn Storage>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Entries of `range` and the current settings. The lock is released
    /// before any aggregation runs.
    pub fn snapshot(
        &self,
        range: &DateRange,
    ) -> AppResult<(Vec<DailyLogEntry>, BTreeMap<String, Value>)> {
        let store = self
            .store
            .lock()
            .map_err(|_| AppError::StorageUnavailable("storage lock poisoned".into()))?;
        Ok((store.get_all_entries(Some(range))?, store.all_settings()?))
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .nest("/api/reports", reports::routes())
        .nest("/api/public", public::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the API until the process is stopped.
pub fn serve(cfg: &Config, store: Box<dyn Storage>) -> AppResult<()> {
    let addr = format!("{}:{}", cfg.server_host, cfg.server_port);
    let app = create_router(AppState::new(store));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(&addr).await?;
        info!("Server listening on {}", addr);
        axum::serve(listener, app).await?;
        Ok::<(), AppError>(())
    })
}
