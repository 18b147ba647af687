use axum::{extract::State, Json};
use navmenu_shared::StorageBackend;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    service: String,
    storage: StorageBackend,
    version: &'static str,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        service: state.service_name.to_string(),
        storage: state.storage,
        version: env!("CARGO_PKG_VERSION"),
    })
}
