use axum::extract::State;
use axum::{routing::get, Json, Router};
use custody_core::types::Height;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Current ledger height.
    pub height: Height,
    /// Whether the registry is accepting registrations.
    pub accepting_registrations: bool,
}

/// GET /health -- returns service status and ledger height.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ledger = state.ledger.lock().await;
    let status = ledger.registry().status();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        height: ledger.height(),
        accepting_registrations: status.active && !status.maintenance,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
