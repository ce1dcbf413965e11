//! Handlers for registry-wide status and the executive's mode flags.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use custody_core::registry::RegistryStatus;
use custody_core::types::Height;
use custody_events::bus::{REGISTRY_ACTIVATION_CHANGED, REGISTRY_MAINTENANCE_CHANGED};
use custody_events::RegistryEvent;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::caller::Caller;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FlagRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub status: RegistryStatus,
    pub height: Height,
}

/// GET /api/v1/registry
pub async fn get_status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ledger = state.ledger.lock().await;
    let data = StatusResponse {
        status: ledger.registry().status(),
        height: ledger.height(),
    };

    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/registry/activation
pub async fn set_activation(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppJson(input): AppJson<FlagRequest>,
) -> AppResult<impl IntoResponse> {
    let mut ledger = state.ledger.lock().await;
    let (change, ctx) =
        ledger.commit(caller, |reg, ctx| reg.set_activation(ctx, input.enabled))?;

    tracing::info!(active = change.enabled, height = change.height, "Registry activation changed");
    state.publish(
        RegistryEvent::new(REGISTRY_ACTIVATION_CHANGED, ctx.caller, ctx.height)
            .with_payload(json!({ "enabled": change.enabled })),
    );

    Ok(Json(DataResponse { data: change }))
}

/// PUT /api/v1/registry/maintenance
pub async fn set_maintenance(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppJson(input): AppJson<FlagRequest>,
) -> AppResult<impl IntoResponse> {
    let mut ledger = state.ledger.lock().await;
    let (change, ctx) =
        ledger.commit(caller, |reg, ctx| reg.set_maintenance(ctx, input.enabled))?;

    tracing::info!(
        maintenance = change.enabled,
        height = change.height,
        "Registry maintenance mode changed",
    );
    state.publish(
        RegistryEvent::new(REGISTRY_MAINTENANCE_CHANGED, ctx.caller, ctx.height)
            .with_payload(json!({ "enabled": change.enabled })),
    );

    Ok(Json(DataResponse { data: change }))
}
