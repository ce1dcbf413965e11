//! Handlers for the per-asset access matrix.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use custody_core::types::{AssetId, Principal};
use custody_events::bus::{ACCESS_GRANTED, ACCESS_REVOKED};
use custody_events::RegistryEvent;
use serde::Serialize;
use serde_json::json;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::middleware::caller::{parse_target, Caller};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AccessStatus {
    pub asset_id: AssetId,
    pub principal: Principal,
    pub granted: bool,
}

/// PUT /api/v1/assets/{id}/access/{principal}
pub async fn grant_access(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath((id, beneficiary)): AppPath<(AssetId, String)>,
) -> AppResult<impl IntoResponse> {
    let beneficiary = parse_target(&beneficiary)?;
    let mut ledger = state.ledger.lock().await;
    let (receipt, ctx) =
        ledger.commit(caller, |reg, ctx| reg.grant_access(ctx, id, &beneficiary))?;

    tracing::info!(asset_id = id, beneficiary = %beneficiary, height = ctx.height, "Access granted");
    state.publish(
        RegistryEvent::new(ACCESS_GRANTED, ctx.caller, ctx.height)
            .for_asset(id)
            .with_payload(json!({ "principal": beneficiary })),
    );

    Ok(Json(DataResponse { data: receipt }))
}

/// DELETE /api/v1/assets/{id}/access/{principal}
pub async fn revoke_access(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath((id, subject)): AppPath<(AssetId, String)>,
) -> AppResult<impl IntoResponse> {
    let subject = parse_target(&subject)?;
    let mut ledger = state.ledger.lock().await;
    let (receipt, ctx) = ledger.commit(caller, |reg, ctx| reg.revoke_access(ctx, id, &subject))?;

    tracing::info!(asset_id = id, subject = %subject, height = ctx.height, "Access revoked");
    state.publish(
        RegistryEvent::new(ACCESS_REVOKED, ctx.caller, ctx.height)
            .for_asset(id)
            .with_payload(json!({ "principal": subject })),
    );

    Ok(Json(DataResponse { data: receipt }))
}

/// GET /api/v1/assets/{id}/access/{principal}
pub async fn check_access(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath((id, principal)): AppPath<(AssetId, String)>,
) -> AppResult<impl IntoResponse> {
    let principal = parse_target(&principal)?;
    let ledger = state.ledger.lock().await;
    let granted = ledger.query(caller, |reg, ctx| reg.access_of(ctx, id, &principal))?;

    Ok(Json(DataResponse {
        data: AccessStatus {
            asset_id: id,
            principal,
            granted,
        },
    }))
}
