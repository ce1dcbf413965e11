//! Handlers for asset lifecycle, classification and read-only views.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use custody_core::registry::{AssetDraft, ARCHIVED_MARKER, RESTRICTED_MARKER};
use custody_core::types::AssetId;
use custody_events::bus::{
    ASSET_ARCHIVED, ASSET_DESTROYED, ASSET_MARKERS_AUGMENTED, ASSET_MODIFIED, ASSET_REGISTERED,
    ASSET_RESTRICTED, ASSET_TRANSFERRED,
};
use custody_events::RegistryEvent;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::caller::{parse_target, Caller};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub successor: String,
}

#[derive(Debug, Deserialize)]
pub struct AugmentMarkersRequest {
    pub markers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuthenticityQuery {
    pub claimed_custodian: String,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/assets
pub async fn register_asset(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppJson(draft): AppJson<AssetDraft>,
) -> AppResult<impl IntoResponse> {
    let mut ledger = state.ledger.lock().await;
    let marker_count = draft.classification_markers.len();
    let (registration, ctx) = ledger.commit(caller, |reg, ctx| reg.register(ctx, draft))?;

    tracing::info!(
        asset_id = registration.asset_id,
        custodian = %registration.custodian,
        height = registration.height,
        "Asset registered",
    );
    state.publish(
        RegistryEvent::new(ASSET_REGISTERED, ctx.caller, ctx.height)
            .for_asset(registration.asset_id)
            .with_payload(json!({ "marker_count": marker_count })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: registration })))
}

/// GET /api/v1/assets/{id}
pub async fn get_asset(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath(id): AppPath<AssetId>,
) -> AppResult<impl IntoResponse> {
    let ledger = state.ledger.lock().await;
    let record = ledger.query(caller, |reg, ctx| reg.asset(ctx, id).cloned())?;

    Ok(Json(DataResponse { data: record }))
}

/// PUT /api/v1/assets/{id}
pub async fn modify_asset(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath(id): AppPath<AssetId>,
    AppJson(draft): AppJson<AssetDraft>,
) -> AppResult<impl IntoResponse> {
    let mut ledger = state.ledger.lock().await;
    let (receipt, ctx) = ledger.commit(caller, |reg, ctx| reg.modify(ctx, id, draft))?;

    tracing::info!(asset_id = id, caller = %ctx.caller, height = ctx.height, "Asset modified");
    state.publish(RegistryEvent::new(ASSET_MODIFIED, ctx.caller, ctx.height).for_asset(id));

    Ok(Json(DataResponse { data: receipt }))
}

/// DELETE /api/v1/assets/{id}
pub async fn destroy_asset(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath(id): AppPath<AssetId>,
) -> AppResult<impl IntoResponse> {
    let mut ledger = state.ledger.lock().await;
    let (receipt, ctx) = ledger.commit(caller, |reg, ctx| reg.destroy(ctx, id))?;

    tracing::info!(asset_id = id, caller = %ctx.caller, height = ctx.height, "Asset destroyed");
    state.publish(RegistryEvent::new(ASSET_DESTROYED, ctx.caller, ctx.height).for_asset(id));

    Ok(Json(DataResponse { data: receipt }))
}

/// POST /api/v1/assets/{id}/transfer
pub async fn transfer_asset(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath(id): AppPath<AssetId>,
    AppJson(input): AppJson<TransferRequest>,
) -> AppResult<impl IntoResponse> {
    let successor = parse_target(&input.successor)?;
    let mut ledger = state.ledger.lock().await;
    let (receipt, ctx) =
        ledger.commit(caller, |reg, ctx| reg.transfer_ownership(ctx, id, &successor))?;

    tracing::info!(
        asset_id = id,
        from = %ctx.caller,
        to = %successor,
        height = ctx.height,
        "Asset custody transferred",
    );
    state.publish(
        RegistryEvent::new(ASSET_TRANSFERRED, ctx.caller, ctx.height)
            .for_asset(id)
            .with_payload(json!({ "successor": successor })),
    );

    Ok(Json(DataResponse { data: receipt }))
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// POST /api/v1/assets/{id}/markers
pub async fn augment_markers(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath(id): AppPath<AssetId>,
    AppJson(input): AppJson<AugmentMarkersRequest>,
) -> AppResult<impl IntoResponse> {
    let mut ledger = state.ledger.lock().await;
    let added = input.markers.clone();
    let (receipt, ctx) =
        ledger.commit(caller, |reg, ctx| reg.augment_markers(ctx, id, input.markers))?;

    tracing::info!(asset_id = id, added = added.len(), height = ctx.height, "Markers augmented");
    state.publish(
        RegistryEvent::new(ASSET_MARKERS_AUGMENTED, ctx.caller, ctx.height)
            .for_asset(id)
            .with_payload(json!({ "markers": added })),
    );

    Ok(Json(DataResponse { data: receipt }))
}

/// POST /api/v1/assets/{id}/archive
pub async fn archive_asset(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath(id): AppPath<AssetId>,
) -> AppResult<impl IntoResponse> {
    let mut ledger = state.ledger.lock().await;
    let (receipt, ctx) = ledger.commit(caller, |reg, ctx| reg.archive(ctx, id))?;

    tracing::info!(asset_id = id, height = ctx.height, "Asset archived");
    state.publish(
        RegistryEvent::new(ASSET_ARCHIVED, ctx.caller, ctx.height)
            .for_asset(id)
            .with_payload(json!({ "marker": ARCHIVED_MARKER })),
    );

    Ok(Json(DataResponse { data: receipt }))
}

/// POST /api/v1/assets/{id}/restrict
pub async fn restrict_asset(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath(id): AppPath<AssetId>,
) -> AppResult<impl IntoResponse> {
    let mut ledger = state.ledger.lock().await;
    let (receipt, ctx) = ledger.commit(caller, |reg, ctx| reg.restrict(ctx, id))?;

    tracing::info!(asset_id = id, caller = %ctx.caller, height = ctx.height, "Asset restricted");
    state.publish(
        RegistryEvent::new(ASSET_RESTRICTED, ctx.caller, ctx.height)
            .for_asset(id)
            .with_payload(json!({ "marker": RESTRICTED_MARKER })),
    );

    Ok(Json(DataResponse { data: receipt }))
}

// ---------------------------------------------------------------------------
// Read-only views
// ---------------------------------------------------------------------------

/// GET /api/v1/assets/{id}/analytics
pub async fn get_analytics(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath(id): AppPath<AssetId>,
) -> AppResult<impl IntoResponse> {
    let ledger = state.ledger.lock().await;
    let view = ledger.query(caller, |reg, ctx| reg.analytics(ctx, id))?;

    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/assets/{id}/authenticity?claimed_custodian=...
pub async fn verify_authenticity(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppPath(id): AppPath<AssetId>,
    AppQuery(params): AppQuery<AuthenticityQuery>,
) -> AppResult<impl IntoResponse> {
    let claimed = parse_target(&params.claimed_custodian)?;
    let ledger = state.ledger.lock().await;
    let check = ledger.query(caller, |reg, ctx| reg.verify_authenticity(ctx, id, &claimed))?;

    Ok(Json(DataResponse { data: check }))
}
