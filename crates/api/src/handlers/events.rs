//! Handlers for the recent-events journal.
//!
//! Events are filtered through the registry's read gate: a caller sees an
//! asset's events only while it may read that asset. Registry-wide events
//! (mode flag changes) are visible to every authenticated caller.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use custody_core::types::AssetId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::middleware::caller::Caller;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of events returned when no `limit` is given.
const DEFAULT_LIMIT: usize = 50;

/// Upper bound on `limit`.
const MAX_LIMIT: usize = 500;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub limit: Option<usize>,
    pub asset_id: Option<AssetId>,
}

/// GET /api/v1/events
///
/// Newest first. With `asset_id`, the caller must pass the read gate on that
/// asset (403/404 otherwise).
pub async fn list_events(
    Caller(caller): Caller,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<EventsQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let ledger = state.ledger.lock().await;

    let events = match params.asset_id {
        Some(asset_id) => {
            ledger.query(caller, |reg, ctx| reg.asset(ctx, asset_id).map(|_| ()))?;
            state.journal.for_asset(asset_id, limit).await
        }
        None => {
            let registry = ledger.registry();
            state
                .journal
                .recent_where(limit, |e| match e.asset_id {
                    Some(id) => registry.can_read(id, &caller),
                    None => true,
                })
                .await
        }
    };

    Ok(Json(DataResponse { data: events }))
}
