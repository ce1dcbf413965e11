pub mod assets;
pub mod events;
pub mod health;
pub mod registry;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /registry                           status, mode flags
/// /assets                             register
/// /assets/{id}                        read, modify, destroy
/// /assets/{id}/...                    transfer, markers, archive, restrict,
///                                     analytics, authenticity, access
/// /events                             recent committed transitions
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/registry", registry::router())
        .nest("/assets", assets::router())
        .nest("/events", events::router())
}
