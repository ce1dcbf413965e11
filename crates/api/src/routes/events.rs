use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Event journal routes mounted at `/events`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(events::list_events))
}
