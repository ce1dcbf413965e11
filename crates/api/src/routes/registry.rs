//! Route definitions for registry-wide status and mode flags.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::registry;
use crate::state::AppState;

/// Registry routes mounted at `/registry`.
///
/// ```text
/// GET    /              -> get_status
/// PUT    /activation    -> set_activation (executive only)
/// PUT    /maintenance   -> set_maintenance (executive only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(registry::get_status))
        .route("/activation", put(registry::set_activation))
        .route("/maintenance", put(registry::set_maintenance))
}
