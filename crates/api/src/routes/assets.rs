//! Route definitions for assets and their access grants.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{access, assets};
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// POST   /                          -> register_asset
/// GET    /{id}                      -> get_asset
/// PUT    /{id}                      -> modify_asset
/// DELETE /{id}                      -> destroy_asset
/// POST   /{id}/transfer             -> transfer_asset
/// POST   /{id}/markers              -> augment_markers
/// POST   /{id}/archive              -> archive_asset
/// POST   /{id}/restrict             -> restrict_asset
/// GET    /{id}/analytics            -> get_analytics
/// GET    /{id}/authenticity         -> verify_authenticity
/// GET    /{id}/access/{principal}   -> check_access
/// PUT    /{id}/access/{principal}   -> grant_access
/// DELETE /{id}/access/{principal}   -> revoke_access
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(assets::register_asset))
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::modify_asset)
                .delete(assets::destroy_asset),
        )
        .route("/{id}/transfer", post(assets::transfer_asset))
        .route("/{id}/markers", post(assets::augment_markers))
        .route("/{id}/archive", post(assets::archive_asset))
        .route("/{id}/restrict", post(assets::restrict_asset))
        .route("/{id}/analytics", get(assets::get_analytics))
        .route("/{id}/authenticity", get(assets::verify_authenticity))
        .route(
            "/{id}/access/{principal}",
            get(access::check_access)
                .put(access::grant_access)
                .delete(access::revoke_access),
        )
}
