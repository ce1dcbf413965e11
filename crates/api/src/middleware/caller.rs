//! Caller identity extractor.
//!
//! Signature checking happens upstream of this service; by the time a
//! request arrives the `x-principal` header is trusted as-is.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use custody_core::types::Principal;

use crate::error::AppError;

/// Header carrying the authenticated principal.
pub const PRINCIPAL_HEADER: &str = "x-principal";

/// Longest principal accepted from the header, in bytes.
pub const MAX_PRINCIPAL_LEN: usize = 128;

/// Authenticated caller extracted from the `x-principal` header.
///
/// ```ignore
/// async fn my_handler(Caller(caller): Caller) -> AppResult<Json<()>> {
///     tracing::info!(caller = %caller, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Caller(pub Principal);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(PRINCIPAL_HEADER)
            .ok_or_else(|| AppError::Unauthenticated(format!("Missing {PRINCIPAL_HEADER} header")))?
            .to_str()
            .map_err(|_| {
                AppError::Unauthenticated(format!("{PRINCIPAL_HEADER} header is not valid ASCII"))
            })?;

        parse_principal(raw).map(Caller)
    }
}

/// Trim and bound-check a principal taken from a header or path segment.
pub fn parse_principal(raw: &str) -> Result<Principal, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Unauthenticated("Principal must not be empty".into()));
    }
    if trimmed.len() > MAX_PRINCIPAL_LEN {
        return Err(AppError::Unauthenticated(format!(
            "Principal must be at most {MAX_PRINCIPAL_LEN} bytes"
        )));
    }
    Ok(Principal::new(trimmed))
}

/// Parse a principal named as an operation target (path segment, body field
/// or query parameter). Same rules as the caller header, reported as a bad
/// request.
pub fn parse_target(raw: &str) -> Result<Principal, AppError> {
    parse_principal(raw).map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid principal {raw:?}: must be 1-{MAX_PRINCIPAL_LEN} bytes after trimming"
        ))
    })
}
