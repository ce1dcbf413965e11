use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use custody_core::error::RegistryError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`RegistryError`] for registry rejections and adds HTTP-specific
/// variants. Renders as `{ "error": message, "code": CODE }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A rejection from the registry state machine.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The request did not carry a usable caller identity.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// HTTP status for each registry rejection kind.
fn registry_status(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::MissingEntry(_) => StatusCode::NOT_FOUND,
        RegistryError::OwnershipMismatch(_)
        | RegistryError::PrivilegeViolation(_)
        | RegistryError::AuthorizationRequired(_)
        | RegistryError::AccessDenied(_) => StatusCode::FORBIDDEN,
        RegistryError::DescriptorInvalid(_)
        | RegistryError::CapacityExceeded(_)
        | RegistryError::ClassificationRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RegistryError::DuplicateRegistration(_) => StatusCode::CONFLICT,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Registry(err) => (registry_status(err), err.code(), err.to_string()),
            AppError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
