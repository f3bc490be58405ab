use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use trackshare_core::error::CoreError;
use trackshare_core::track::TrackError;
use trackshare_store::StoreError;

pub const UNAUTHORIZED_MESSAGE: &str = "Invalid API credentials";
pub const FORBIDDEN_MESSAGE: &str = "Insufficient permissions to access this resource";
pub const INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for failed store
/// calls. Implements [`IntoResponse`] to produce the `{ error, message }`
/// JSON body. Server-side failures are logged here; client errors are not.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `trackshare_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed call to the share table.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The handler only answers POST.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request body could not be received.
    #[error("Failed to read request body: {0}")]
    BodyRead(axum::Error),
}

impl From<TrackError> for AppError {
    fn from(err: TrackError) -> Self {
        AppError::Core(CoreError::Validation(err))
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, None),
            AppError::BodyRead(_) => (
                StatusCode::BAD_REQUEST,
                Some("Request body could not be read".to_string()),
            ),

            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(_) | CoreError::InvalidCode => {
                    (StatusCode::BAD_REQUEST, Some(core.to_string()))
                }
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, Some(core.to_string())),
                CoreError::Corrupted { share_id } => {
                    tracing::error!(%share_id, "Failed to parse tracks for share");
                    (StatusCode::INTERNAL_SERVER_ERROR, Some(core.to_string()))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Some(INTERNAL_MESSAGE.to_string()),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),
        };

        let body = ErrorBody {
            error: status.canonical_reason().unwrap_or("Internal Server Error"),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error by its reported code.
///
/// - 401 maps to 401 with a fixed credentials message.
/// - 403 maps to 403 with a fixed permissions message.
/// - Everything else maps to 500 with a generic message.
fn classify_store_error(err: &StoreError) -> (StatusCode, Option<String>) {
    match err.code() {
        Some(401) => {
            tracing::error!(error = %err, "Auth error");
            (StatusCode::UNAUTHORIZED, Some(UNAUTHORIZED_MESSAGE.to_string()))
        }
        Some(403) => {
            tracing::error!(error = %err, "Permission error");
            (StatusCode::FORBIDDEN, Some(FORBIDDEN_MESSAGE.to_string()))
        }
        _ => {
            tracing::error!(error = %err, "Unhandled database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(INTERNAL_MESSAGE.to_string()),
            )
        }
    }
}
