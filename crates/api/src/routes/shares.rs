use axum::extract::DefaultBodyLimit;
use axum::routing::any;
use axum::Router;

use crate::handlers::shares;
use crate::state::AppState;

/// Share routes, mounted at `/shares`.
///
/// Registered for every method so the handlers answer non-POST requests
/// with their own JSON 405 body. Share bodies are unbounded in size.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", any(shares::create_share))
        .route("/get", any(shares::get_share))
        .layer(DefaultBodyLimit::disable())
}
