pub mod health;
pub mod shares;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /shares/create                                   create a share (POST)
/// /shares/get                                      redeem a share code (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/shares", shares::router())
}
