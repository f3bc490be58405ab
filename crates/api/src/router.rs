//! HTTP surface of the share service.
//!
//! The binary and the integration tests both go through [`build_app_router`],
//! so tests see the same layers a deployed server does.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::handlers::shares::FORWARDED_KEY_HEADER;
use crate::routes;
use crate::state::AppState;

/// Assemble `/health` and the `/api/v1` share routes behind the service layers.
///
/// Outermost first, a request passes CORS, gets an `x-request-id`, is traced,
/// and reaches the handler inside a panic guard. The id is copied back onto
/// the response.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = cors_layer(config);
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// CORS for browser clients of the configured origins.
///
/// Browsers redeeming a share send the forwarded key header, so it is allowed
/// alongside the usual content headers. Panics on an unparseable origin.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static(FORWARDED_KEY_HEADER),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
