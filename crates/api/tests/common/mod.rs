#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{Map, Value};
use tower::ServiceExt;

use trackshare_api::config::{ServerConfig, StoreConfig};
use trackshare_api::router::build_app_router;
use trackshare_api::state::AppState;
use trackshare_store::{Query, Row, RowList, RowStore, StoreError};

pub const SERVER_KEY: &str = "server-key";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        store: StoreConfig {
            endpoint: "http://appwrite.test/v1".to_string(),
            project_id: "test-project".to_string(),
            database_id: "test-db".to_string(),
            shares_table: "shares".to_string(),
            api_key: SERVER_KEY.to_string(),
        },
    }
}

/// Build the full application router over the given store, using the same
/// middleware stack as production.
pub fn build_test_app(store: Arc<dyn RowStore>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        store,
    };
    build_app_router(state, &config)
}

/// Send a request with an optional raw body and forwarded key.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
    key: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    if let Some(key) = key {
        builder = builder.header("x-appwrite-key", key);
    }
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// POST a JSON value.
pub async fn post_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(&json.to_string()), None).await
}

/// POST a JSON value with a forwarded key.
pub async fn post_json_with_key(app: Router, uri: &str, json: Value, key: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(&json.to_string()), Some(key)).await
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A store that fails every call with a fixed error code and counts calls.
pub struct FailingStore {
    code: Option<u16>,
    calls: AtomicUsize,
}

impl FailingStore {
    /// Fail with a store-reported code.
    pub fn with_code(code: u16) -> Self {
        Self {
            code: Some(code),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail without any reported code.
    pub fn without_code() -> Self {
        Self {
            code: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> StoreError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.code {
            Some(code) => StoreError::Api {
                code,
                kind: None,
                message: format!("store failed with {code}"),
            },
            None => StoreError::Decode("garbled response".into()),
        }
    }
}

#[async_trait]
impl RowStore for FailingStore {
    async fn create_row(
        &self,
        _api_key: &str,
        _row_id: &str,
        _data: Map<String, Value>,
    ) -> Result<Row, StoreError> {
        Err(self.fail())
    }

    async fn list_rows(&self, _api_key: &str, _queries: &[Query]) -> Result<RowList, StoreError> {
        Err(self.fail())
    }
}
