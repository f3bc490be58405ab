pub mod shares;

use axum::body::Body;
use axum::http::Method;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Reject anything but POST.
pub fn ensure_post(method: &Method) -> AppResult<()> {
    if *method == Method::POST {
        Ok(())
    } else {
        Err(AppError::MethodNotAllowed)
    }
}

/// Buffer the whole request body and parse it as JSON.
///
/// No size limit applies. An empty or malformed body reads as `{}`.
pub async fn read_json_body(body: Body) -> AppResult<Value> {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(AppError::BodyRead)?;

    Ok(serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(Map::new())))
}
