//! Shared response envelope for successful API calls.
//!
//! Every 2xx body has the shape `{ "success": true, "data": ... }`.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok((StatusCode::CREATED, Json(SuccessResponse::new(created))))
/// ```
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
