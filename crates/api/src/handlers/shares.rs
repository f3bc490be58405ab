//! Handlers for creating and redeeming track shares.
//!
//! Both endpoints accept only POST with a JSON body. Shares are rows in a
//! single store table; the row id is the share code handed to users.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use trackshare_core::share::{decode_tracks, encode_tracks, ShareCode, TRACKS_COLUMN};
use trackshare_core::track::validate_tracks;
use trackshare_store::{Query, ID_ATTRIBUTE, UNIQUE_ID};

use super::{ensure_post, read_json_body};
use crate::error::AppResult;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Header carrying the caller's key for share lookups.
pub const FORWARDED_KEY_HEADER: &str = "x-appwrite-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedShare {
    pub id: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct SharedTracks {
    pub id: String,
    pub tracks: Vec<Value>,
}

/// POST /api/v1/shares/create
///
/// Validate `tracks` and store it as a new share using the server key.
pub async fn create_share(
    State(state): State<AppState>,
    method: Method,
    body: Body,
) -> AppResult<impl IntoResponse> {
    ensure_post(&method)?;

    let body = read_json_body(body).await?;
    let tracks = validate_tracks(body.get("tracks"))?;

    let mut data = Map::new();
    data.insert(
        TRACKS_COLUMN.to_string(),
        Value::String(encode_tracks(tracks)?),
    );

    let row = state
        .store
        .create_row(&state.config.store.api_key, UNIQUE_ID, data)
        .await?;

    tracing::info!(share_id = %row.id, track_count = tracks.len(), "Created share");

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new(CreatedShare {
            id: row.id,
            created_at: row.created_at,
        })),
    ))
}

/// POST /api/v1/shares/get
///
/// Look up a share by `code` with the caller's forwarded key and return its
/// tracks.
pub async fn get_share(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> AppResult<impl IntoResponse> {
    ensure_post(&method)?;

    let body = read_json_body(body).await?;
    let code = ShareCode::parse(body.get("code"))?;

    let api_key = headers
        .get(FORWARDED_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let mut list = state
        .store
        .list_rows(api_key, &[Query::equal(ID_ATTRIBUTE, code.lookup_id())])
        .await?;

    if list.rows.is_empty() {
        return Err(code.not_found().into());
    }
    let share = list.rows.swap_remove(0);

    let tracks = decode_tracks(&share.id, share.data.get(TRACKS_COLUMN))?;

    tracing::info!(share_id = %share.id, track_count = tracks.len(), "Fetched share");

    Ok(Json(SuccessResponse::new(SharedTracks {
        id: share.id,
        tracks,
    })))
}
