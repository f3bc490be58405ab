//! Share codes and the stored tracks payload.
//!
//! A share row keeps its tracks as a single JSON-encoded string. The
//! helpers here turn a validated list into that string and back.

use serde_json::Value;

use crate::error::CoreError;

/// Column holding the encoded tracks list.
pub const TRACKS_COLUMN: &str = "tracks";

/// A share code as submitted by a client.
///
/// Lookups use the trimmed form; error messages echo the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareCode {
    submitted: String,
}

impl ShareCode {
    /// Parse the `code` value of a get request.
    ///
    /// The value must be a string that is non-empty after trimming.
    pub fn parse(value: Option<&Value>) -> Result<Self, CoreError> {
        match value {
            Some(Value::String(code)) if !code.trim().is_empty() => Ok(Self {
                submitted: code.clone(),
            }),
            _ => Err(CoreError::InvalidCode),
        }
    }

    /// The trimmed code, equal to the share's row id when it exists.
    pub fn lookup_id(&self) -> &str {
        self.submitted.trim()
    }

    pub fn not_found(&self) -> CoreError {
        CoreError::NotFound {
            code: self.submitted.clone(),
        }
    }
}

/// Encode a tracks list into the string stored in [`TRACKS_COLUMN`].
pub fn encode_tracks(tracks: &[Value]) -> Result<String, CoreError> {
    serde_json::to_string(tracks).map_err(|e| CoreError::Internal(e.to_string()))
}

/// Decode the stored payload of the share `share_id`.
///
/// The payload must be a string holding a JSON array. Anything else marks
/// the share as corrupted.
pub fn decode_tracks(share_id: &str, payload: Option<&Value>) -> Result<Vec<Value>, CoreError> {
    let corrupted = || CoreError::Corrupted {
        share_id: share_id.to_string(),
    };

    let Some(Value::String(encoded)) = payload else {
        return Err(corrupted());
    };

    serde_json::from_str::<Vec<Value>>(encoded).map_err(|_| corrupted())
}
