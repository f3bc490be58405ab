use crate::track::TrackError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] TrackError),

    #[error("Missing or invalid required parameter: code")]
    InvalidCode,

    /// `code` is the value exactly as the client submitted it.
    #[error("Share with code '{code}' does not exist")]
    NotFound { code: String },

    #[error("Share data is corrupted")]
    Corrupted { share_id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
