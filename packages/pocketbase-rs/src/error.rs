use thiserror::Error;

/// Errors returned by the PocketBase client.
#[derive(Debug, Error)]
pub enum PocketBaseError {
    /// The API returned a non-success status code.
    #[error("PocketBase API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// No record matched the requested id or filter.
    #[error("record not found")]
    NotFound,

    /// A write violated a unique index (PocketBase reports these as
    /// 400 validation_not_unique on the offending field).
    #[error("unique constraint violated on field `{field}`")]
    NotUnique { field: String },

    /// The auth token was rejected.
    #[error("invalid or expired auth token")]
    Unauthorized,

    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("failed to decode PocketBase response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PocketBaseError>;
