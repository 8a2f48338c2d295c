use thiserror::Error;

use super::machines::Transition;
use super::models::SubmissionStatus;
use crate::common::{AuthError, SubmissionId};

/// Request-scoped errors of the submission lifecycle.
///
/// Every variant is an expected, user-facing outcome except `Store`, which
/// wraps collaborator IO failures. Nothing here is fatal to the process;
/// retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Malformed input - a caller contract violation.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No valid actor could be resolved for the request credential.
    #[error("Authentication required")]
    Unauthenticated,

    /// The actor is known but not permitted to perform the transition.
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Submission not found: {0}")]
    NotFound(SubmissionId),

    /// The edge table has no entry for this (status, transition) pair.
    #[error("No `{transition}` transition from `{from}`")]
    InvalidTransition {
        from: SubmissionStatus,
        transition: Transition,
    },

    /// The conditional write lost against a concurrent transition. The
    /// caller should re-fetch and retry.
    #[error("Submission was modified by a concurrent request")]
    Conflict,

    /// Collaborator IO failure. Not retried here.
    #[error("Record store failure: {0}")]
    Store(#[source] anyhow::Error),
}

impl From<AuthError> for SubmissionError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationRequired | AuthError::InvalidToken => {
                SubmissionError::Unauthenticated
            }
            AuthError::AdminRequired => {
                SubmissionError::NotAuthorized("Admin access required".to_string())
            }
            AuthError::PermissionDenied(reason) => SubmissionError::NotAuthorized(reason),
            AuthError::InternalError(err) => SubmissionError::Store(err),
        }
    }
}
