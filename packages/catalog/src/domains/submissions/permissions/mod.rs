//! Transition authorization rules
//!
//! Pure decision logic - no IO, no store lookups. Rules are evaluated in
//! precedence order, first match wins:
//!
//! 1. Admins may perform any transition.
//! 2. Anyone, including anonymous visitors, may create a submission - as
//!    long as it starts life as a plain pending record (no forged status,
//!    no forged approval).
//! 3. The original author may resubmit their own rejected submission.
//! 4. Everything else is denied.
//!
//! This mirrors a two-tier moderation model: self-service submission,
//! centralized review.

use super::errors::SubmissionError;
use super::machines::Transition;
use super::models::{Submission, SubmissionDraft, SubmissionStatus};
use crate::common::Actor;

/// Authorize a transition against an existing submission.
///
/// Never panics for well-formed input; a missing actor id on anything but
/// `create` is a caller contract violation and reported as an invalid
/// request rather than a denial.
pub fn evaluate(
    actor: &Actor,
    current: &Submission,
    transition: Transition,
) -> Result<(), SubmissionError> {
    if actor.is_admin() {
        return Ok(());
    }

    // Only creation is open to anonymous callers.
    let Some(actor_id) = actor.id() else {
        return Err(SubmissionError::InvalidRequest(format!(
            "`{transition}` requires an authenticated actor"
        )));
    };

    if transition == Transition::Resubmit
        && current.status == SubmissionStatus::Rejected
        && current.created_by == Some(actor_id)
    {
        return Ok(());
    }

    Err(SubmissionError::NotAuthorized(format!(
        "not permitted to `{transition}` this submission"
    )))
}

/// Authorize the creation of a new submission from a client draft.
pub fn evaluate_create(actor: &Actor, draft: &SubmissionDraft) -> Result<(), SubmissionError> {
    if actor.is_admin() {
        return Ok(());
    }

    // Creation never accepts a client-supplied approval.
    if draft.approved_by.is_some() {
        return Err(SubmissionError::NotAuthorized(
            "a new submission cannot carry an approval".to_string(),
        ));
    }

    match draft.status {
        None | Some(SubmissionStatus::Pending) => Ok(()),
        Some(other) => Err(SubmissionError::NotAuthorized(format!(
            "a new submission must start as pending, not `{other}`"
        ))),
    }
}
