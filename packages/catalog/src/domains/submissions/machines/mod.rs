//! Submission lifecycle state machine
//!
//! Pure decision logic - NO IO, only state transitions. The machine owns
//! the edge table, delegates authorization to `permissions`, and computes
//! the successor record plus the invalidation request the orchestrating
//! action hands to the view-cache effect after the store write lands.
//!
//! Lifecycle edges:
//!
//! ```text
//!   create:   (new)    -> pending
//!   approve:  pending  -> approved
//!   reject:   pending  -> rejected
//!   publish:  approved -> added_to_collection (terminal)
//!   revert:   approved -> pending
//!   resubmit: rejected -> pending (owner or admin)
//! ```

use serde::{Deserialize, Serialize};

use super::errors::SubmissionError;
use super::models::{Submission, SubmissionDraft, SubmissionStatus};
use super::permissions;
use crate::common::{Actor, SubmissionId};

/// A named, requested change of a submission's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Create,
    Approve,
    Reject,
    Publish,
    Revert,
    Resubmit,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Create => write!(f, "create"),
            Transition::Approve => write!(f, "approve"),
            Transition::Reject => write!(f, "reject"),
            Transition::Publish => write!(f, "publish"),
            Transition::Revert => write!(f, "revert"),
            Transition::Resubmit => write!(f, "resubmit"),
        }
    }
}

/// Target status for an accepted edge, `None` when no edge exists.
///
/// `Create` has no source state and is handled by [`admit`].
pub fn edge(from: SubmissionStatus, transition: Transition) -> Option<SubmissionStatus> {
    use SubmissionStatus::*;
    use Transition::*;

    match (from, transition) {
        (Pending, Approve) => Some(Approved),
        (Pending, Reject) => Some(Rejected),
        (Approved, Publish) => Some(AddedToCollection),
        (Approved, Revert) => Some(Pending),
        (Rejected, Resubmit) => Some(Pending),
        _ => None,
    }
}

/// What a committed transition must invalidate. Consumed by
/// `effects::invalidation` only after the store confirms the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationRequest {
    pub transition: Transition,
    pub submission_id: SubmissionId,
    pub name: String,
}

/// Result of a successfully decided transition. Nothing has been persisted
/// yet; the orchestrating action owns the store write.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub submission: Submission,
    pub previous_status: SubmissionStatus,
    pub invalidation: InvalidationRequest,
}

/// Decide a transition against the current record.
///
/// Order matters: the edge lookup runs before authorization, so an
/// impossible move reports `InvalidTransition` even to an actor who could
/// never have performed it. Failures leave the input untouched.
pub fn apply(
    current: &Submission,
    transition: Transition,
    actor: &Actor,
) -> Result<TransitionOutcome, SubmissionError> {
    if transition == Transition::Create {
        return Err(SubmissionError::InvalidRequest(
            "`create` does not apply to an existing submission".to_string(),
        ));
    }

    let target = edge(current.status, transition).ok_or(SubmissionError::InvalidTransition {
        from: current.status,
        transition,
    })?;

    permissions::evaluate(actor, current, transition)?;

    let mut next = current.clone();
    next.status = target;
    if transition == Transition::Approve {
        next.approved_by = actor.id();
    }

    Ok(TransitionOutcome {
        invalidation: InvalidationRequest {
            transition,
            submission_id: next.id,
            name: next.name.clone(),
        },
        previous_status: current.status,
        submission: next,
    })
}

/// Decide the creation of a new submission from a client draft.
///
/// The only entry into the lifecycle: every admitted record starts in
/// `pending`, carries the requesting actor as its creator, and never an
/// approval.
pub fn admit(draft: &SubmissionDraft, actor: &Actor) -> Result<Submission, SubmissionError> {
    permissions::evaluate_create(actor, draft)?;

    Ok(Submission::new_pending(
        draft.name.clone(),
        actor.id(),
        draft.extras.clone(),
    ))
}
