//! Submission actions
//!
//! Entry-point actions are called directly by the presentation layer.
//! Each one is atomic from the caller's perspective: resolve the actor,
//! run the pure lifecycle decision, persist through the record store,
//! then bust derived views and notify the creator.
//!
//! The store write is conditional on the status read in step two
//! (compare-and-set), so two moderators racing on the same record cannot
//! silently overwrite each other - the loser gets `Conflict` and retries
//! at a higher layer.

use anyhow::anyhow;
use tracing::info;

use super::effects::{invalidation, notify};
use super::errors::SubmissionError;
use super::machines::{self, Transition};
use super::models::{Submission, SubmissionDraft, SubmissionPatch};
use crate::common::SubmissionId;
use crate::kernel::{CatalogDeps, StoreError};

/// A side effect that failed after the record write landed. The record is
/// correct; the named concern is stale or undelivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedOp {
    /// One or more view tags were not busted; derived views may serve the
    /// previous state until their next refresh.
    Invalidation { tags: Vec<String> },
    /// The creator was not told about the status change.
    Notification,
}

/// Result of a successful write, with any degraded side effects attached.
#[derive(Debug)]
pub struct TransitionReceipt {
    pub submission: Submission,
    pub warnings: Vec<DegradedOp>,
}

// ============================================================================
// Entry Point: Create Submission
// ============================================================================

/// Create a new pending submission from a client draft.
///
/// Open to anonymous callers; the draft must not carry a forged status or
/// approval. A display-name collision is a creation-time invalid request.
pub async fn create_submission(
    credential: Option<&str>,
    draft: SubmissionDraft,
    deps: &CatalogDeps,
) -> Result<TransitionReceipt, SubmissionError> {
    let actor = deps.auth.resolve(credential).await?;

    if draft.name.trim().is_empty() {
        return Err(SubmissionError::InvalidRequest(
            "submission name is required".to_string(),
        ));
    }

    let submission = machines::admit(&draft, &actor)?;

    info!(
        submission_id = %submission.id,
        name = %submission.name,
        anonymous = actor.is_anonymous(),
        "Creating submission"
    );

    let stored = deps
        .store
        .insert(&submission)
        .await
        .map_err(insert_error)?;

    let tags = vec![
        invalidation::GALLERY_TAG.to_string(),
        invalidation::record_tag(stored.id),
        invalidation::page_tag(&stored.name),
    ];
    let failed = invalidation::bust_views(deps.view_cache.as_ref(), tags).await;

    let mut warnings = Vec::new();
    if !failed.is_empty() {
        warnings.push(DegradedOp::Invalidation { tags: failed });
    }

    Ok(TransitionReceipt {
        submission: stored,
        warnings,
    })
}

// ============================================================================
// Entry Point: Request Transition
// ============================================================================

/// Move a submission along one lifecycle edge.
///
/// `patch` applies field updates (name, extras) alongside the transition;
/// those are not gated beyond the transition itself.
pub async fn request_transition(
    credential: Option<&str>,
    submission_id: SubmissionId,
    transition: Transition,
    patch: Option<SubmissionPatch>,
    deps: &CatalogDeps,
) -> Result<TransitionReceipt, SubmissionError> {
    let actor = deps.auth.resolve(credential).await?;

    let current = deps
        .store
        .get(submission_id)
        .await
        .map_err(|err| fetch_error(submission_id, err))?
        .ok_or(SubmissionError::NotFound(submission_id))?;

    let mut outcome = machines::apply(&current, transition, &actor)?;

    let mut renamed_from = None;
    if let Some(patch) = patch {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(SubmissionError::InvalidRequest(
                    "submission name is required".to_string(),
                ));
            }
            if name != outcome.submission.name {
                renamed_from = Some(outcome.submission.name.clone());
                outcome.invalidation.name = name.clone();
                outcome.submission.name = name;
            }
        }
        if let Some(extras) = patch.extras {
            outcome.submission.extras = extras;
        }
    }

    info!(
        submission_id = %submission_id,
        transition = %transition,
        from = %outcome.previous_status,
        to = %outcome.submission.status,
        "Applying submission transition"
    );

    let stored = deps
        .store
        .update_if_status(outcome.previous_status, &outcome.submission)
        .await
        .map_err(write_error)?;

    let mut warnings = Vec::new();

    let tags = invalidation::tags_for(&outcome.invalidation, renamed_from.as_deref());
    let failed = invalidation::bust_views(deps.view_cache.as_ref(), tags).await;
    if !failed.is_empty() {
        warnings.push(DegradedOp::Invalidation { tags: failed });
    }

    if !notify::creator_status_changed(
        deps.notifier.as_ref(),
        &stored,
        outcome.previous_status,
    )
    .await
    {
        warnings.push(DegradedOp::Notification);
    }

    Ok(TransitionReceipt {
        submission: stored,
        warnings,
    })
}

// ============================================================================
// Named operations
// ============================================================================

/// Approve a pending submission.
pub async fn approve_submission(
    credential: Option<&str>,
    submission_id: SubmissionId,
    deps: &CatalogDeps,
) -> Result<TransitionReceipt, SubmissionError> {
    request_transition(credential, submission_id, Transition::Approve, None, deps).await
}

/// Reject a pending submission.
pub async fn reject_submission(
    credential: Option<&str>,
    submission_id: SubmissionId,
    deps: &CatalogDeps,
) -> Result<TransitionReceipt, SubmissionError> {
    request_transition(credential, submission_id, Transition::Reject, None, deps).await
}

/// Fold an approved submission into the icon collection.
pub async fn publish_submission(
    credential: Option<&str>,
    submission_id: SubmissionId,
    deps: &CatalogDeps,
) -> Result<TransitionReceipt, SubmissionError> {
    request_transition(credential, submission_id, Transition::Publish, None, deps).await
}

/// Send an approved submission back to the review queue.
pub async fn revert_submission(
    credential: Option<&str>,
    submission_id: SubmissionId,
    deps: &CatalogDeps,
) -> Result<TransitionReceipt, SubmissionError> {
    request_transition(credential, submission_id, Transition::Revert, None, deps).await
}

/// Resubmit a rejected submission, optionally with fixed fields.
pub async fn resubmit_submission(
    credential: Option<&str>,
    submission_id: SubmissionId,
    patch: Option<SubmissionPatch>,
    deps: &CatalogDeps,
) -> Result<TransitionReceipt, SubmissionError> {
    request_transition(credential, submission_id, Transition::Resubmit, patch, deps).await
}

// ============================================================================
// Store error mapping
// ============================================================================

fn fetch_error(id: SubmissionId, err: StoreError) -> SubmissionError {
    match err {
        StoreError::NotFound => SubmissionError::NotFound(id),
        StoreError::Io(err) => SubmissionError::Store(err),
        other => SubmissionError::Store(anyhow!(other)),
    }
}

fn insert_error(err: StoreError) -> SubmissionError {
    match err {
        StoreError::NameTaken(name) => {
            SubmissionError::InvalidRequest(format!("name `{name}` is already taken"))
        }
        StoreError::Io(err) => SubmissionError::Store(err),
        other => SubmissionError::Store(anyhow!(other)),
    }
}

fn write_error(err: StoreError) -> SubmissionError {
    match err {
        // The record moved (or vanished) between our read and the
        // conditional write - either way the pre-image is gone.
        StoreError::Conflict | StoreError::NotFound => SubmissionError::Conflict,
        StoreError::NameTaken(name) => {
            SubmissionError::InvalidRequest(format!("name `{name}` is already taken"))
        }
        StoreError::Io(err) => SubmissionError::Store(err),
    }
}
