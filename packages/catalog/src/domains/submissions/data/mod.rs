//! Read-side projections
//!
//! The public gallery and the reviewer dashboard are derived views over
//! submission records. They are computed here and cached downstream under
//! the tags busted by `effects::invalidation`.

use serde::{Deserialize, Serialize};

use super::errors::SubmissionError;
use super::models::{Submission, SubmissionStatus};
use crate::common::{Actor, ReviewCapability, SubmissionId};
use crate::kernel::{CatalogDeps, StoreError};

/// Public community gallery entry: the only fields exposed to
/// unauthenticated readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub id: SubmissionId,
    pub name: String,
    pub status: SubmissionStatus,
}

impl From<&Submission> for GalleryEntry {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id,
            name: submission.name.clone(),
            status: submission.status,
        }
    }
}

/// The community gallery: every submission still living in the community
/// space. Entries folded into the icon collection are served from the
/// collection itself and drop out of this view.
pub async fn gallery(deps: &CatalogDeps) -> Result<Vec<GalleryEntry>, SubmissionError> {
    let submissions = deps.store.list().await.map_err(list_error)?;

    Ok(submissions
        .iter()
        .filter(|s| s.status != SubmissionStatus::AddedToCollection)
        .map(GalleryEntry::from)
        .collect())
}

/// Dashboard listing. Admins see every submission; an authenticated
/// member sees only their own; anonymous callers are turned away.
pub async fn list_submissions(
    actor: &Actor,
    deps: &CatalogDeps,
) -> Result<Vec<Submission>, SubmissionError> {
    if actor.is_admin() {
        return deps.store.list().await.map_err(list_error);
    }

    let Some(member_id) = actor.id() else {
        return Err(SubmissionError::Unauthenticated);
    };

    deps.store
        .list_by_creator(member_id)
        .await
        .map_err(list_error)
}

/// The review queue: pending submissions awaiting a decision. Admin only.
pub async fn review_queue(
    actor: &Actor,
    deps: &CatalogDeps,
) -> Result<Vec<Submission>, SubmissionError> {
    actor.can(ReviewCapability::ViewReviewQueue).check()?;

    let submissions = deps.store.list().await.map_err(list_error)?;
    Ok(submissions
        .into_iter()
        .filter(|s| s.status == SubmissionStatus::Pending)
        .collect())
}

fn list_error(err: StoreError) -> SubmissionError {
    match err {
        StoreError::Io(err) => SubmissionError::Store(err),
        other => SubmissionError::Store(anyhow::anyhow!(other)),
    }
}
