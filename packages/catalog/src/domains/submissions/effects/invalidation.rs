//! Derived-view invalidation
//!
//! Maps a committed transition to the set of view tags that could have
//! observed the changed record, then busts them through the injected
//! cache backend. The mapping is pure and deterministic so it can be
//! tested without a live cache.

use tracing::warn;

use super::super::machines::InvalidationRequest;
use crate::common::SubmissionId;
use crate::kernel::BaseViewCache;

/// Aggregate tag covering every view that lists submissions by status.
pub const GALLERY_TAG: &str = "community-gallery";

/// Tag scoped to a single submission record.
pub fn record_tag(id: SubmissionId) -> String {
    format!("submission-{id}")
}

/// Tag scoped to a submission's rendered page, keyed by display name.
/// Stable across status changes; only a rename moves it.
pub fn page_tag(name: &str) -> String {
    format!("community-submission-{name}")
}

/// The exact tag set a committed transition invalidates: the aggregate
/// gallery, the record itself, and the record's rendered page - plus the
/// page under its previous name when the write renamed it.
pub fn tags_for(request: &InvalidationRequest, renamed_from: Option<&str>) -> Vec<String> {
    let mut tags = vec![
        GALLERY_TAG.to_string(),
        record_tag(request.submission_id),
        page_tag(&request.name),
    ];
    if let Some(old_name) = renamed_from {
        let old_tag = page_tag(old_name);
        if !tags.contains(&old_tag) {
            tags.push(old_tag);
        }
    }
    tags
}

/// Bust every tag, continuing past individual failures.
///
/// Returns the tags that could not be busted. The record write has
/// already landed at this point, so failures leave views stale but the
/// record correct; callers surface them as a degraded warning, never as
/// a request failure.
pub async fn bust_views(cache: &dyn BaseViewCache, tags: Vec<String>) -> Vec<String> {
    let mut failed = Vec::new();
    for tag in tags {
        if let Err(err) = cache.invalidate(&tag).await {
            warn!(tag = %tag, error = %err, "Failed to bust view tag; views may be stale");
            failed.push(tag);
        }
    }
    failed
}
