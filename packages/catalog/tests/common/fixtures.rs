//! Test fixtures for creating test data.

use catalog_core::common::MemberId;
use catalog_core::domains::submissions::models::{Submission, SubmissionStatus};
use catalog_core::kernel::BaseSubmissionStore;
use serde_json::json;

use super::TestHarness;

/// Seed a submission in the given lifecycle state directly into the store.
pub async fn seed_submission(
    harness: &TestHarness,
    name: &str,
    status: SubmissionStatus,
    created_by: Option<MemberId>,
) -> Submission {
    let mut submission = Submission::new_pending(
        name.to_string(),
        created_by,
        json!({"aliases": [], "categories": []}),
    );
    submission.status = status;

    harness
        .deps
        .store
        .insert(&submission)
        .await
        .expect("failed to seed submission")
}
