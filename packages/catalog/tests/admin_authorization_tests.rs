//! Admin authorization tests
//!
//! Each moderation operation gets three variants:
//! 1. `*_as_admin_succeeds` - an admin can perform the action
//! 2. `*_as_non_admin_fails` - an authenticated member is denied
//! 3. `*_anonymously_is_malformed` - a request without an identity is a
//!    contract violation (`InvalidRequest`), distinct from a bad token,
//!    which resolves to `Unauthenticated`.

mod common;

use catalog_core::domains::submissions::actions;
use catalog_core::domains::submissions::models::SubmissionStatus;
use catalog_core::domains::submissions::SubmissionError;

use crate::common::{seed_submission, TestHarness, ADMIN_TOKEN, MEMBER_TOKEN};

// ============================================================================
// Approve
// ============================================================================

#[tokio::test]
async fn approve_as_admin_succeeds() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "radarr", SubmissionStatus::Pending, None).await;

    let receipt = actions::approve_submission(Some(ADMIN_TOKEN), seeded.id, &deps)
        .await
        .unwrap();
    assert_eq!(receipt.submission.status, SubmissionStatus::Approved);
}

#[tokio::test]
async fn approve_as_non_admin_fails() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "radarr", SubmissionStatus::Pending, None).await;

    let result = actions::approve_submission(Some(MEMBER_TOKEN), seeded.id, &deps).await;
    assert!(matches!(result, Err(SubmissionError::NotAuthorized(_))));
}

#[tokio::test]
async fn approve_anonymously_is_malformed() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "radarr", SubmissionStatus::Pending, None).await;

    let result = actions::approve_submission(None, seeded.id, &deps).await;
    assert!(matches!(result, Err(SubmissionError::InvalidRequest(_))));
}

// ============================================================================
// Reject
// ============================================================================

#[tokio::test]
async fn reject_as_admin_succeeds() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "sonarr", SubmissionStatus::Pending, None).await;

    let receipt = actions::reject_submission(Some(ADMIN_TOKEN), seeded.id, &deps)
        .await
        .unwrap();
    assert_eq!(receipt.submission.status, SubmissionStatus::Rejected);
}

#[tokio::test]
async fn reject_as_non_admin_fails() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "sonarr", SubmissionStatus::Pending, None).await;

    let result = actions::reject_submission(Some(MEMBER_TOKEN), seeded.id, &deps).await;
    assert!(matches!(result, Err(SubmissionError::NotAuthorized(_))));
}

#[tokio::test]
async fn reject_anonymously_is_malformed() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "sonarr", SubmissionStatus::Pending, None).await;

    let result = actions::reject_submission(None, seeded.id, &deps).await;
    assert!(matches!(result, Err(SubmissionError::InvalidRequest(_))));
}

// ============================================================================
// Publish
// ============================================================================

#[tokio::test]
async fn publish_as_admin_succeeds() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "prowlarr", SubmissionStatus::Approved, None).await;

    let receipt = actions::publish_submission(Some(ADMIN_TOKEN), seeded.id, &deps)
        .await
        .unwrap();
    assert_eq!(
        receipt.submission.status,
        SubmissionStatus::AddedToCollection
    );
}

#[tokio::test]
async fn publish_as_non_admin_fails() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "prowlarr", SubmissionStatus::Approved, None).await;

    let result = actions::publish_submission(Some(MEMBER_TOKEN), seeded.id, &deps).await;
    assert!(matches!(result, Err(SubmissionError::NotAuthorized(_))));
}

#[tokio::test]
async fn publish_anonymously_is_malformed() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "prowlarr", SubmissionStatus::Approved, None).await;

    let result = actions::publish_submission(None, seeded.id, &deps).await;
    assert!(matches!(result, Err(SubmissionError::InvalidRequest(_))));
}

// ============================================================================
// Revert
// ============================================================================

#[tokio::test]
async fn revert_as_admin_succeeds() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "lidarr", SubmissionStatus::Approved, None).await;

    let receipt = actions::revert_submission(Some(ADMIN_TOKEN), seeded.id, &deps)
        .await
        .unwrap();
    assert_eq!(receipt.submission.status, SubmissionStatus::Pending);
}

#[tokio::test]
async fn revert_as_non_admin_fails() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "lidarr", SubmissionStatus::Approved, None).await;

    let result = actions::revert_submission(Some(MEMBER_TOKEN), seeded.id, &deps).await;
    assert!(matches!(result, Err(SubmissionError::NotAuthorized(_))));
}

#[tokio::test]
async fn revert_anonymously_is_malformed() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(&harness, "lidarr", SubmissionStatus::Approved, None).await;

    let result = actions::revert_submission(None, seeded.id, &deps).await;
    assert!(matches!(result, Err(SubmissionError::InvalidRequest(_))));
}

// ============================================================================
// Resubmit (owner-or-admin, not a plain admin gate)
// ============================================================================

#[tokio::test]
async fn resubmit_as_admin_succeeds_on_foreign_records() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    let seeded = seed_submission(
        &harness,
        "bazarr",
        SubmissionStatus::Rejected,
        Some(harness.member),
    )
    .await;

    let receipt = actions::resubmit_submission(Some(ADMIN_TOKEN), seeded.id, None, &deps)
        .await
        .unwrap();
    assert_eq!(receipt.submission.status, SubmissionStatus::Pending);
}

#[tokio::test]
async fn resubmit_of_an_anonymous_record_is_admin_only() {
    let harness = TestHarness::new();
    let deps = harness.catalog_deps();
    // No creator on record: the owner rule can never match
    let seeded = seed_submission(&harness, "bazarr", SubmissionStatus::Rejected, None).await;

    let result = actions::resubmit_submission(Some(MEMBER_TOKEN), seeded.id, None, &deps).await;
    assert!(matches!(result, Err(SubmissionError::NotAuthorized(_))));

    assert!(
        actions::resubmit_submission(Some(ADMIN_TOKEN), seeded.id, None, &deps)
            .await
            .is_ok()
    );
}
