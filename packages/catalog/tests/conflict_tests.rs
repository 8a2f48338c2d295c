//! Concurrent moderation tests
//!
//! Two moderators acting on the same pre-image must never both win: the
//! store's compare-and-set condition lets exactly one write land and
//! surfaces the other as a conflict for the caller to retry.

mod common;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Barrier;

use catalog_core::common::{MemberId, SubmissionId};
use catalog_core::domains::submissions::actions;
use catalog_core::domains::submissions::models::{Submission, SubmissionStatus};
use catalog_core::domains::submissions::SubmissionError;
use catalog_core::kernel::{
    BaseSubmissionStore, CatalogDeps, MemorySubmissionStore, MockAuthProvider, MockNotifier,
    RecordingViewCache, StoreError,
};
use serde_json::Value as JsonValue;

use crate::common::{ADMIN_TOKEN, SECOND_ADMIN_TOKEN};

// ============================================================================
// Store-level compare-and-set
// ============================================================================

#[tokio::test]
async fn a_stale_pre_image_loses_the_conditional_write() {
    let store = MemorySubmissionStore::new();
    let seeded = store
        .insert(&Submission::new_pending("ghost".into(), None, JsonValue::Null))
        .await
        .unwrap();

    let mut approved = seeded.clone();
    approved.status = SubmissionStatus::Approved;
    store
        .update_if_status(SubmissionStatus::Pending, &approved)
        .await
        .unwrap();

    // A second writer still holding the pending pre-image
    let mut rejected = seeded.clone();
    rejected.status = SubmissionStatus::Rejected;
    let result = store
        .update_if_status(SubmissionStatus::Pending, &rejected)
        .await;

    assert!(matches!(result, Err(StoreError::Conflict)));

    let stored = store.get(seeded.id).await.unwrap().unwrap();
    assert_eq!(stored.status, SubmissionStatus::Approved);
}

// ============================================================================
// Request-level race
// ============================================================================

/// Store decorator that holds every read until both racing requests have
/// read the same pre-image, forcing the lost-update interleaving.
struct BarrierStore {
    inner: Arc<MemorySubmissionStore>,
    read_barrier: Barrier,
}

impl BarrierStore {
    fn new(inner: Arc<MemorySubmissionStore>, readers: usize) -> Self {
        Self {
            inner,
            read_barrier: Barrier::new(readers),
        }
    }
}

#[async_trait]
impl BaseSubmissionStore for BarrierStore {
    async fn get(&self, id: SubmissionId) -> Result<Option<Submission>, StoreError> {
        let record = self.inner.get(id).await?;
        self.read_barrier.wait().await;
        Ok(record)
    }

    async fn insert(&self, submission: &Submission) -> Result<Submission, StoreError> {
        self.inner.insert(submission).await
    }

    async fn update_if_status(
        &self,
        expected_status: SubmissionStatus,
        submission: &Submission,
    ) -> Result<Submission, StoreError> {
        self.inner.update_if_status(expected_status, submission).await
    }

    async fn list(&self) -> Result<Vec<Submission>, StoreError> {
        self.inner.list().await
    }

    async fn list_by_creator(&self, creator: MemberId) -> Result<Vec<Submission>, StoreError> {
        self.inner.list_by_creator(creator).await
    }
}

#[tokio::test]
async fn concurrent_moderators_on_the_same_pre_image_yield_exactly_one_winner() {
    let inner = Arc::new(MemorySubmissionStore::new());
    let seeded = inner
        .insert(&Submission::new_pending("znc".into(), None, JsonValue::Null))
        .await
        .unwrap();

    let auth = MockAuthProvider::new()
        .with_admin(ADMIN_TOKEN, MemberId::new())
        .with_admin(SECOND_ADMIN_TOKEN, MemberId::new());

    let deps = CatalogDeps::new(
        Arc::new(BarrierStore::new(inner.clone(), 2)),
        Arc::new(auth),
        Arc::new(RecordingViewCache::new()),
        Arc::new(MockNotifier::new()),
    );

    let (approval, rejection) = tokio::join!(
        actions::approve_submission(Some(ADMIN_TOKEN), seeded.id, &deps),
        actions::reject_submission(Some(SECOND_ADMIN_TOKEN), seeded.id, &deps),
    );

    let winners = [approval.is_ok(), rejection.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(winners, 1, "exactly one concurrent transition must win");

    let expected_status = if approval.is_ok() {
        assert!(matches!(rejection, Err(SubmissionError::Conflict)));
        SubmissionStatus::Approved
    } else {
        assert!(matches!(approval, Err(SubmissionError::Conflict)));
        SubmissionStatus::Rejected
    };

    let stored = inner.get(seeded.id).await.unwrap().unwrap();
    assert_eq!(stored.status, expected_status);
}

#[tokio::test]
async fn the_loser_can_retry_against_the_new_state() {
    let store = MemorySubmissionStore::new();
    let seeded = store
        .insert(&Submission::new_pending("headscale".into(), None, JsonValue::Null))
        .await
        .unwrap();

    let mut approved = seeded.clone();
    approved.status = SubmissionStatus::Approved;
    store
        .update_if_status(SubmissionStatus::Pending, &approved)
        .await
        .unwrap();

    // Re-fetch and apply a transition valid from the new state
    let current = store.get(seeded.id).await.unwrap().unwrap();
    assert_eq!(current.status, SubmissionStatus::Approved);

    let mut reverted = current.clone();
    reverted.status = SubmissionStatus::Pending;
    assert!(store
        .update_if_status(SubmissionStatus::Approved, &reverted)
        .await
        .is_ok());
}
