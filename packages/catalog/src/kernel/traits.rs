// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Lifecycle
// decisions (who may move a submission where) are domain functions that
// use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseSubmissionStore)

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::common::{Actor, AuthError, MemberId, SubmissionId};
use crate::domains::submissions::models::{Submission, SubmissionStatus};

// =============================================================================
// Store errors
// =============================================================================

/// Typed failure signals of the record store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// A conditional write lost against a concurrent update.
    #[error("concurrent update detected")]
    Conflict,

    /// A write violated the unique index on `name`.
    #[error("name `{0}` is already taken")]
    NameTaken(String),

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

// =============================================================================
// Submission Store Trait (Infrastructure - record CRUD + compare-and-set)
// =============================================================================

/// CRUD over submission records, keyed by id.
///
/// The store owns durability, indexing and the unique index on `name`.
/// `update_if_status` is the concurrency primitive the lifecycle relies
/// on: it must persist atomically and only while the stored status still
/// matches the caller's pre-image.
#[async_trait]
pub trait BaseSubmissionStore: Send + Sync {
    /// Fetch a submission by id. `Ok(None)` when no such record exists.
    async fn get(&self, id: SubmissionId) -> Result<Option<Submission>, StoreError>;

    /// Insert a new record. Fails with `NameTaken` on a display-name
    /// collision.
    async fn insert(&self, submission: &Submission) -> Result<Submission, StoreError>;

    /// Compare-and-set update: persist `submission` only if the stored
    /// record's status still equals `expected_status`. Fails with
    /// `Conflict` when the condition no longer holds.
    async fn update_if_status(
        &self,
        expected_status: SubmissionStatus,
        submission: &Submission,
    ) -> Result<Submission, StoreError>;

    /// All submissions.
    async fn list(&self) -> Result<Vec<Submission>, StoreError>;

    /// Submissions created by a given member.
    async fn list_by_creator(&self, creator: MemberId) -> Result<Vec<Submission>, StoreError>;
}

// =============================================================================
// Auth Provider Trait (Infrastructure - credential resolution)
// =============================================================================

/// Resolves a request credential to an actor.
///
/// Token issuance and validation live entirely in the auth backend; this
/// trait only consumes the resulting `{id, admin}` identity.
#[async_trait]
pub trait BaseAuthProvider: Send + Sync {
    /// Resolve a credential. `None` resolves to the anonymous actor; a
    /// present but invalid token is `AuthError::InvalidToken`.
    async fn resolve(&self, credential: Option<&str>) -> Result<Actor, AuthError>;
}

// =============================================================================
// View Cache Trait (Infrastructure - derived-view tag invalidation)
// =============================================================================

/// Tag-based invalidation of derived views (gallery, rendered pages).
///
/// Implementations must be read-your-writes: once `invalidate` returns,
/// a read through the same backend observes post-invalidation state.
/// TTL-only expiry does not satisfy this contract. Busting a tag that was
/// already busted is safe and must not error.
#[async_trait]
pub trait BaseViewCache: Send + Sync {
    async fn invalidate(&self, tag: &str) -> Result<()>;
}

// =============================================================================
// Notifier Trait (Infrastructure - submitter notifications)
// =============================================================================

/// Notifies a submission's creator that its status changed.
#[async_trait]
pub trait BaseNotifier: Send + Sync {
    async fn status_changed(
        &self,
        submission: &Submission,
        previous: SubmissionStatus,
    ) -> Result<()>;
}
