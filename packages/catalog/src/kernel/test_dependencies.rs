// TestDependencies - substitute collaborators for testing
//
// Provides in-memory implementations that can be injected into CatalogDeps
// for deterministic tests: a store with real compare-and-set semantics, a
// token-table auth provider, and recording view-cache/notifier doubles.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::deps::CatalogDeps;
use super::traits::{
    BaseAuthProvider, BaseNotifier, BaseSubmissionStore, BaseViewCache, StoreError,
};
use crate::common::{Actor, AuthError, MemberId, SubmissionId};
use crate::domains::submissions::models::{Submission, SubmissionStatus};

// =============================================================================
// In-memory submission store
// =============================================================================

/// HashMap-backed store with the same observable semantics as the real
/// backend: unique display names, compare-and-set updates (atomic under
/// one lock), `updated` refreshed on every write.
pub struct MemorySubmissionStore {
    records: Mutex<HashMap<SubmissionId, Submission>>,
    fail_next_write: Mutex<bool>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fail_next_write: Mutex::new(false),
        }
    }

    /// Seed a record, bypassing uniqueness checks.
    pub fn with_submission(self, submission: Submission) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(submission.id, submission);
        self
    }

    /// Make the next write fail with an IO error.
    pub fn fail_next_write(&self) {
        *self.fail_next_write.lock().unwrap() = true;
    }

    /// Snapshot of all stored records.
    pub fn records(&self) -> Vec<Submission> {
        let mut records: Vec<_> = self.records.lock().unwrap().values().cloned().collect();
        records.sort_by(|a, b| a.created.cmp(&b.created).then(a.name.cmp(&b.name)));
        records
    }

    fn take_failure(&self) -> Result<(), StoreError> {
        let mut flag = self.fail_next_write.lock().unwrap();
        if *flag {
            *flag = false;
            return Err(StoreError::Io(anyhow!("store unavailable")));
        }
        Ok(())
    }
}

impl Default for MemorySubmissionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSubmissionStore for MemorySubmissionStore {
    async fn get(&self, id: SubmissionId) -> Result<Option<Submission>, StoreError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, submission: &Submission) -> Result<Submission, StoreError> {
        self.take_failure()?;

        let mut records = self.records.lock().unwrap();
        if records.values().any(|s| s.name == submission.name) {
            return Err(StoreError::NameTaken(submission.name.clone()));
        }

        let mut stored = submission.clone();
        stored.created = Utc::now();
        stored.updated = stored.created;
        records.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_if_status(
        &self,
        expected_status: SubmissionStatus,
        submission: &Submission,
    ) -> Result<Submission, StoreError> {
        self.take_failure()?;

        let mut records = self.records.lock().unwrap();

        if records
            .values()
            .any(|s| s.id != submission.id && s.name == submission.name)
        {
            return Err(StoreError::NameTaken(submission.name.clone()));
        }

        let current = records
            .get_mut(&submission.id)
            .ok_or(StoreError::NotFound)?;
        if current.status != expected_status {
            return Err(StoreError::Conflict);
        }

        let mut stored = submission.clone();
        stored.created = current.created;
        stored.updated = Utc::now();
        *current = stored.clone();
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Submission>, StoreError> {
        Ok(self.records())
    }

    async fn list_by_creator(&self, creator: MemberId) -> Result<Vec<Submission>, StoreError> {
        Ok(self
            .records()
            .into_iter()
            .filter(|s| s.created_by == Some(creator))
            .collect())
    }
}

// =============================================================================
// Mock auth provider
// =============================================================================

/// Token-table auth provider: registered tokens resolve to their actor,
/// anything else is an invalid token, no credential is anonymous.
pub struct MockAuthProvider {
    tokens: Mutex<HashMap<String, Actor>>,
}

impl MockAuthProvider {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_actor(self, token: &str, actor: Actor) -> Self {
        self.tokens.lock().unwrap().insert(token.to_string(), actor);
        self
    }

    pub fn with_member(self, token: &str, id: MemberId) -> Self {
        self.with_actor(token, Actor::member(id))
    }

    pub fn with_admin(self, token: &str, id: MemberId) -> Self {
        self.with_actor(token, Actor::admin(id))
    }
}

impl Default for MockAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAuthProvider for MockAuthProvider {
    async fn resolve(&self, credential: Option<&str>) -> Result<Actor, AuthError> {
        let Some(token) = credential else {
            return Ok(Actor::anonymous());
        };

        self.tokens
            .lock()
            .unwrap()
            .get(token)
            .copied()
            .ok_or(AuthError::InvalidToken)
    }
}

// =============================================================================
// Recording view cache
// =============================================================================

/// Records every busted tag; optionally fails to exercise the degraded
/// invalidation path.
pub struct RecordingViewCache {
    busted: Arc<Mutex<Vec<String>>>,
    failing: bool,
}

impl RecordingViewCache {
    pub fn new() -> Self {
        Self {
            busted: Arc::new(Mutex::new(Vec::new())),
            failing: false,
        }
    }

    /// A cache whose every invalidation fails.
    pub fn failing() -> Self {
        Self {
            busted: Arc::new(Mutex::new(Vec::new())),
            failing: true,
        }
    }

    /// All tags busted so far, in call order.
    pub fn busted(&self) -> Vec<String> {
        self.busted.lock().unwrap().clone()
    }

    /// Check if a tag was busted.
    pub fn was_busted(&self, tag: &str) -> bool {
        self.busted.lock().unwrap().iter().any(|t| t == tag)
    }
}

impl Default for RecordingViewCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseViewCache for RecordingViewCache {
    async fn invalidate(&self, tag: &str) -> Result<()> {
        if self.failing {
            return Err(anyhow!("view cache unavailable"));
        }
        self.busted.lock().unwrap().push(tag.to_string());
        Ok(())
    }
}

// =============================================================================
// Mock notifier
// =============================================================================

/// Records `(submission, from, to)` notices; optionally fails to exercise
/// the degraded notification path.
pub struct MockNotifier {
    notices: Arc<Mutex<Vec<(SubmissionId, SubmissionStatus, SubmissionStatus)>>>,
    failing: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            notices: Arc::new(Mutex::new(Vec::new())),
            failing: false,
        }
    }

    /// A notifier whose every delivery fails.
    pub fn failing() -> Self {
        Self {
            notices: Arc::new(Mutex::new(Vec::new())),
            failing: true,
        }
    }

    /// All notices sent so far.
    pub fn notices(&self) -> Vec<(SubmissionId, SubmissionStatus, SubmissionStatus)> {
        self.notices.lock().unwrap().clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseNotifier for MockNotifier {
    async fn status_changed(
        &self,
        submission: &Submission,
        previous: SubmissionStatus,
    ) -> Result<()> {
        if self.failing {
            return Err(anyhow!("mail relay unavailable"));
        }
        self.notices
            .lock()
            .unwrap()
            .push((submission.id, previous, submission.status));
        Ok(())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub store: Arc<MemorySubmissionStore>,
    pub auth: Arc<MockAuthProvider>,
    pub view_cache: Arc<RecordingViewCache>,
    pub notifier: Arc<MockNotifier>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemorySubmissionStore::new()),
            auth: Arc::new(MockAuthProvider::new()),
            view_cache: Arc::new(RecordingViewCache::new()),
            notifier: Arc::new(MockNotifier::new()),
        }
    }

    /// Set a preconfigured store
    pub fn mock_store(mut self, store: MemorySubmissionStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Set a preconfigured auth provider
    pub fn mock_auth(mut self, auth: MockAuthProvider) -> Self {
        self.auth = Arc::new(auth);
        self
    }

    /// Set a preconfigured view cache
    pub fn mock_view_cache(mut self, cache: RecordingViewCache) -> Self {
        self.view_cache = Arc::new(cache);
        self
    }

    /// Set a preconfigured notifier
    pub fn mock_notifier(mut self, notifier: MockNotifier) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Convert into CatalogDeps for the code under test. The concrete
    /// doubles stay inspectable through this builder's `Arc` handles.
    pub fn into_deps(self) -> CatalogDeps {
        CatalogDeps::new(self.store, self.auth, self.view_cache, self.notifier)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
