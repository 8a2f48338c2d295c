//! Catalog dependencies (using traits for testability)
//!
//! This module provides the central dependency container used by all
//! domain actions, plus the adapters that wrap the PocketBase client
//! into the `Base*` traits.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;

use pocketbase::{PocketBaseClient, PocketBaseError, RawRecord};

use crate::common::{Actor, AuthError, MemberId, SubmissionId};
use crate::config::Config;
use crate::domains::submissions::models::{Submission, SubmissionStatus};
use crate::kernel::views::{MemoryViewCache, WebhookViewCache};
use crate::kernel::{
    BaseAuthProvider, BaseNotifier, BaseSubmissionStore, BaseViewCache, NoopNotifier, StoreError,
};

const SUBMISSIONS_COLLECTION: &str = "submissions";
const LIST_PAGE_SIZE: u32 = 200;

// =============================================================================
// PocketBase Store Adapter (implements BaseSubmissionStore trait)
// =============================================================================

/// Wrapper around the PocketBase client that implements the
/// `BaseSubmissionStore` trait.
///
/// The submissions collection is provisioned with UUID primary keys and an
/// update rule that matches `@request.query.expected_status` against the
/// stored status, which makes `update_if_status` a true server-side
/// compare-and-set.
pub struct PocketBaseStore(pub Arc<PocketBaseClient>);

impl PocketBaseStore {
    pub fn new(client: Arc<PocketBaseClient>) -> Self {
        Self(client)
    }

    async fn list_filtered(&self, filter: Option<&str>) -> Result<Vec<Submission>, StoreError> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let batch = self
                .0
                .list_records(SUBMISSIONS_COLLECTION, filter, page, LIST_PAGE_SIZE)
                .await
                .map_err(io_error)?;
            for record in &batch.items {
                items.push(submission_from_record(record)?);
            }
            if (u64::from(batch.page) * u64::from(batch.per_page)) >= batch.total_items {
                break;
            }
            page += 1;
        }
        Ok(items)
    }
}

#[async_trait]
impl BaseSubmissionStore for PocketBaseStore {
    async fn get(&self, id: SubmissionId) -> Result<Option<Submission>, StoreError> {
        match self
            .0
            .get_record(SUBMISSIONS_COLLECTION, &id.to_string())
            .await
        {
            Ok(record) => Ok(Some(submission_from_record(&record)?)),
            Err(PocketBaseError::NotFound) => Ok(None),
            Err(err) => Err(io_error(err)),
        }
    }

    async fn insert(&self, submission: &Submission) -> Result<Submission, StoreError> {
        let body = record_body(submission, true);
        match self.0.create_record(SUBMISSIONS_COLLECTION, &body).await {
            Ok(record) => submission_from_record(&record),
            Err(PocketBaseError::NotUnique { field }) if field == "name" => {
                Err(StoreError::NameTaken(submission.name.clone()))
            }
            Err(err) => Err(io_error(err)),
        }
    }

    async fn update_if_status(
        &self,
        expected_status: SubmissionStatus,
        submission: &Submission,
    ) -> Result<Submission, StoreError> {
        let body = record_body(submission, false);
        let expected = expected_status.to_string();
        match self
            .0
            .update_record(
                SUBMISSIONS_COLLECTION,
                &submission.id.to_string(),
                &body,
                &[("expected_status", expected.as_str())],
            )
            .await
        {
            Ok(record) => submission_from_record(&record),
            // A rule miss presents as a missing record: the caller just
            // read this id, so the record's status moved underneath it.
            Err(PocketBaseError::NotFound) => Err(StoreError::Conflict),
            Err(PocketBaseError::NotUnique { field }) if field == "name" => {
                Err(StoreError::NameTaken(submission.name.clone()))
            }
            Err(err) => Err(io_error(err)),
        }
    }

    async fn list(&self) -> Result<Vec<Submission>, StoreError> {
        self.list_filtered(None).await
    }

    async fn list_by_creator(&self, creator: MemberId) -> Result<Vec<Submission>, StoreError> {
        let filter = format!("created_by = '{creator}'");
        self.list_filtered(Some(&filter)).await
    }
}

fn io_error(err: PocketBaseError) -> StoreError {
    StoreError::Io(anyhow!(err))
}

fn record_body(submission: &Submission, with_id: bool) -> Value {
    let mut body = json!({
        "name": submission.name,
        "status": submission.status.to_string(),
        "created_by": submission.created_by.map(|id| id.to_string()).unwrap_or_default(),
        "approved_by": submission.approved_by.map(|id| id.to_string()).unwrap_or_default(),
        "extras": submission.extras,
    });
    if with_id {
        body["id"] = json!(submission.id.to_string());
    }
    body
}

fn submission_from_record(record: &RawRecord) -> Result<Submission, StoreError> {
    let field = |name: &str| -> Result<&str> {
        record
            .get(name)
            .and_then(Value::as_str)
            .with_context(|| format!("submission record is missing `{name}`"))
    };

    let parse_member = |name: &str| -> Result<Option<MemberId>> {
        match record.get(name).and_then(Value::as_str) {
            None | Some("") => Ok(None),
            Some(raw) => MemberId::parse(raw)
                .map(Some)
                .with_context(|| format!("invalid member id in `{name}`")),
        }
    };

    let build = || -> Result<Submission> {
        Ok(Submission {
            id: SubmissionId::parse(field("id")?).context("invalid submission id")?,
            name: field("name")?.to_string(),
            status: SubmissionStatus::from_str(field("status")?)?,
            created_by: parse_member("created_by")?,
            approved_by: parse_member("approved_by")?,
            extras: record.get("extras").cloned().unwrap_or(Value::Null),
            created: parse_pb_datetime(field("created")?)?,
            updated: parse_pb_datetime(field("updated")?)?,
        })
    };

    build().map_err(StoreError::Io)
}

/// Parse a PocketBase datetime (`2024-01-01 12:00:00.000Z`), falling back
/// to RFC 3339.
fn parse_pb_datetime(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.fZ")
        .with_context(|| format!("invalid datetime `{raw}`"))?;
    Ok(naive.and_utc())
}

// =============================================================================
// PocketBase Auth Adapter (implements BaseAuthProvider trait)
// =============================================================================

/// Resolves bearer tokens through the auth collection's token refresh
/// endpoint. The returned record carries the `admin` flag.
pub struct PocketBaseAuth {
    client: Arc<PocketBaseClient>,
    auth_collection: String,
}

impl PocketBaseAuth {
    pub fn new(client: Arc<PocketBaseClient>, auth_collection: String) -> Self {
        Self {
            client,
            auth_collection,
        }
    }
}

#[async_trait]
impl BaseAuthProvider for PocketBaseAuth {
    async fn resolve(&self, credential: Option<&str>) -> Result<Actor, AuthError> {
        let Some(token) = credential else {
            return Ok(Actor::anonymous());
        };

        let refreshed = self
            .client
            .auth_refresh(&self.auth_collection, token)
            .await
            .map_err(|err| match err {
                PocketBaseError::Unauthorized | PocketBaseError::NotFound => {
                    AuthError::InvalidToken
                }
                other => AuthError::InternalError(anyhow!(other)),
            })?;

        let member_id = MemberId::parse(&refreshed.record.id)
            .context("auth record carries an invalid member id")?;

        Ok(Actor::new(Some(member_id), refreshed.record.admin))
    }
}

// =============================================================================
// CatalogDeps
// =============================================================================

/// Catalog dependencies accessible to actions (using traits for
/// testability)
#[derive(Clone)]
pub struct CatalogDeps {
    pub store: Arc<dyn BaseSubmissionStore>,
    pub auth: Arc<dyn BaseAuthProvider>,
    pub view_cache: Arc<dyn BaseViewCache>,
    pub notifier: Arc<dyn BaseNotifier>,
}

impl CatalogDeps {
    /// Create new CatalogDeps with the given dependencies
    pub fn new(
        store: Arc<dyn BaseSubmissionStore>,
        auth: Arc<dyn BaseAuthProvider>,
        view_cache: Arc<dyn BaseViewCache>,
        notifier: Arc<dyn BaseNotifier>,
    ) -> Self {
        Self {
            store,
            auth,
            view_cache,
            notifier,
        }
    }

    /// Wire production dependencies from configuration: PocketBase-backed
    /// store and auth, webhook view cache when a revalidation endpoint is
    /// configured (in-memory otherwise), creator notifications delegated
    /// to the backend's own update hooks.
    pub fn from_config(config: &Config) -> Self {
        let mut client = PocketBaseClient::new(config.pocketbase_url.clone());
        if let Some(token) = &config.pocketbase_token {
            client = client.with_token(token.clone());
        }
        let client = Arc::new(client);

        let view_cache: Arc<dyn BaseViewCache> = match &config.revalidate_url {
            Some(url) => Arc::new(WebhookViewCache::new(
                url.clone(),
                config.revalidate_secret.clone(),
            )),
            None => Arc::new(MemoryViewCache::new()),
        };

        Self::new(
            Arc::new(PocketBaseStore::new(client.clone())),
            Arc::new(PocketBaseAuth::new(
                client,
                config.auth_collection.clone(),
            )),
            view_cache,
            Arc::new(NoopNotifier),
        )
    }
}
