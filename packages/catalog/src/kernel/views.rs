//! View cache backends.
//!
//! Derived views (the public gallery, per-submission pages) are cached
//! outside this process and busted by tag. Both implementations here are
//! read-your-writes: once `invalidate` returns, readers going through the
//! same backend observe post-invalidation state.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use super::traits::BaseViewCache;

// =============================================================================
// In-memory tag cache
// =============================================================================

/// In-process tag store keeping an epoch counter per tag.
///
/// A cached projection is stamped with the epoch it was computed at; any
/// bump invalidates it on the next read. Used for tests and local
/// development.
#[derive(Default)]
pub struct MemoryViewCache {
    epochs: Mutex<HashMap<String, u64>>,
}

impl MemoryViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current epoch of a tag. Readers compare this against the epoch
    /// their cached copy was computed at.
    pub fn epoch(&self, tag: &str) -> u64 {
        self.epochs
            .lock()
            .unwrap()
            .get(tag)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl BaseViewCache for MemoryViewCache {
    async fn invalidate(&self, tag: &str) -> Result<()> {
        let mut epochs = self.epochs.lock().unwrap();
        let epoch = epochs.entry(tag.to_string()).or_insert(0);
        *epoch += 1;
        debug!(tag = %tag, epoch = *epoch, "View tag busted");
        Ok(())
    }
}

// =============================================================================
// Revalidation webhook cache
// =============================================================================

/// Busts tags by calling the site's on-demand revalidation endpoint.
///
/// The endpoint performs the tag revalidation synchronously before
/// responding, so a 2xx here means subsequent renders observe fresh data.
pub struct WebhookViewCache {
    client: reqwest::Client,
    endpoint: String,
    secret: Option<String>,
}

impl WebhookViewCache {
    pub fn new(endpoint: String, secret: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            secret,
        }
    }
}

#[async_trait]
impl BaseViewCache for WebhookViewCache {
    async fn invalidate(&self, tag: &str) -> Result<()> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "tags": [tag] }));
        if let Some(secret) = &self.secret {
            request = request.bearer_auth(secret);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "revalidation endpoint returned {status}: {body}"
            ));
        }

        debug!(tag = %tag, "View tag busted via webhook");
        Ok(())
    }
}
