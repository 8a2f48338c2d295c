//! Notifier implementations.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::traits::BaseNotifier;
use crate::domains::submissions::models::{Submission, SubmissionStatus};

/// No-op notifier.
///
/// The production record store emails the creator from its own update
/// hook, so the default deployment has nothing to deliver from this side.
pub struct NoopNotifier;

#[async_trait]
impl BaseNotifier for NoopNotifier {
    async fn status_changed(
        &self,
        submission: &Submission,
        previous: SubmissionStatus,
    ) -> Result<()> {
        debug!(
            submission_id = %submission.id,
            from = %previous,
            to = %submission.status,
            "Skipping notification (handled by store hooks)"
        );
        Ok(())
    }
}
