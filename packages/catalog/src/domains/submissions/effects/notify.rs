//! Creator notification
//!
//! Tells the submitting member their record moved states. Delivery runs
//! after the store write and the view busts; a failure degrades the
//! result instead of failing it.

use tracing::warn;

use super::super::models::{Submission, SubmissionStatus};
use crate::kernel::BaseNotifier;

/// Notify the creator of a status change. Returns whether delivery
/// succeeded.
pub async fn creator_status_changed(
    notifier: &dyn BaseNotifier,
    submission: &Submission,
    previous: SubmissionStatus,
) -> bool {
    match notifier.status_changed(submission, previous).await {
        Ok(()) => true,
        Err(err) => {
            warn!(
                submission_id = %submission.id,
                from = %previous,
                to = %submission.status,
                error = %err,
                "Failed to notify submission creator"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockNotifier;
    use serde_json::Value as JsonValue;

    #[tokio::test]
    async fn successful_delivery_records_the_notice() {
        let notifier = MockNotifier::new();
        let submission = Submission::new_pending("caddy".into(), None, JsonValue::Null);

        let delivered =
            creator_status_changed(&notifier, &submission, SubmissionStatus::Pending).await;

        assert!(delivered);
        assert_eq!(notifier.notices().len(), 1);
    }

    #[tokio::test]
    async fn failed_delivery_is_reported_not_raised() {
        let notifier = MockNotifier::failing();
        let submission = Submission::new_pending("caddy".into(), None, JsonValue::Null);

        let delivered =
            creator_status_changed(&notifier, &submission, SubmissionStatus::Pending).await;

        assert!(!delivered);
    }
}
