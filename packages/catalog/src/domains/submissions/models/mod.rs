use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::common::{MemberId, SubmissionId};

/// Submission - a community-proposed icon entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,

    /// Unique display name. Uniqueness is enforced by the record store;
    /// a collision is a creation-time error, not a lifecycle concern.
    pub name: String,

    pub status: SubmissionStatus,

    /// Submitting actor. `None` for anonymous submissions. Set once at
    /// creation, never mutated afterwards.
    pub created_by: Option<MemberId>,

    /// Actor who most recently moved the record into `approved`.
    /// Overwritten on each approval.
    pub approved_by: Option<MemberId>,

    /// Presentation payload (aliases, categories, asset color/wordmark
    /// maps). Opaque to the lifecycle engine.
    #[serde(default)]
    pub extras: JsonValue,

    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Submission {
    /// Build a fresh pending submission. The id is assigned here; the
    /// record store enforces name uniqueness on insert.
    pub fn new_pending(name: String, created_by: Option<MemberId>, extras: JsonValue) -> Self {
        let now = Utc::now();
        Self {
            id: SubmissionId::new(),
            name,
            status: SubmissionStatus::Pending,
            created_by,
            approved_by: None,
            extras,
            created: now,
            updated: now,
        }
    }
}

// =============================================================================
// Status enum
// =============================================================================

/// Submission lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Awaiting review. The sole initial state.
    #[serde(alias = "waiting_approval")]
    Pending,
    /// Accepted by a reviewer, not yet part of the icon collection.
    Approved,
    /// Declined by a reviewer. May be resubmitted by its author.
    #[serde(alias = "refused")]
    Rejected,
    /// Imported into the icon collection. Terminal.
    AddedToCollection,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "pending"),
            SubmissionStatus::Approved => write!(f, "approved"),
            SubmissionStatus::Rejected => write!(f, "rejected"),
            SubmissionStatus::AddedToCollection => write!(f, "added_to_collection"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            "added_to_collection" => Ok(SubmissionStatus::AddedToCollection),
            // Aliases from schema revisions that predate the status rename.
            // Accepted on read, never written back.
            "waiting_approval" => Ok(SubmissionStatus::Pending),
            "refused" => Ok(SubmissionStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid submission status: {}", s)),
        }
    }
}

// =============================================================================
// Write-side inputs
// =============================================================================

/// Creation input as received from a client.
///
/// `status` and `approved_by` mirror a raw record write: clients should not
/// send them, and the permission rules reject any draft that tries to start
/// life as anything but a plain pending submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub name: String,
    #[serde(default)]
    pub extras: JsonValue,
    #[serde(default)]
    pub status: Option<SubmissionStatus>,
    #[serde(default)]
    pub approved_by: Option<MemberId>,
}

impl SubmissionDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extras: JsonValue::Null,
            status: None,
            approved_by: None,
        }
    }

    pub fn with_extras(mut self, extras: JsonValue) -> Self {
        self.extras = extras;
        self
    }
}

/// Field updates applied alongside a transition (typically a resubmission
/// with fixed assets). Not gated by the state machine beyond the transition
/// itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub extras: Option<JsonValue>,
}

impl SubmissionPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.extras.is_none()
    }
}
