//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use catalog_core::common::{MemberId, SubmissionId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let member_id: MemberId = MemberId::new();
//! let submission_id: SubmissionId = SubmissionId::new();
//!
//! // This would be a compile error:
//! // let wrong: SubmissionId = member_id;
//! ```

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Member entities (authenticated users).
pub struct Member;

/// Marker type for Submission entities (community icon proposals).
pub struct Submission;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;

/// Typed ID for Submission entities.
pub type SubmissionId = Id<Submission>;
