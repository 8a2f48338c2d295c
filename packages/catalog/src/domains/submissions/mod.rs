pub mod actions;
pub mod data;
pub mod effects;
pub mod errors;
pub mod machines;
pub mod models;
pub mod permissions;

// Re-export actions
pub use actions::{DegradedOp, TransitionReceipt};

// Re-export data types (projection types)
pub use data::GalleryEntry;

// Re-export errors
pub use errors::SubmissionError;

// Re-export machine types
pub use machines::{InvalidationRequest, Transition, TransitionOutcome};

// Re-export models (domain models)
pub use models::{Submission, SubmissionDraft, SubmissionPatch, SubmissionStatus};
