//! Kernel module - infrastructure and dependencies.

pub mod deps;
pub mod notify;
pub mod test_dependencies;
pub mod traits;
pub mod views;

pub use deps::{CatalogDeps, PocketBaseAuth, PocketBaseStore};
pub use notify::NoopNotifier;
pub use test_dependencies::{
    MemorySubmissionStore, MockAuthProvider, MockNotifier, RecordingViewCache, TestDependencies,
};
pub use traits::*;
pub use views::{MemoryViewCache, WebhookViewCache};
