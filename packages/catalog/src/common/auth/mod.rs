/// Authorization module for the icon catalog
///
/// Provides a fluent API for authorization checks:
///
/// ```rust,ignore
/// use catalog_core::common::auth::{Actor, ReviewCapability};
///
/// Actor::admin(member_id)
///     .can(ReviewCapability::ViewReviewQueue)
///     .check()?;
/// ```
///
/// Transition-level rules (who may move a submission between states) live
/// in `domains::submissions::permissions`; this module carries the actor
/// identity and the coarse admin capability gate used by the read side.
mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::ReviewCapability;
pub use errors::AuthError;
