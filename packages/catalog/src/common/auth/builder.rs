use super::{AuthError, ReviewCapability};
use crate::common::entity_ids::MemberId;

/// The identity performing a request.
///
/// The `admin` flag comes from the auth provider, which validated it during
/// authentication. We trust this flag since tokens are verified by the
/// backend on every resolve and the flag cannot be altered through
/// submission-side requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    id: Option<MemberId>,
    admin: bool,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `id` - The member ID of the actor, `None` for anonymous requests
    /// * `admin` - Admin flag from the validated auth record
    pub fn new(id: Option<MemberId>, admin: bool) -> Self {
        Self { id, admin }
    }

    /// An authenticated, non-admin member.
    pub fn member(id: MemberId) -> Self {
        Self::new(Some(id), false)
    }

    /// An authenticated admin.
    pub fn admin(id: MemberId) -> Self {
        Self::new(Some(id), true)
    }

    /// An unauthenticated request.
    pub fn anonymous() -> Self {
        Self::new(None, false)
    }

    pub fn id(&self) -> Option<MemberId> {
        self.id
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn is_anonymous(&self) -> bool {
        self.id.is_none()
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: ReviewCapability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor: Actor,
    capability: ReviewCapability,
}

impl CapabilityBuilder {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        if self.actor.is_anonymous() {
            return Err(AuthError::AuthenticationRequired);
        }

        if self.capability.requires_admin() && !self.actor.is_admin() {
            return Err(AuthError::AdminRequired);
        }

        Ok(())
    }
}
