//! Test harness: substitute collaborators wired into CatalogDeps.

use catalog_core::common::MemberId;
use catalog_core::kernel::{CatalogDeps, MockAuthProvider, TestDependencies};

pub const ADMIN_TOKEN: &str = "tok-admin";
pub const SECOND_ADMIN_TOKEN: &str = "tok-admin-2";
pub const MEMBER_TOKEN: &str = "tok-member";
pub const OTHER_MEMBER_TOKEN: &str = "tok-member-2";

/// In-memory collaborators plus the identities the auth table knows about.
pub struct TestHarness {
    pub deps: TestDependencies,
    pub admin: MemberId,
    pub second_admin: MemberId,
    pub member: MemberId,
    pub other_member: MemberId,
}

impl TestHarness {
    /// A harness with two admins and two plain members registered.
    pub fn new() -> Self {
        let admin = MemberId::new();
        let second_admin = MemberId::new();
        let member = MemberId::new();
        let other_member = MemberId::new();

        let auth = MockAuthProvider::new()
            .with_admin(ADMIN_TOKEN, admin)
            .with_admin(SECOND_ADMIN_TOKEN, second_admin)
            .with_member(MEMBER_TOKEN, member)
            .with_member(OTHER_MEMBER_TOKEN, other_member);

        Self {
            deps: TestDependencies::new().mock_auth(auth),
            admin,
            second_admin,
            member,
            other_member,
        }
    }

    /// Deps handle for the code under test. The doubles stay inspectable
    /// through `self.deps`.
    pub fn catalog_deps(&self) -> CatalogDeps {
        self.deps.clone().into_deps()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
