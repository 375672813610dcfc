//! Authenticated Caller
//!
//! Identity resolved from a bearer token, handed to downstream handlers
//! through request extensions.

use kernel::id::UserId;

use crate::domain::value_object::user_role::UserRole;

/// A verified, active user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Owner-or-admin check used by resource mutations
    pub fn can_manage(&self, owner_id: &UserId) -> bool {
        self.is_admin() || &self.user_id == owner_id
    }
}

/// Caller of an endpoint that also serves anonymous requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caller(pub Option<AuthUser>);

impl Caller {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.0.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}
