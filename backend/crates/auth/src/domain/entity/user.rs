//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_password::UserPassword, user_role::UserRole,
};

/// User entity
///
/// Users are never hard-deleted; an administrator deactivates them instead.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Login identifier (unique, lower-cased)
    pub email: Email,
    pub display_name: DisplayName,
    pub password_hash: UserPassword,
    pub user_role: UserRole,
    /// Inactive users cannot sign in and their tokens stop working
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, active user with the default role
    pub fn new(email: Email, display_name: DisplayName, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            display_name,
            password_hash,
            user_role: UserRole::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }

    pub fn can_sign_in(&self) -> bool {
        self.is_active
    }
}
