//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;
use kernel::pagination::{Page, PageRequest};

use crate::domain::entity::{
    user::User,
    user_overview::{OwnedItemSummary, UserListing, UserStats},
};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_role::UserRole,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user. A taken email yields `AuthError::EmailTaken`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Write email and display name only, returning the stored row.
    /// A taken email yields `AuthError::EmailTaken`.
    async fn update_profile(
        &self,
        user_id: &UserId,
        email: &Email,
        display_name: &DisplayName,
    ) -> AuthResult<Option<User>>;

    async fn set_active(&self, user_id: &UserId, is_active: bool) -> AuthResult<Option<User>>;

    async fn set_role(&self, user_id: &UserId, role: UserRole) -> AuthResult<Option<User>>;
}

/// Exact-match filters for the admin user listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Read-side queries for user administration
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// Users newest first, each with the number of items they submitted
    async fn list(&self, filter: &UserFilter, page: &PageRequest) -> AuthResult<Page<UserListing>>;

    /// Items owned by the user, newest first
    async fn owned_items(&self, user_id: &UserId) -> AuthResult<Vec<OwnedItemSummary>>;

    async fn stats(&self) -> AuthResult<UserStats>;
}
