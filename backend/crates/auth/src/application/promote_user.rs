//! Promote User Use Case
//!
//! The only path to the admin role. Also used at startup to bootstrap the
//! first administrator by email.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct PromoteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> PromoteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<User> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.promote(user).await
    }

    /// Promote the account registered under `email`, if there is one
    pub async fn promote_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let email = Email::new(email)?;

        match self.user_repo.find_by_email(&email).await? {
            Some(user) => self.promote(user).await.map(Some),
            None => Ok(None),
        }
    }

    async fn promote(&self, user: User) -> AuthResult<User> {
        // Already an admin: nothing to write
        if user.is_admin() {
            return Ok(user);
        }

        let user = self
            .user_repo
            .set_role(&user.user_id, UserRole::Admin)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %user.user_id, "User promoted to admin");

        Ok(user)
    }
}
