//! Set User Status Use Case (admin)
//!
//! Activates or deactivates an account. Deactivation also invalidates the
//! user's outstanding tokens, since authentication re-reads the flag.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct SetUserStatusUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SetUserStatusUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, is_active: bool) -> AuthResult<User> {
        let user = self
            .user_repo
            .set_active(user_id, is_active)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %user.user_id, is_active, "User status changed");

        Ok(user)
    }
}
