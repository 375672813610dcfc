//! Get User Use Case (admin)
//!
//! A single user together with a summary of every item they submitted.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::{user::User, user_overview::OwnedItemSummary};
use crate::domain::repository::{UserDirectory, UserRepository};
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct UserDetail {
    pub user: User,
    pub items: Vec<OwnedItemSummary>,
}

pub struct GetUserUseCase<U, D>
where
    U: UserRepository,
    D: UserDirectory,
{
    user_repo: Arc<U>,
    directory: Arc<D>,
}

impl<U, D> GetUserUseCase<U, D>
where
    U: UserRepository,
    D: UserDirectory,
{
    pub fn new(user_repo: Arc<U>, directory: Arc<D>) -> Self {
        Self {
            user_repo,
            directory,
        }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<UserDetail> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let items = self.directory.owned_items(user_id).await?;

        Ok(UserDetail { user, items })
    }
}
