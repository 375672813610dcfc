//! User Stats Use Case (admin)

use std::sync::Arc;

use crate::domain::entity::user_overview::UserStats;
use crate::domain::repository::UserDirectory;
use crate::error::AuthResult;

pub struct UserStatsUseCase<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
}

impl<D> UserStatsUseCase<D>
where
    D: UserDirectory,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self) -> AuthResult<UserStats> {
        self.directory.stats().await
    }
}
