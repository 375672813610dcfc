//! List Users Use Case (admin)

use std::sync::Arc;

use kernel::pagination::{PageInfo, PageRequest};

use crate::domain::entity::user_overview::UserListing;
use crate::domain::repository::{UserDirectory, UserFilter};
use crate::error::AuthResult;

pub struct ListUsersInput {
    pub filter: UserFilter,
    pub page: PageRequest,
}

#[derive(Debug)]
pub struct ListUsersOutput {
    pub users: Vec<UserListing>,
    pub pagination: PageInfo,
}

pub struct ListUsersUseCase<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
}

impl<D> ListUsersUseCase<D>
where
    D: UserDirectory,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self, input: ListUsersInput) -> AuthResult<ListUsersOutput> {
        let page = self.directory.list(&input.filter, &input.page).await?;

        Ok(ListUsersOutput {
            pagination: input.page.info(page.total),
            users: page.rows,
        })
    }
}
