//! Get Item Use Case

use std::sync::Arc;

use auth::AuthUser;
use kernel::id::ItemId;

use crate::domain::entity::views::ItemView;
use crate::domain::repository::ItemRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct GetItemUseCase<I>
where
    I: ItemRepository,
{
    items: Arc<I>,
}

impl<I> GetItemUseCase<I>
where
    I: ItemRepository,
{
    pub fn new(items: Arc<I>) -> Self {
        Self { items }
    }

    /// Full view for the owner or an admin
    pub async fn execute(&self, caller: &AuthUser, item_id: &ItemId) -> CatalogResult<ItemView> {
        let view = self.public(item_id).await?;

        if !caller.can_manage(&view.item.owner_id) {
            return Err(CatalogError::AccessDenied);
        }

        Ok(view)
    }

    /// View for the public catalog; callers decide how much of it to expose
    pub async fn public(&self, item_id: &ItemId) -> CatalogResult<ItemView> {
        self.items
            .view(item_id)
            .await?
            .ok_or(CatalogError::ItemNotFound)
    }
}
