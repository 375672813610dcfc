//! Delete Item Use Case

use std::sync::Arc;

use auth::AuthUser;
use kernel::id::ItemId;

use crate::application::upload::discard_images;
use crate::domain::image_store::ImageStore;
use crate::domain::repository::ItemRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct DeleteItemUseCase<I, S>
where
    I: ItemRepository,
    S: ImageStore,
{
    items: Arc<I>,
    store: Arc<S>,
}

impl<I, S> DeleteItemUseCase<I, S>
where
    I: ItemRepository,
    S: ImageStore,
{
    pub fn new(items: Arc<I>, store: Arc<S>) -> Self {
        Self { items, store }
    }

    /// Owner or admin only. Image files are removed after the row,
    /// best-effort.
    pub async fn execute(&self, caller: &AuthUser, item_id: &ItemId) -> CatalogResult<()> {
        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or(CatalogError::ItemNotFound)?;

        if !caller.can_manage(&item.owner_id) {
            return Err(CatalogError::AccessDenied);
        }

        if !self.items.delete(item_id).await? {
            return Err(CatalogError::ItemNotFound);
        }

        discard_images(self.store.as_ref(), &item.images).await;

        tracing::info!(item_id = %item_id, user_id = %caller.user_id, "Item deleted");

        Ok(())
    }
}
