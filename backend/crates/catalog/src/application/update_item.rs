//! Update Item Use Case
//!
//! Owner or admin only. New uploads are appended to the existing images.

use std::sync::Arc;

use auth::AuthUser;
use kernel::id::ItemId;

use crate::application::config::CatalogConfig;
use crate::application::item_input::ItemFields;
use crate::application::upload::{IncomingImage, discard_images, store_images, validate_batch};
use crate::domain::entity::views::ItemView;
use crate::domain::image_store::ImageStore;
use crate::domain::repository::ItemRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct UpdateItemInput {
    pub fields: ItemFields,
    pub images: Vec<IncomingImage>,
}

pub struct UpdateItemUseCase<I, S>
where
    I: ItemRepository,
    S: ImageStore,
{
    items: Arc<I>,
    store: Arc<S>,
    config: Arc<CatalogConfig>,
}

impl<I, S> UpdateItemUseCase<I, S>
where
    I: ItemRepository,
    S: ImageStore,
{
    pub fn new(items: Arc<I>, store: Arc<S>, config: Arc<CatalogConfig>) -> Self {
        Self {
            items,
            store,
            config,
        }
    }

    pub async fn execute(
        &self,
        caller: &AuthUser,
        item_id: &ItemId,
        input: UpdateItemInput,
    ) -> CatalogResult<ItemView> {
        let mut item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or(CatalogError::ItemNotFound)?;

        if !caller.can_manage(&item.owner_id) {
            return Err(CatalogError::AccessDenied);
        }

        let patch = input.fields.into_patch()?;
        validate_batch(&self.config, &input.images)?;

        let new_images = store_images(self.store.as_ref(), input.images).await?;

        item.apply(patch);

        if let Err(e) = self.items.update(&item, &new_images).await {
            discard_images(self.store.as_ref(), &new_images).await;
            return Err(e);
        }

        tracing::info!(
            item_id = %item.item_id,
            user_id = %caller.user_id,
            added_images = new_images.len(),
            "Item updated"
        );

        self.items
            .view(&item.item_id)
            .await?
            .ok_or(CatalogError::ItemNotFound)
    }
}
