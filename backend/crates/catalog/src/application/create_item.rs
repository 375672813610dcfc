//! Create Item Use Case
//!
//! Fields and files are validated before the first file is written.

use std::sync::Arc;

use auth::AuthUser;

use crate::application::config::CatalogConfig;
use crate::application::item_input::ItemFields;
use crate::application::upload::{IncomingImage, discard_images, store_images, validate_batch};
use crate::domain::entity::{item::Item, views::ItemView};
use crate::domain::image_store::ImageStore;
use crate::domain::repository::ItemRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct CreateItemInput {
    pub fields: ItemFields,
    pub images: Vec<IncomingImage>,
}

pub struct CreateItemUseCase<I, S>
where
    I: ItemRepository,
    S: ImageStore,
{
    items: Arc<I>,
    store: Arc<S>,
    config: Arc<CatalogConfig>,
}

impl<I, S> CreateItemUseCase<I, S>
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

    pub async fn execute(&self, owner: &AuthUser, input: CreateItemInput) -> CatalogResult<ItemView> {
        let draft = input.fields.into_draft()?;
        validate_batch(&self.config, &input.images)?;

        let images = store_images(self.store.as_ref(), input.images).await?;
        let item = Item::new(owner.user_id, draft, images);

        if let Err(e) = self.items.create(&item).await {
            discard_images(self.store.as_ref(), &item.images).await;
            return Err(e);
        }

        tracing::info!(
            item_id = %item.item_id,
            user_id = %owner.user_id,
            images = item.images.len(),
            "Item created"
        );

        self.items
            .view(&item.item_id)
            .await?
            .ok_or_else(|| CatalogError::Internal("Created item is missing".to_string()))
    }
}
