use std::sync::Arc;

use crate::domain::entity::views::ItemStats;
use crate::domain::repository::ItemRepository;
use crate::error::CatalogResult;

/// Item counts per status (admin)
pub struct ItemStatsUseCase<I>
where
    I: ItemRepository,
{
    items: Arc<I>,
}

impl<I> ItemStatsUseCase<I>
where
    I: ItemRepository,
{
    pub fn new(items: Arc<I>) -> Self {
        Self { items }
    }

    pub async fn execute(&self) -> CatalogResult<ItemStats> {
        self.items.stats().await
    }
}
