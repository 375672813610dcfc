//! List Items Use Case

use std::sync::Arc;

use kernel::pagination::{PageInfo, PageRequest};

use crate::domain::entity::views::ItemView;
use crate::domain::repository::{ItemFilter, ItemRepository};
use crate::error::CatalogResult;

pub struct ListItemsInput {
    pub filter: ItemFilter,
    pub page: PageRequest,
}

#[derive(Debug)]
pub struct ListItemsOutput {
    pub items: Vec<ItemView>,
    pub pagination: PageInfo,
}

pub struct ListItemsUseCase<I>
where
    I: ItemRepository,
{
    items: Arc<I>,
}

impl<I> ListItemsUseCase<I>
where
    I: ItemRepository,
{
    pub fn new(items: Arc<I>) -> Self {
        Self { items }
    }

    pub async fn execute(&self, input: ListItemsInput) -> CatalogResult<ListItemsOutput> {
        let page = self.items.list(&input.filter, &input.page).await?;

        Ok(ListItemsOutput {
            pagination: input.page.info(page.total),
            items: page.rows,
        })
    }
}
