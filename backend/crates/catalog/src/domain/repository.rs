//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{EvaluationId, ItemId, UserId};
use kernel::pagination::{Page, PageRequest};

use crate::domain::entity::{
    evaluation::Evaluation,
    item::Item,
    views::{EvaluationStats, EvaluationView, ItemStats, ItemView},
};
use crate::domain::value_object::{
    evaluation_result::EvaluationResult, image_record::ImageRecord, item_status::ItemStatus,
};
use crate::error::CatalogResult;

/// Exact-match filters for item listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub status: Option<ItemStatus>,
    pub owner_id: Option<UserId>,
}

/// Exact-match filters for evaluation listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationFilter {
    pub result: Option<EvaluationResult>,
    pub evaluator_id: Option<UserId>,
}

#[trait_variant::make(ItemRepository: Send)]
pub trait LocalItemRepository {
    async fn create(&self, item: &Item) -> CatalogResult<()>;

    async fn find_by_id(&self, item_id: &ItemId) -> CatalogResult<Option<Item>>;

    /// Persist descriptive fields and append `new_images` to the stored
    /// list. Never touches the status or the images already stored.
    async fn update(&self, item: &Item, new_images: &[ImageRecord]) -> CatalogResult<()>;

    /// Delete the item and its evaluation. Returns false if it did not exist.
    async fn delete(&self, item_id: &ItemId) -> CatalogResult<bool>;

    async fn view(&self, item_id: &ItemId) -> CatalogResult<Option<ItemView>>;

    /// Items newest first
    async fn list(&self, filter: &ItemFilter, page: &PageRequest) -> CatalogResult<Page<ItemView>>;

    async fn stats(&self) -> CatalogResult<ItemStats>;
}

/// Evaluation persistence
///
/// Every write also updates the evaluated item's status, atomically,
/// so the status always equals the derived status of the evaluation
/// (or `pending` without one).
#[trait_variant::make(EvaluationRepository: Send)]
pub trait LocalEvaluationRepository {
    /// Insert and set the item status.
    ///
    /// Fails with `ItemNotFound` for an unknown item and with
    /// `AlreadyEvaluated` if the item already has an evaluation.
    async fn create_with_status(&self, evaluation: &Evaluation) -> CatalogResult<()>;

    async fn find_by_id(&self, evaluation_id: &EvaluationId) -> CatalogResult<Option<Evaluation>>;

    /// Persist a revision and re-derive the item status
    async fn update_with_status(&self, evaluation: &Evaluation) -> CatalogResult<()>;

    /// Delete and reset the item to `pending`. Returns false if it did not exist.
    async fn delete_with_reset(&self, evaluation_id: &EvaluationId) -> CatalogResult<bool>;

    async fn view(&self, evaluation_id: &EvaluationId) -> CatalogResult<Option<EvaluationView>>;

    /// Evaluations newest first
    async fn list(
        &self,
        filter: &EvaluationFilter,
        page: &PageRequest,
    ) -> CatalogResult<Page<EvaluationView>>;

    async fn stats(&self) -> CatalogResult<EvaluationStats>;
}
