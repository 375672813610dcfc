pub mod entity;
pub mod image_store;
pub mod repository;
pub mod value_object;

pub use entity::{evaluation::Evaluation, item::Item};
pub use image_store::ImageStore;
pub use repository::{EvaluationFilter, EvaluationRepository, ItemFilter, ItemRepository};
