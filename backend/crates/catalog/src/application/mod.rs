//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_item;
pub mod delete_item;
pub mod evaluation_stats;
pub mod get_evaluation;
pub mod get_item;
pub mod item_input;
pub mod item_stats;
pub mod list_evaluations;
pub mod list_items;
pub mod retract_evaluation;
pub mod revise_evaluation;
pub mod submit_evaluation;
pub mod update_item;
pub mod upload;

// Re-exports
pub use config::CatalogConfig;
pub use create_item::{CreateItemInput, CreateItemUseCase};
pub use delete_item::DeleteItemUseCase;
pub use evaluation_stats::EvaluationStatsUseCase;
pub use get_evaluation::GetEvaluationUseCase;
pub use get_item::GetItemUseCase;
pub use item_input::ItemFields;
pub use item_stats::ItemStatsUseCase;
pub use list_evaluations::{ListEvaluationsInput, ListEvaluationsOutput, ListEvaluationsUseCase};
pub use list_items::{ListItemsInput, ListItemsOutput, ListItemsUseCase};
pub use retract_evaluation::RetractEvaluationUseCase;
pub use revise_evaluation::{ReviseEvaluationInput, ReviseEvaluationUseCase};
pub use submit_evaluation::{SubmitEvaluationInput, SubmitEvaluationUseCase};
pub use update_item::{UpdateItemInput, UpdateItemUseCase};
pub use upload::IncomingImage;
