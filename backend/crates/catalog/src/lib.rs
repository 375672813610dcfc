//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Items, evaluations, repository and storage traits
//! - `application/` - Use cases, upload validation
//! - `infra/` - PostgreSQL repository, on-disk image store
//! - `presentation/` - HTTP handlers, DTOs, multipart extractor, router
//!
//! ## Features
//! - Users submit items with up to ten JPEG/PNG images
//! - Admins record one evaluation per item; its verdict drives the item
//!   status (`authentic` approves, `fake` rejects, `inconclusive` leaves
//!   it pending)
//! - Public read-only listings with optional authentication
//!
//! Evaluation writes and the status they imply are committed together.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use infra::{DiskImageStore, PgCatalogRepository};
pub use presentation::router::{catalog_router, catalog_router_generic};
