//! Infrastructure Layer
//!
//! PostgreSQL repositories and the on-disk image store.

pub mod disk;
pub mod postgres;

pub use disk::DiskImageStore;
pub use postgres::PgCatalogRepository;
