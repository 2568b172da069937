//! Catalog store
//!
//! The persistence boundary for records: identity assignment, timestamps,
//! CRUD and search.

pub mod store;

pub use store::CatalogStore;
