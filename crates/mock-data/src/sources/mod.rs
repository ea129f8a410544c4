//! Input sources for mock data generation.
//!
//! - [`CatalogLoader`]: Load the course catalog that seeds the course pool

mod catalog;

pub use catalog::{Catalog, CatalogEntry, CatalogError, CatalogLoader, is_excluded};
