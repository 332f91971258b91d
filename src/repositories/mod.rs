//! Data access layer for category taxonomies.
//!
//! [`CategoryManager`] is the seam choice loaders depend on;
//! [`CategoryRepository`] implements it over trees built from a
//! [`TaxonomyDocument`].

mod category;
mod taxonomy;

pub use category::{CategoryManager, CategoryRepository, SharedCategoryManager};
pub use taxonomy::{CategoryRecord, TaxonomyDocument};
