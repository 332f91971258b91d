//! Domain models for category taxonomies.

mod category;
mod context;

pub use category::{Category, CategoryId};
pub use context::Context;
