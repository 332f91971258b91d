//! category-selector - hierarchical category choice lists
//!
//! Flattens category trees into ordered, indented choice lists for form
//! widgets, built lazily and cached per loader.

pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;

#[cfg(test)]
mod test_support;
