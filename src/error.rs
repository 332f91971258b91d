//! Application error types.

use std::path::PathBuf;

use thiserror::Error;

/// Application-level errors for category-selector.
#[derive(Error, Debug)]
pub enum AppError {
    // Domain errors
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("No root category for context: {0}")]
    RootCategoryNotFound(String),

    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),

    // Taxonomy document errors
    #[error("Failed to read taxonomy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed taxonomy document {path}: {source}")]
    TaxonomyFormat {
        path: PathBuf,
        #[source]
        source: crate::config::ConfigError,
    },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
