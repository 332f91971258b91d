//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::{Context as ContextDerive, FromRef};
use crate::error::AppError;
use crate::repositories::{CategoryRepository, SharedCategoryManager, TaxonomyDocument};

/// Root application context for dependency injection.
///
/// `#[derive(Context)]` generates a `FromRef` implementation for each field,
/// so components such as the choice loader resolve their dependencies at
/// compile time.
#[derive(ContextDerive, Clone)]
pub struct AppContext {
    /// Concrete taxonomy repository, for lookups beyond the manager seam.
    pub repository: Arc<CategoryRepository>,
    /// The same repository seen through the manager trait.
    pub manager: SharedCategoryManager,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppContext {
    /// Creates a new context around a built repository.
    pub fn new(repository: CategoryRepository, config: Config) -> Self {
        let repository = Arc::new(repository);
        Self {
            manager: repository.clone(),
            repository,
            config: Arc::new(config),
        }
    }

    /// Load the taxonomy named by `config.taxonomy.path` and build a context.
    pub fn load(config: Config) -> Result<Self, AppError> {
        tracing::info!(path = %config.taxonomy.path.display(), "Loading taxonomy");
        let repository = TaxonomyDocument::from_path(&config.taxonomy.path)?.build()?;
        tracing::info!(
            contexts = repository.list_contexts().len(),
            categories = repository.len(),
            "Taxonomy loaded"
        );
        Ok(Self::new(repository, config))
    }

    /// Resolve a dependency from the context.
    pub fn resolve<T: FromRef<AppContext>>(&self) -> T {
        T::from_ref(self)
    }
}
