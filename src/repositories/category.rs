//! Category manager abstraction and its in-memory repository.

use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Category, CategoryId, Context};

/// Source of category trees.
///
/// Only the two lookups a choice list needs. Children are reached through
/// [`Category::children`], not through the manager.
pub trait CategoryManager {
    /// Root categories of every context.
    fn root_categories(&self) -> Result<Vec<Category>, AppError>;

    /// The root category of one context.
    fn root_category(&self, context: &Context) -> Result<Category, AppError>;
}

/// Manager handle stored in the application context.
pub type SharedCategoryManager = Arc<dyn CategoryManager + Send + Sync>;

/// Repository holding fully built category trees in memory.
///
/// Roots are kept in context declaration order, then by position.
#[derive(Debug, Clone, Default)]
pub struct CategoryRepository {
    contexts: Vec<Context>,
    roots: Vec<Category>,
}

impl CategoryRepository {
    /// Create a repository from contexts and root trees.
    ///
    /// Roots are stably sorted by the declaration order of their context,
    /// then by position. Roots of undeclared contexts go last.
    pub fn new(contexts: Vec<Context>, mut roots: Vec<Category>) -> Self {
        let rank = |root: &Category| {
            contexts
                .iter()
                .position(|c| c.id == root.context.id)
                .unwrap_or(contexts.len())
        };
        roots.sort_by_key(|root| (rank(root), root.position));

        Self { contexts, roots }
    }

    /// List all contexts.
    pub fn list_contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// Find a context by id.
    pub fn find_context(&self, id: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.id == id)
    }

    /// Root categories of one context, in order.
    pub fn roots_for_context<'a>(
        &'a self,
        context: &'a Context,
    ) -> impl Iterator<Item = &'a Category> + 'a {
        self.roots
            .iter()
            .filter(move |root| root.context.id == context.id)
    }

    /// Find a category anywhere in the taxonomy.
    pub fn find_by_id(&self, id: &CategoryId) -> Result<Category, AppError> {
        self.roots
            .iter()
            .find_map(|root| root.find(id))
            .cloned()
            .ok_or_else(|| AppError::CategoryNotFound(id.to_string()))
    }

    /// Total number of categories across all trees.
    pub fn len(&self) -> usize {
        self.roots.iter().map(Category::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl CategoryManager for CategoryRepository {
    fn root_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.roots.clone())
    }

    fn root_category(&self, context: &Context) -> Result<Category, AppError> {
        self.roots_for_context(context)
            .next()
            .cloned()
            .ok_or_else(|| AppError::RootCategoryNotFound(context.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> CategoryRepository {
        let news = Context::new("news");
        let blog = Context::new("blog");

        CategoryRepository::new(
            vec![news.clone(), blog.clone()],
            vec![
                Category::new("blog-root", "Blog", blog.clone()),
                Category::new("news-second", "Archive", news.clone()).with_position(2),
                Category::new("news-root", "News", news.clone())
                    .with_position(1)
                    .with_children(vec![Category::new("sports", "Sports", news)]),
            ],
        )
    }

    #[test]
    fn test_roots_follow_context_order_then_position() {
        let roots = repository().root_categories().unwrap();
        let ids: Vec<_> = roots.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["news-root", "news-second", "blog-root"]);
    }

    #[test]
    fn test_root_category_is_first_root_of_context() {
        let repo = repository();
        let root = repo.root_category(&Context::new("news")).unwrap();
        assert_eq!(root.id.as_str(), "news-root");

        let root = repo.root_category(&Context::new("blog")).unwrap();
        assert_eq!(root.id.as_str(), "blog-root");
    }

    #[test]
    fn test_root_category_unknown_context() {
        let err = repository()
            .root_category(&Context::new("missing"))
            .unwrap_err();
        assert!(matches!(err, AppError::RootCategoryNotFound(ref id) if id == "missing"));
    }

    #[test]
    fn test_find_by_id_searches_subtrees() {
        let repo = repository();
        assert_eq!(repo.find_by_id(&"sports".into()).unwrap().name, "Sports");
        assert!(matches!(
            repo.find_by_id(&"nope".into()),
            Err(AppError::CategoryNotFound(_))
        ));
        assert_eq!(repo.len(), 4);
        assert!(repo.find_context("blog").is_some());
    }
}
