//! Taxonomy documents: flat category records turned into category trees.
//!
//! A document lists contexts and categories; hierarchy comes from each
//! record's `parent`:
//!
//! ```toml
//! [[contexts]]
//! id = "news"
//! name = "News"
//!
//! [[categories]]
//! id = "root"
//! name = "All news"
//! context = "news"
//!
//! [[categories]]
//! id = "sports"
//! name = "Sports"
//! context = "news"
//! parent = "root"
//! position = 1
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use figment::{
    providers::{Format, Json, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use super::CategoryRepository;
use crate::config::ConfigError;
use crate::error::AppError;
use crate::models::{Category, CategoryId, Context};

/// Serialized form of a taxonomy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyDocument {
    #[serde(default)]
    pub contexts: Vec<Context>,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
}

/// One category row, parent referenced by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    /// Context id.
    pub context: String,
    #[serde(default)]
    pub parent: Option<CategoryId>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl TaxonomyDocument {
    /// Read a document from disk. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        };

        parsed.map_err(|source| AppError::TaxonomyFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(Figment::from(Toml::string(content)).extract()?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(Figment::from(Json::string(content)).extract()?)
    }

    /// Build category trees and wrap them in a repository.
    ///
    /// Fails on duplicate ids, unknown parents, parents in another context
    /// and parent cycles.
    pub fn build(self) -> Result<CategoryRepository, AppError> {
        let mut contexts = self.contexts;
        let mut seen_contexts: HashSet<String> = contexts.iter().map(|c| c.id.clone()).collect();
        for record in &self.categories {
            if seen_contexts.insert(record.context.clone()) {
                contexts.push(Context::new(record.context.clone()));
            }
        }
        let context_by_id: HashMap<&str, &Context> =
            contexts.iter().map(|c| (c.id.as_str(), c)).collect();

        let mut by_id: HashMap<&CategoryId, &CategoryRecord> = HashMap::new();
        for record in &self.categories {
            if by_id.insert(&record.id, record).is_some() {
                return Err(AppError::InvalidTaxonomy(format!(
                    "duplicate category id '{}'",
                    record.id
                )));
            }
        }

        // Children per parent, file order; sorted by position below (stable).
        let mut children: HashMap<&CategoryId, Vec<&CategoryRecord>> = HashMap::new();
        let mut roots: Vec<&CategoryRecord> = Vec::new();
        for record in &self.categories {
            match &record.parent {
                None => roots.push(record),
                Some(parent_id) => {
                    let parent = by_id.get(parent_id).ok_or_else(|| {
                        AppError::InvalidTaxonomy(format!(
                            "category '{}' references unknown parent '{}'",
                            record.id, parent_id
                        ))
                    })?;
                    if parent.context != record.context {
                        return Err(AppError::InvalidTaxonomy(format!(
                            "category '{}' (context '{}') has parent '{}' in context '{}'",
                            record.id, record.context, parent_id, parent.context
                        )));
                    }
                    children.entry(parent_id).or_default().push(record);
                }
            }
        }
        for siblings in children.values_mut() {
            siblings.sort_by_key(|r| r.position);
        }

        let builder = TreeBuilder {
            contexts: &context_by_id,
            children: &children,
        };
        let trees = roots
            .iter()
            .map(|record| builder.build(record))
            .collect::<Result<Vec<_>, _>>()?;

        // Records never reached from a root sit on a parent cycle.
        let reachable: usize = trees.iter().map(Category::subtree_len).sum();
        if reachable != self.categories.len() {
            let mut reached = HashSet::new();
            for tree in &trees {
                collect_ids(tree, &mut reached);
            }
            let stranded = self
                .categories
                .iter()
                .find(|r| !reached.contains(&r.id))
                .map(|r| r.id.to_string())
                .unwrap_or_default();
            return Err(AppError::InvalidTaxonomy(format!(
                "category '{}' is part of a parent cycle",
                stranded
            )));
        }

        tracing::debug!(
            contexts = contexts.len(),
            categories = reachable,
            roots = trees.len(),
            "Built taxonomy"
        );

        Ok(CategoryRepository::new(contexts, trees))
    }
}

struct TreeBuilder<'a> {
    contexts: &'a HashMap<&'a str, &'a Context>,
    children: &'a HashMap<&'a CategoryId, Vec<&'a CategoryRecord>>,
}

impl TreeBuilder<'_> {
    fn build(&self, record: &CategoryRecord) -> Result<Category, AppError> {
        let context = self
            .contexts
            .get(record.context.as_str())
            .map(|c| (*c).clone())
            .ok_or_else(|| {
                AppError::InvalidTaxonomy(format!("unknown context '{}'", record.context))
            })?;

        let children = self
            .children
            .get(&record.id)
            .map(|records| {
                records
                    .iter()
                    .map(|r| self.build(r))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Category {
            id: record.id.clone(),
            name: record.name.clone(),
            context,
            description: record.description.clone(),
            enabled: record.enabled,
            position: record.position,
            children: Some(children),
        })
    }
}

fn collect_ids(category: &Category, into: &mut HashSet<CategoryId>) {
    into.insert(category.id.clone());
    for child in category.children().unwrap_or_default() {
        collect_ids(child, into);
    }
}
