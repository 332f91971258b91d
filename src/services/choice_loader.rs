//! Lazily built, per-instance cached category choice lists.

use std::rc::Rc;

use indexmap::IndexMap;

use super::choice_list::{ChoiceList, ValueMapper};
use super::flattener::{flatten, Choices};
use crate::context::AppContext;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{Category, CategoryId, Context};
use crate::repositories::SharedCategoryManager;

/// Loads choice lists on demand for form widgets.
///
/// The value mapper only matters for the call that actually builds the
/// list; implementations cache the first list they build.
pub trait ChoiceLoader {
    /// Build the choice list on first call, return the cached one afterwards.
    fn load_choice_list(
        &mut self,
        value: Option<&ValueMapper<'_>>,
    ) -> Result<Rc<ChoiceList>, AppError>;

    /// Choices for `values`, keyed by input position. Unknown values are dropped.
    fn load_choices_for_values(
        &mut self,
        values: &[String],
        value: Option<&ValueMapper<'_>>,
    ) -> Result<IndexMap<usize, CategoryId>, AppError> {
        Ok(self.load_choice_list(value)?.choices_for_values(values))
    }

    /// Values for `choices`, keyed by input position. Unknown choices are dropped.
    fn load_values_for_choices(
        &mut self,
        choices: &[CategoryId],
        value: Option<&ValueMapper<'_>>,
    ) -> Result<IndexMap<usize, String>, AppError> {
        Ok(self.load_choice_list(value)?.values_for_choices(choices))
    }
}

/// Options understood by [`CategorySelectorChoiceLoader::get_choices`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceOptions {
    /// Context whose root category is listed; `None` lists every root.
    pub context: Option<Context>,
    /// The current category, excluded with its subtree. Without it the
    /// choice list is empty.
    pub category: Option<Category>,
}

impl ChoiceOptions {
    /// Read options from a loosely typed object with `context` and
    /// `category` keys.
    ///
    /// A value that is not a category (wrong shape, wrong type) counts as
    /// no category at all, which yields an empty choice list.
    pub fn from_value(options: &serde_json::Value) -> Self {
        Self {
            context: lenient(options, "context"),
            category: lenient(options, "category"),
        }
    }
}

fn lenient<T: serde::de::DeserializeOwned>(options: &serde_json::Value, key: &str) -> Option<T> {
    let value = options.get(key).filter(|v| !v.is_null())?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(option = key, error = %err, "Ignoring malformed choice option");
            None
        }
    }
}

/// Cache state of a loader.
#[derive(Debug, Clone, Default)]
pub enum ChoiceListState {
    #[default]
    Unloaded,
    Loaded(Rc<ChoiceList>),
}

/// Choice loader listing categories as an indented tree.
///
/// Each instance builds its list once and keeps it for its whole lifetime.
/// The cache is an `Rc`, so an instance stays on the thread that created it;
/// build one loader per form.
///
/// Resolved from an [`AppContext`] with only the manager filled in; set the
/// context and current category with the builder methods.
#[derive(FromContext)]
pub struct CategorySelectorChoiceLoader {
    manager: SharedCategoryManager,
    #[from_context(default)]
    context: Option<Context>,
    #[from_context(default)]
    category: Option<Category>,
    #[from_context(default)]
    state: ChoiceListState,
}

impl CategorySelectorChoiceLoader {
    pub fn new(
        manager: SharedCategoryManager,
        context: Option<Context>,
        category: Option<Category>,
    ) -> Self {
        Self {
            manager,
            context,
            category,
            state: ChoiceListState::Unloaded,
        }
    }

    pub fn with_context(mut self, context: Option<Context>) -> Self {
        self.context = context;
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ChoiceListState::Loaded(_))
    }

    /// Flatten the configured root set into `id -> label`, uncached.
    ///
    /// Returns an empty map when `options.category` is absent. Manager
    /// failures are returned as is.
    pub fn get_choices(&self, options: &ChoiceOptions) -> Result<Choices, AppError> {
        let Some(current) = options.category.as_ref() else {
            tracing::debug!("No current category, returning no choices");
            return Ok(Choices::new());
        };

        let roots = match &options.context {
            None => self.manager.root_categories()?,
            Some(context) => vec![self.manager.root_category(context)?],
        };

        Ok(flatten(&roots, Some(&current.id)))
    }
}

impl ChoiceLoader for CategorySelectorChoiceLoader {
    fn load_choice_list(
        &mut self,
        value: Option<&ValueMapper<'_>>,
    ) -> Result<Rc<ChoiceList>, AppError> {
        if let ChoiceListState::Loaded(list) = &self.state {
            return Ok(Rc::clone(list));
        }

        let choices = self.get_choices(&ChoiceOptions {
            context: self.context.clone(),
            category: self.category.clone(),
        })?;

        // label -> id; a repeated label keeps its first slot and the later id
        let by_label: IndexMap<String, CategoryId> =
            choices.into_iter().map(|(id, label)| (label, id)).collect();

        let list = Rc::new(ChoiceList::new(by_label, value));
        tracing::debug!(
            context = ?self.context.as_ref().map(|c| c.id.as_str()),
            choices = list.len(),
            "Loaded category choice list"
        );

        self.state = ChoiceListState::Loaded(Rc::clone(&list));
        Ok(list)
    }
}
