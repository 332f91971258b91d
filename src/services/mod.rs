//! Choice list services for category selector widgets.
//!
//! - `flattener`: category trees to ordered, indented `id -> label` maps
//! - `choice_list`: immutable value/choice/label lists
//! - `choice_loader`: lazily built, cached lists per loader instance

mod choice_list;
mod choice_loader;
mod flattener;

pub use choice_list::{ChoiceList, ChoiceView, ValueMapper};
pub use choice_loader::{
    CategorySelectorChoiceLoader, ChoiceListState, ChoiceLoader, ChoiceOptions,
};
pub use flattener::{child_label, flatten, root_label, Choices, FIRST_CHILD_DEPTH};
