//! Immutable choice lists consumed by form widgets.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::CategoryId;

/// Generates the string value submitted for a choice.
pub type ValueMapper<'a> = dyn Fn(&CategoryId) -> String + 'a;

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceView<'a> {
    pub value: &'a str,
    pub label: &'a str,
    pub choice: &'a CategoryId,
}

/// Ordered, bidirectional mapping between string values and choices.
///
/// Values default to the category id. When a value mapper yields the same
/// value twice, the later choice replaces the earlier one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceList {
    /// value -> choice
    choices: IndexMap<String, CategoryId>,
    /// value -> label
    labels: IndexMap<String, String>,
    /// choice -> first value producing it
    values_by_choice: HashMap<CategoryId, String>,
}

impl ChoiceList {
    /// Build a list from `label -> choice` pairs, in order.
    pub fn new(choices: IndexMap<String, CategoryId>, value: Option<&ValueMapper<'_>>) -> Self {
        let mut list = Self {
            choices: IndexMap::with_capacity(choices.len()),
            labels: IndexMap::with_capacity(choices.len()),
            values_by_choice: HashMap::with_capacity(choices.len()),
        };

        for (label, choice) in choices {
            let choice_value = match value {
                Some(mapper) => mapper(&choice),
                None => choice.to_string(),
            };
            list.labels.insert(choice_value.clone(), label);
            list.choices.insert(choice_value, choice);
        }

        for (choice_value, choice) in &list.choices {
            list.values_by_choice
                .entry(choice.clone())
                .or_insert_with(|| choice_value.clone());
        }

        list
    }

    /// value -> choice, in display order.
    pub fn choices(&self) -> &IndexMap<String, CategoryId> {
        &self.choices
    }

    /// value -> label, in display order.
    pub fn labels(&self) -> &IndexMap<String, String> {
        &self.labels
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.choices.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = ChoiceView<'_>> {
        self.choices.iter().map(|(value, choice)| ChoiceView {
            value,
            label: self.labels.get(value).map(String::as_str).unwrap_or_default(),
            choice,
        })
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Choices for the given values, keyed by input position.
    ///
    /// Unknown values are dropped; order follows the input.
    pub fn choices_for_values<S: AsRef<str>>(&self, values: &[S]) -> IndexMap<usize, CategoryId> {
        values
            .iter()
            .enumerate()
            .filter_map(|(i, value)| {
                self.choices
                    .get(value.as_ref())
                    .map(|choice| (i, choice.clone()))
            })
            .collect()
    }

    /// Values for the given choices, keyed by input position.
    ///
    /// Unknown choices are dropped; order follows the input.
    pub fn values_for_choices(&self, choices: &[CategoryId]) -> IndexMap<usize, String> {
        choices
            .iter()
            .enumerate()
            .filter_map(|(i, choice)| {
                self.values_by_choice
                    .get(choice)
                    .map(|value| (i, value.clone()))
            })
            .collect()
    }
}
