//! Category tree flattening.
//!
//! Turns category trees into an ordered map of category id to indented
//! display label:
//!
//! ```text
//! News (news)
//! -- Sports
//! --- Football
//! -- Weather
//! ```

use indexmap::IndexMap;

use crate::models::{Category, CategoryId};

/// Ordered mapping from category id to display label.
pub type Choices = IndexMap<CategoryId, String>;

/// Depth of a root's direct children, i.e. the dash count of their prefix.
pub const FIRST_CHILD_DEPTH: usize = 2;

/// Label of a root category: `"<name> (<context-id>)"`.
pub fn root_label(category: &Category) -> String {
    format!("{} ({})", category.name, category.context.id)
}

/// Label of a descendant: `depth` dashes, a space, then the category's
/// display form.
pub fn child_label(category: &Category, depth: usize) -> String {
    format!("{} {}", "-".repeat(depth), category)
}

/// Flatten `roots` depth-first in pre-order.
///
/// `exclude` and its whole subtree are left out, wherever it sits (roots
/// included). Ids are expected to be unique. When a child repeats the id of
/// one of its ancestors it is skipped with its subtree and a warning is
/// logged. Any other repeated id overwrites the earlier label and keeps the
/// earlier position.
pub fn flatten(roots: &[Category], exclude: Option<&CategoryId>) -> Choices {
    let mut walker = ChildWalker {
        exclude,
        choices: Choices::new(),
        ancestors: Vec::new(),
    };

    for root in roots {
        if walker.is_excluded(root) {
            continue;
        }
        walker.choices.insert(root.id.clone(), root_label(root));
        walker.ancestors.push(&root.id);
        walker.walk(root, FIRST_CHILD_DEPTH);
        walker.ancestors.pop();
    }

    walker.choices
}

struct ChildWalker<'a> {
    exclude: Option<&'a CategoryId>,
    choices: Choices,
    /// Ids from the current root down to the category being walked.
    ancestors: Vec<&'a CategoryId>,
}

impl<'a> ChildWalker<'a> {
    fn is_excluded(&self, category: &Category) -> bool {
        self.exclude == Some(&category.id)
    }

    fn walk(&mut self, category: &'a Category, depth: usize) {
        let Some(children) = category.children() else {
            return;
        };

        for child in children {
            if self.is_excluded(child) {
                continue;
            }
            if self.ancestors.contains(&&child.id) {
                tracing::warn!(
                    category = %child.id,
                    parent = %category.id,
                    "Category repeats an ancestor id, skipping subtree"
                );
                continue;
            }

            self.choices.insert(child.id.clone(), child_label(child, depth));

            self.ancestors.push(&child.id);
            self.walk(child, depth + 1);
            self.ancestors.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Context;
    use crate::test_support::capture_warnings;

    fn ctx() -> Context {
        Context::new("default")
    }

    fn cat(id: &str, name: &str) -> Category {
        Category::new(id, name, ctx())
    }

    /// A -> [B, C], B -> [D]
    fn sample() -> Category {
        cat("a", "A").with_children(vec![
            cat("b", "B").with_children(vec![cat("d", "D")]),
            cat("c", "C"),
        ])
    }

    fn ids(choices: &Choices) -> Vec<&str> {
        choices.keys().map(CategoryId::as_str).collect()
    }

    #[test]
    fn test_preorder_ordering() {
        let choices = flatten(&[sample()], None);
        assert_eq!(ids(&choices), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_labels_and_indentation() {
        let choices = flatten(&[sample()], None);
        let labels: Vec<_> = choices.values().map(String::as_str).collect();
        assert_eq!(labels, vec!["A (default)", "-- B", "--- D", "-- C"]);
    }

    #[test]
    fn test_child_label_uses_display_form() {
        let root = cat("r", "Root").with_children(vec![cat("x", "")]);
        let choices = flatten(&[root], None);
        assert_eq!(choices[&CategoryId::from("x")], "-- n/a");
    }

    #[test]
    fn test_excluded_subtree_is_omitted() {
        let choices = flatten(&[sample()], Some(&"b".into()));
        assert_eq!(ids(&choices), vec!["a", "c"]);
    }

    #[test]
    fn test_excluded_root_is_omitted() {
        let other = cat("z", "Z").with_children(vec![cat("y", "Y")]);
        let choices = flatten(&[sample(), other], Some(&"a".into()));
        assert_eq!(ids(&choices), vec!["z", "y"]);
    }

    #[test]
    fn test_missing_children_collection_is_leaf() {
        let root = cat("r", "Root").with_children(vec![cat("x", "X").without_children()]);
        let choices = flatten(&[root.without_children()], None);
        assert_eq!(ids(&choices), vec!["r"]);

        let root = cat("r", "Root").with_children(vec![cat("x", "X").without_children()]);
        let choices = flatten(&[root], None);
        assert_eq!(ids(&choices), vec!["r", "x"]);
    }

    #[test]
    fn test_roots_without_children() {
        let roots = vec![
            Category::new("1", "News", Context::new("news")),
            Category::new("2", "Blog", Context::new("blog")),
        ];
        let choices = flatten(&roots, None);
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[&CategoryId::from("1")], "News (news)");
        assert_eq!(choices[&CategoryId::from("2")], "Blog (blog)");
    }

    #[test]
    fn test_one_entry_per_node() {
        let roots = vec![sample(), cat("z", "Z").with_children(vec![cat("y", "Y")])];
        let total: usize = roots.iter().map(Category::subtree_len).sum();
        assert_eq!(flatten(&roots, None).len(), total);
    }

    #[test]
    fn test_exclusion_never_leaks_descendants() {
        let root = sample();
        for node in ["a", "b", "c", "d"] {
            let excluded = root.find(&node.into()).unwrap();
            let mut subtree = Vec::new();
            collect(excluded, &mut subtree);

            let choices = flatten(std::slice::from_ref(&root), Some(&node.into()));
            for id in &subtree {
                assert!(!choices.contains_key(id), "{id} leaked when excluding {node}");
            }
            assert_eq!(choices.len(), root.subtree_len() - subtree.len());
        }
    }

    fn collect(category: &Category, into: &mut Vec<CategoryId>) {
        into.push(category.id.clone());
        for child in category.children().unwrap_or_default() {
            collect(child, into);
        }
    }

    #[test]
    fn test_duplicate_id_overwrites_in_place() {
        let root = cat("a", "A").with_children(vec![
            cat("dup", "First"),
            cat("b", "B").with_children(vec![cat("dup", "Second")]),
        ]);
        let choices = flatten(&[root], None);
        assert_eq!(ids(&choices), vec!["a", "dup", "b"]);
        assert_eq!(choices[&CategoryId::from("dup")], "--- Second");
    }

    #[test]
    fn test_child_repeating_ancestor_id_is_skipped_and_logged() {
        // b lists a category with its ancestor's id as a child
        let again = cat("a", "Again").with_children(vec![cat("c", "C")]);
        let root = cat("a", "A").with_children(vec![cat("b", "B").with_children(vec![again])]);

        let (choices, warnings) = capture_warnings(|| flatten(&[root], None));
        assert_eq!(ids(&choices), vec!["a", "b"]);
        assert_eq!(choices[&CategoryId::from("a")], "A (default)");
        assert_eq!(
            warnings,
            vec!["Category repeats an ancestor id, skipping subtree"]
        );
    }

    #[test]
    fn test_repeated_non_ancestor_id_does_not_warn() {
        let root = cat("a", "A").with_children(vec![
            cat("dup", "First"),
            cat("b", "B").with_children(vec![cat("dup", "Second")]),
        ]);
        let (_, warnings) = capture_warnings(|| flatten(&[root], None));
        assert!(warnings.is_empty());
    }
}
