//! Category model for hierarchical taxonomies.

use serde::{Deserialize, Deserializer, Serialize};

use super::Context;

/// Stable category identifier.
///
/// Accepts both strings and integers when deserialized, since taxonomies
/// exported from relational stores usually carry numeric ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for CategoryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Signed(n) => Self(n.to_string()),
            Raw::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// A node in a category tree.
///
/// `children` distinguishes "no collection" (`None`) from an empty one;
/// both are leaves as far as choice lists are concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// The context (taxonomy namespace) this category belongs to.
    pub context: Context,
    /// Optional description of what this category represents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Sort key among siblings.
    #[serde(default)]
    pub position: i32,
    /// Ordered children.
    #[serde(default)]
    pub children: Option<Vec<Category>>,
}

fn enabled_by_default() -> bool {
    true
}

impl Category {
    /// Create an enabled category with an empty children collection.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, context: Context) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            context,
            description: None,
            enabled: true,
            position: 0,
            children: Some(Vec::new()),
        }
    }

    pub fn with_children(mut self, children: Vec<Category>) -> Self {
        self.children = Some(children);
        self
    }

    /// Drop the children collection entirely (`children()` yields `None`).
    pub fn without_children(mut self) -> Self {
        self.children = None;
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn children(&self) -> Option<&[Category]> {
        self.children.as_deref()
    }

    /// Find a category by id in this subtree (self included), depth-first.
    pub fn find(&self, id: &CategoryId) -> Option<&Category> {
        if &self.id == id {
            return Some(self);
        }
        self.children()
            .unwrap_or_default()
            .iter()
            .find_map(|child| child.find(id))
    }

    /// Number of categories in this subtree, self included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children()
            .unwrap_or_default()
            .iter()
            .map(Category::subtree_len)
            .sum::<usize>()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            f.write_str("n/a")
        } else {
            f.write_str(&self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::new("default")
    }

    #[test]
    fn test_category_id_accepts_numbers() {
        let id: CategoryId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");

        let id: CategoryId = serde_json::from_str("\"news\"").unwrap();
        assert_eq!(id, CategoryId::from("news"));
    }

    #[test]
    fn test_display_falls_back_for_empty_name() {
        assert_eq!(Category::new("1", "Sports", ctx()).to_string(), "Sports");
        assert_eq!(Category::new("2", "", ctx()).to_string(), "n/a");
    }

    #[test]
    fn test_children_none_vs_empty() {
        let leaf = Category::new("1", "Leaf", ctx());
        assert_eq!(leaf.children(), Some(&[][..]));

        let bare = leaf.without_children();
        assert!(bare.children().is_none());
    }

    #[test]
    fn test_find_and_subtree_len() {
        let tree = Category::new("a", "A", ctx()).with_children(vec![
            Category::new("b", "B", ctx())
                .with_children(vec![Category::new("d", "D", ctx()).without_children()]),
            Category::new("c", "C", ctx()),
        ]);

        assert_eq!(tree.subtree_len(), 4);
        assert_eq!(tree.find(&"d".into()).map(Category::name), Some("D"));
        assert!(tree.find(&"z".into()).is_none());
    }

    #[test]
    fn test_deserialize_minimal_category() {
        let cat: Category =
            serde_json::from_str(r#"{"id": 7, "name": "News", "context": "default"}"#).unwrap();
        assert_eq!(cat.id.as_str(), "7");
        assert_eq!(cat.context, ctx());
        assert!(cat.enabled);
        assert!(cat.children().is_none());
    }

    #[test]
    fn test_deserialize_rejects_incomplete_category() {
        let result: Result<Category, _> = serde_json::from_str(r#"{"id": 7}"#);
        assert!(result.is_err());
    }
}
