//! Taxonomy context model.

use serde::{Deserialize, Serialize};

/// A taxonomy namespace. Categories of different contexts never share a tree.
///
/// Deserializes from either a bare id (`"news"`) or a full object
/// (`{ "id": "news", "name": "News" }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ContextRepr")]
pub struct Context {
    /// Context identifier (e.g., "default", "news").
    pub id: String,
    /// Human-readable name. Defaults to the id.
    pub name: String,
    /// Whether the context is enabled. Informational only.
    pub enabled: bool,
}

impl Context {
    /// Create an enabled context named after its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            enabled: true,
        }
    }

    /// Set the human-readable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContextRepr {
    Id(String),
    Full {
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default = "enabled_by_default")]
        enabled: bool,
    },
}

fn enabled_by_default() -> bool {
    true
}

impl From<ContextRepr> for Context {
    fn from(repr: ContextRepr) -> Self {
        match repr {
            ContextRepr::Id(id) => Context::new(id),
            ContextRepr::Full { id, name, enabled } => Context {
                name: name.unwrap_or_else(|| id.clone()),
                id,
                enabled,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_from_bare_id() {
        let ctx: Context = serde_json::from_str("\"news\"").unwrap();
        assert_eq!(ctx, Context::new("news"));
        assert_eq!(ctx.name, "news");
    }

    #[test]
    fn test_context_from_object() {
        let ctx: Context =
            serde_json::from_str(r#"{"id": "news", "name": "News", "enabled": false}"#).unwrap();
        assert_eq!(ctx.id(), "news");
        assert_eq!(ctx.name, "News");
        assert!(!ctx.enabled);
    }

    #[test]
    fn test_context_display_is_id() {
        let ctx = Context::new("default").with_name("Default");
        assert_eq!(ctx.to_string(), "default");
    }
}
