//! Dependency injection infrastructure.
//!
//! - `FromRef<T>`: extract a value from a reference to `T`
//! - `#[derive(Context)]`: makes each field of the application context extractable
//! - `#[derive(FromContext)]`: builds a component from the context, field by field
//!
//! ```ignore
//! let ctx = AppContext::new(repository, config);
//! let loader = ctx
//!     .resolve::<CategorySelectorChoiceLoader>()
//!     .with_category(Some(current));
//! ```

/// Trait for extracting a value from a reference to another type.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Any Clone type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

// Re-export derive macros
pub use di_macros::{Context, FromContext};
