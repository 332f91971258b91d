//! Compile-time dependency injection macros for category-selector.
//!
//! - `#[derive(Context)]` exposes every field of an application context
//! - `#[derive(FromContext)]` builds a component from a context
//!
//! Generated code refers to `crate::FromRef`, so the consuming crate must
//! re-export that trait at its root.

use proc_macro::TokenStream;

mod context;
mod from_context;

/// Derive macro for an application context.
///
/// Generates one `FromRef<Self>` implementation per field, cloning the field
/// out of the context. All field types must be `Clone` and distinct.
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct AppContext {
///     pub manager: SharedCategoryManager,
///     pub config: Arc<Config>,
/// }
///
/// // impl FromRef<AppContext> for SharedCategoryManager { ... }
/// // impl FromRef<AppContext> for Arc<Config> { ... }
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Derive macro for components resolved from a context.
///
/// Every field is resolved with `FromRef::from_ref(ctx)` unless it carries
/// `#[from_context(default)]`, in which case it starts as
/// `Default::default()`. That keeps per-instance state (caches, options)
/// out of the shared context.
///
/// The context type defaults to `AppContext` and can be overridden with
/// `#[from_context(Context = "path::To::Context")]` on the struct.
///
/// ```ignore
/// #[derive(FromContext)]
/// pub struct CategorySelectorChoiceLoader {
///     manager: SharedCategoryManager,
///     #[from_context(default)]
///     state: ChoiceListState,
/// }
/// ```
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}
