//! bare - DOM convenience helpers
//!
//! Thin layer over [`bare_dom`]: selector shortcuts with a fast path for
//! `#id`, `.class` and `tag`, class-list helpers that take one element or a
//! collection, and iteration helpers with early exit. Integration with the
//! host environment (global aliases, prototype methods) is opt-in through
//! [`Environment`].
//!
//! ```rust,ignore
//! use bare::{Bare, Context, Environment};
//!
//! let mut doc = bare_html::parse(r#"<div id="app"><p class="note">hi</p></div>"#)?;
//! let note = Bare::query_single(&doc, ".note", Context::Document)?;
//! Bare::add_class(&mut doc, "seen", note)?;
//!
//! let mut env = Environment::new();
//! if env.enable_global_shortcut(false) {
//!     let dollar = env.shortcut_single().unwrap();
//!     assert_eq!(dollar(&doc, "#app", Context::Document)?, doc.get_element_by_id("app"));
//! }
//! ```

pub mod class_list;
pub mod config;
pub mod env;
mod error;
pub mod iter;
pub mod select;

pub use class_list::{HasClass, Targets};
pub use config::Options;
pub use env::{ElementMethod, Environment, Extended, Global, Info, PrototypeTable, TypeTag};
pub use error::{BareError, BareResult};
pub use select::{Context, QueryAllFn, QuerySingleFn};

use bare_dom::{Document, DomResult, NodeId, NodeList};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Static namespace for the library operations.
///
/// It cannot be constructed; every operation is an associated function.
#[derive(Debug)]
pub struct Bare {
    _sealed: (),
}

impl Bare {
    /// Always fails: `Bare` is a namespace, not an object
    pub fn new() -> BareResult<Bare> {
        Err(BareError::Usage("Bare is a static namespace and cannot be instantiated".to_string()))
    }

    pub fn version() -> &'static str {
        VERSION
    }

    pub fn query_all(doc: &Document, selector: &str, context: Context) -> DomResult<NodeList> {
        select::query_all(doc, selector, context)
    }

    pub fn query_single(doc: &Document, selector: &str, context: Context) -> DomResult<Option<NodeId>> {
        select::query_single(doc, selector, context)
    }

    pub fn is_simple_selector(selector: &str) -> bool {
        select::is_simple_selector(selector)
    }

    pub fn for_each<I, F>(iterable: I, visit: F)
    where
        I: IntoIterator,
        F: FnMut(I::Item, usize),
    {
        iter::for_each(iterable, visit)
    }

    pub fn any<I, F>(iterable: I, predicate: F) -> bool
    where
        I: IntoIterator,
        F: FnMut(I::Item, usize) -> bool,
    {
        iter::any(iterable, predicate)
    }

    pub fn add_class(doc: &mut Document, name: &str, target: impl Into<Targets>) -> DomResult<()> {
        class_list::add_class(doc, name, target)
    }

    pub fn remove_class(doc: &mut Document, name: &str, target: impl Into<Targets>) -> DomResult<()> {
        class_list::remove_class(doc, name, target)
    }

    pub fn toggle_class(
        doc: &mut Document,
        name: &str,
        target: impl Into<Targets>,
        force: bool,
    ) -> DomResult<()> {
        class_list::toggle_class(doc, name, target, force)
    }

    pub fn has_class(doc: &Document, name: &str, target: impl Into<Targets>) -> DomResult<HasClass> {
        class_list::has_class(doc, name, target)
    }

    pub fn has_class_each(doc: &Document, name: &str, target: impl Into<Targets>) -> DomResult<Vec<bool>> {
        class_list::has_class_each(doc, name, target)
    }

    pub fn enable_global_shortcut(env: &mut Environment, force: bool) -> bool {
        env.enable_global_shortcut(force)
    }

    pub fn enable_prototype_extensions(env: &mut Environment) -> bool {
        env.enable_prototype_extensions()
    }

    pub fn runtime_version(env: &mut Environment) -> f64 {
        env.runtime_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_cannot_be_instantiated() {
        let err = Bare::new().unwrap_err();
        assert!(matches!(err, BareError::Usage(_)));
        assert!(err.to_string().starts_with("usage error"));
    }

    #[test]
    fn test_version() {
        assert_eq!(Bare::version(), env!("CARGO_PKG_VERSION"));
    }
}
