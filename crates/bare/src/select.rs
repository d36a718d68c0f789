//! Selector facade
//!
//! `query_single` answers simple selectors (`#id`, `.class`, `tag`) with the
//! direct host lookups and everything else with the host's selector engine.
//! Both paths produce the same element.

use bare_dom::{Document, DomResult, NodeId, NodeList};

/// Scope of a lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Context {
    /// The whole document
    #[default]
    Document,
    /// Descendants of one element
    Element(NodeId),
}

impl Context {
    /// Host scope node for this context
    pub fn scope(self) -> NodeId {
        match self {
            Context::Document => NodeId::ROOT,
            Context::Element(element) => element,
        }
    }
}

impl From<NodeId> for Context {
    fn from(element: NodeId) -> Self {
        if element == NodeId::ROOT {
            Context::Document
        } else {
            Context::Element(element)
        }
    }
}

/// Signature shared by `query_single` and anything bound in its place
pub type QuerySingleFn = fn(&Document, &str, Context) -> DomResult<Option<NodeId>>;

/// Signature shared by `query_all` and anything bound in its place
pub type QueryAllFn = fn(&Document, &str, Context) -> DomResult<NodeList>;

/// Characters that may only appear at index 0 of a simple selector
const NON_LEADING: [char; 6] = [' ', '[', ':', '*', '#', '.'];

/// Every element matching `selector` under `context`, in document order
pub fn query_all(doc: &Document, selector: &str, context: Context) -> DomResult<NodeList> {
    doc.query_selector_all(context.scope(), selector)
}

/// First element matching `selector` under `context`
pub fn query_single(doc: &Document, selector: &str, context: Context) -> DomResult<Option<NodeId>> {
    let selector = selector.trim();
    let scope = context.scope();

    match dispatch(selector, context) {
        Dispatch::Id(id) => {
            tracing::debug!(selector, "query_single: id lookup");
            Ok(doc.get_element_by_id(id))
        }
        Dispatch::Class(class) => {
            tracing::debug!(selector, "query_single: class lookup");
            Ok(doc.get_elements_by_class_name(scope, class).first())
        }
        Dispatch::Tag(tag) => {
            tracing::debug!(selector, "query_single: tag lookup");
            Ok(doc.get_elements_by_tag_name(scope, tag).first())
        }
        Dispatch::General => doc.query_selector(scope, selector),
    }
}

/// True when no character after the first is one of space, `[`, `:`, `*`, `#`, `.`.
///
/// The first character is never inspected, so `"#"` and `"."` count as simple.
pub fn is_simple_selector(selector: &str) -> bool {
    selector
        .trim()
        .chars()
        .skip(1)
        .all(|c| !NON_LEADING.contains(&c))
}

/// Lookup chosen by the fast path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dispatch<'a> {
    Id(&'a str),
    Class(&'a str),
    Tag(&'a str),
    General,
}

/// Pick a lookup for an already-trimmed selector
pub(crate) fn dispatch(selector: &str, context: Context) -> Dispatch<'_> {
    if !is_simple_selector(selector) {
        return Dispatch::General;
    }
    let Some(first) = selector.chars().next() else {
        return Dispatch::General;
    };
    let rest = &selector[first.len_utf8()..];

    match first {
        // Id lookup is document-wide, so element scopes take the general path
        '#' if context == Context::Document && is_lookup_name(rest) => Dispatch::Id(rest),
        '.' if is_lookup_name(rest) => Dispatch::Class(rest),
        '#' | '.' | '[' | ':' | '*' => Dispatch::General,
        _ if !selector.is_empty() && is_lookup_name(selector) => Dispatch::Tag(selector),
        _ => Dispatch::General,
    }
}

/// Names the direct lookups answer exactly like the selector engine.
///
/// Empty is accepted: `"#"` and `"."` resolve to nothing instead of a syntax error.
fn is_lookup_name(name: &str) -> bool {
    let mut chars = name.chars();
    let bad_start = match chars.next() {
        Some('-') => chars.next().is_none_or(|c| c.is_ascii_digit()),
        Some(c) => c.is_ascii_digit(),
        None => false,
    };
    !bad_start
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii())
}
