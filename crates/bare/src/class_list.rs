//! Class-list operations over one element or a collection
//!
//! Every operation normalizes its target into a sequence first, so a single
//! element and a one-element collection behave identically. Host errors stop
//! the run and are returned as-is; elements visited before keep their change.

use bare_dom::{Document, DomResult, NodeId, NodeList};

use crate::iter::try_for_each;

/// "Element or collection" argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    Single(NodeId),
    Many(Vec<NodeId>),
}

impl Targets {
    /// Ordered sequence of elements
    pub fn normalize(self) -> Vec<NodeId> {
        match self {
            Targets::Single(element) => vec![element],
            Targets::Many(elements) => elements,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Targets::Single(_) => 1,
            Targets::Many(elements) => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IntoIterator for Targets {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.normalize().into_iter()
    }
}

impl From<NodeId> for Targets {
    fn from(element: NodeId) -> Self {
        Targets::Single(element)
    }
}

/// `None` (a missed `query_single`) is an empty collection
impl From<Option<NodeId>> for Targets {
    fn from(element: Option<NodeId>) -> Self {
        Targets::Many(element.into_iter().collect())
    }
}

impl From<Vec<NodeId>> for Targets {
    fn from(elements: Vec<NodeId>) -> Self {
        Targets::Many(elements)
    }
}

impl From<&[NodeId]> for Targets {
    fn from(elements: &[NodeId]) -> Self {
        Targets::Many(elements.to_vec())
    }
}

impl<const N: usize> From<[NodeId; N]> for Targets {
    fn from(elements: [NodeId; N]) -> Self {
        Targets::Many(elements.to_vec())
    }
}

impl From<NodeList> for Targets {
    fn from(elements: NodeList) -> Self {
        Targets::Many(elements.into_vec())
    }
}

impl From<&NodeList> for Targets {
    fn from(elements: &NodeList) -> Self {
        Targets::Many(elements.as_slice().to_vec())
    }
}

/// Result of [`has_class`]: bare for exactly one target, a sequence otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HasClass {
    One(bool),
    Many(Vec<bool>),
}

impl HasClass {
    fn from_results(mut results: Vec<bool>) -> Self {
        match results.len() {
            1 => HasClass::One(results.remove(0)),
            _ => HasClass::Many(results),
        }
    }

    /// The bare boolean, when there was exactly one target
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HasClass::One(present) => Some(*present),
            HasClass::Many(_) => None,
        }
    }

    /// Per-target results in input order
    pub fn into_vec(self) -> Vec<bool> {
        match self {
            HasClass::One(present) => vec![present],
            HasClass::Many(results) => results,
        }
    }

    /// Whether every target has the class (false for no targets)
    pub fn all(&self) -> bool {
        match self {
            HasClass::One(present) => *present,
            HasClass::Many(results) => !results.is_empty() && results.iter().all(|&r| r),
        }
    }

    /// Whether any target has the class
    pub fn any(&self) -> bool {
        match self {
            HasClass::One(present) => *present,
            HasClass::Many(results) => results.iter().any(|&r| r),
        }
    }
}

/// Add `name` to every target
pub fn add_class(doc: &mut Document, name: &str, target: impl Into<Targets>) -> DomResult<()> {
    let targets = target.into();
    tracing::trace!(class = name, targets = targets.len(), "add_class");
    try_for_each(targets, |element, _| doc.class_add(element, name))
}

/// Remove `name` from every target
pub fn remove_class(doc: &mut Document, name: &str, target: impl Into<Targets>) -> DomResult<()> {
    let targets = target.into();
    tracing::trace!(class = name, targets = targets.len(), "remove_class");
    try_for_each(targets, |element, _| doc.class_remove(element, name))
}

/// Flip `name` on every target independently; `force` adds instead of flipping
pub fn toggle_class(
    doc: &mut Document,
    name: &str,
    target: impl Into<Targets>,
    force: bool,
) -> DomResult<()> {
    if force {
        return add_class(doc, name, target);
    }
    let targets = target.into();
    tracing::trace!(class = name, targets = targets.len(), "toggle_class");
    try_for_each(targets, |element, _| doc.class_toggle(element, name).map(drop))
}

/// Membership of `name` per target
pub fn has_class(doc: &Document, name: &str, target: impl Into<Targets>) -> DomResult<HasClass> {
    has_class_each(doc, name, target).map(HasClass::from_results)
}

/// Membership of `name` per target, always as a sequence
pub fn has_class_each(
    doc: &Document,
    name: &str,
    target: impl Into<Targets>,
) -> DomResult<Vec<bool>> {
    let targets = target.into();
    let mut results = Vec::with_capacity(targets.len());
    try_for_each(targets, |element, _| {
        results.push(doc.class_contains(element, name)?);
        Ok(())
    })?;
    Ok(results)
}
