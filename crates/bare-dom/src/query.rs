//! Element Query and Methods
//!
//! getElementsByClassName, getElementsByTagName, querySelector, matches, closest.
//! Every lookup returns a snapshot taken in document order.

use crate::selector::SelectorList;
use crate::{Document, DomResult, NodeId};

/// Snapshot list of nodes in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList {
    nodes: Vec<NodeId>,
}

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.item(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn into_vec(self) -> Vec<NodeId> {
        self.nodes
    }
}

impl IntoIterator for NodeList {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

impl FromIterator<NodeId> for NodeList {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self { nodes: iter.into_iter().collect() }
    }
}

impl Document {
    /// Descendant elements of `scope` carrying every class in the
    /// whitespace-separated `names`. No names yields an empty list.
    pub fn get_elements_by_class_name(&self, scope: NodeId, names: &str) -> NodeList {
        let wanted: Vec<&str> = names.split_ascii_whitespace().collect();
        if wanted.is_empty() {
            return NodeList::new();
        }
        let tree = self.tree();
        tree.descendant_elements(scope)
            .filter(|&e| {
                tree.element(e)
                    .is_some_and(|data| wanted.iter().all(|c| data.classes.contains(c)))
            })
            .collect()
    }

    /// Descendant elements of `scope` with this tag (ASCII case-insensitive, `*` for all)
    pub fn get_elements_by_tag_name(&self, scope: NodeId, tag: &str) -> NodeList {
        let tree = self.tree();
        tree.descendant_elements(scope)
            .filter(|&e| {
                tag == "*" || tree.element(e).is_some_and(|data| data.tag.eq_ignore_ascii_case(tag))
            })
            .collect()
    }

    /// First descendant of `scope` matching `selector`
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        let tree = self.tree();
        Ok(tree.descendant_elements(scope).find(|&e| list.matches(tree, e)))
    }

    /// Every descendant of `scope` matching `selector`.
    ///
    /// Only descendants are candidates, but combinators may reach outside `scope`.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> DomResult<NodeList> {
        let list = SelectorList::parse(selector)?;
        let tree = self.tree();
        let found: NodeList = tree.descendant_elements(scope).filter(|&e| list.matches(tree, e)).collect();
        tracing::trace!("query_selector_all({:?}) matched {} elements", selector, found.len());
        Ok(found)
    }

    /// `element.matches(selector)`
    pub fn matches(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        let list = SelectorList::parse(selector)?;
        Ok(list.matches(self.tree(), element))
    }

    /// Nearest inclusive ancestor element matching `selector`
    pub fn closest(&self, element: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        let tree = self.tree();
        let mut cursor = Some(element);
        while let Some(current) = cursor {
            if list.matches(tree, current) {
                return Ok(Some(current));
            }
            cursor = tree.parent(current);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomError;

    /// body > div#main.box > (p.a.b, p.a > span)
    fn sample() -> (Document, [NodeId; 4]) {
        let mut doc = Document::default();
        let body = doc.body();
        let div = doc.create_element("div");
        let p1 = doc.create_element("P");
        let p2 = doc.create_element("p");
        let span = doc.create_element("span");
        doc.set_attribute(div, "id", "main").unwrap();
        doc.set_attribute(div, "class", "box").unwrap();
        doc.set_attribute(p1, "class", "a b").unwrap();
        doc.set_attribute(p2, "class", "a").unwrap();
        doc.append_child(body, div).unwrap();
        doc.append_child(div, p1).unwrap();
        doc.append_child(div, p2).unwrap();
        doc.append_child(p2, span).unwrap();
        (doc, [div, p1, p2, span])
    }

    #[test]
    fn test_get_elements_by_class_name() {
        let (doc, [_, p1, p2, _]) = sample();
        let root = doc.tree().root();
        assert_eq!(doc.get_elements_by_class_name(root, "a").into_vec(), vec![p1, p2]);
        assert_eq!(doc.get_elements_by_class_name(root, " b  a ").into_vec(), vec![p1]);
        assert!(doc.get_elements_by_class_name(root, "").is_empty());
        assert!(doc.get_elements_by_class_name(p2, "a").is_empty());
    }

    #[test]
    fn test_get_elements_by_tag_name() {
        let (doc, [div, p1, p2, span]) = sample();
        let root = doc.tree().root();
        assert_eq!(doc.get_elements_by_tag_name(root, "p").into_vec(), vec![p1, p2]);
        assert_eq!(doc.get_elements_by_tag_name(div, "SPAN").into_vec(), vec![span]);
        assert_eq!(doc.get_elements_by_tag_name(div, "*").len(), 3);
        assert!(doc.get_elements_by_tag_name(root, "a").is_empty());
    }

    #[test]
    fn test_query_selector() {
        let (doc, [div, p1, p2, span]) = sample();
        let root = doc.tree().root();
        assert_eq!(doc.query_selector(root, "#main > .a").unwrap(), Some(p1));
        assert_eq!(doc.query_selector(root, "p:last-child span").unwrap(), Some(span));
        assert_eq!(doc.query_selector(root, ".missing").unwrap(), None);
        assert_eq!(doc.query_selector_all(root, "p, div").unwrap().into_vec(), vec![div, p1, p2]);
        assert!(matches!(doc.query_selector(root, "p >"), Err(DomError::Syntax { .. })));
    }

    #[test]
    fn test_scoped_query_sees_outer_ancestors() {
        let (doc, [_, _, p2, span]) = sample();
        // `body span` matches even though body is outside the scope
        assert_eq!(doc.query_selector(p2, "body span").unwrap(), Some(span));
        assert_eq!(doc.query_selector(p2, "p").unwrap(), None);
    }

    #[test]
    fn test_matches_and_closest() {
        let (doc, [div, _, p2, span]) = sample();
        assert!(doc.matches(p2, "div > p.a").unwrap());
        assert!(!doc.matches(span, "p").unwrap());
        assert_eq!(doc.closest(span, ".box").unwrap(), Some(div));
        assert_eq!(doc.closest(span, "span").unwrap(), Some(span));
        assert_eq!(doc.closest(span, "table").unwrap(), None);
    }
}
