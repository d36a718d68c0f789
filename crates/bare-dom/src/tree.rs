//! DOM Tree (arena-based allocation)
//!
//! Node 0 is always the document node. Detached nodes stay in the arena.

use crate::{DomError, DomResult, ElementData, Node, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data, if `id` is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Number of nodes in the arena (including detached ones)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Check that `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if !parent_node.is_container() || matches!(child_node.data, crate::NodeData::Document) {
            return Err(DomError::HierarchyRequest);
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    /// Unlink a node from its parent, if any
    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }
        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Append `child` as last child of `parent`, moving it if already attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.link_last(parent, child);
        Ok(child)
    }

    /// Link a detached `child` as the last child of `parent`.
    ///
    /// Both ids must exist and `child` must not be an ancestor of `parent`.
    pub(crate) fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Insert `child` before `reference`; `None` appends
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        let Some(reference) = reference else {
            return self.append_child(parent, child);
        };
        if self.parent(reference) != Some(parent) {
            return Err(DomError::NotAChild);
        }
        if reference == child {
            return Ok(child);
        }
        self.check_insert(parent, child)?;
        self.detach(child);

        let prev = self.nodes[reference.index()].prev_sibling;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }
        self.nodes[reference.index()].prev_sibling = child;
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(child)
    }

    /// Direct children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Direct element children in order
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(|&c| self.nodes[c.index()].is_element())
    }

    /// Strict descendants in document (pre-)order
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let first = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Descendants { tree: self, root: id, next: first }
    }

    /// Strict descendant elements in document order
    pub fn descendant_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(id).filter(|&d| self.nodes[d.index()].is_element())
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.get(id)?.prev_sibling;
        while cursor.is_valid() {
            let node = &self.nodes[cursor.index()];
            if node.is_element() {
                return Some(cursor);
            }
            cursor = node.prev_sibling;
        }
        None
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.get(id)?.next_sibling;
        while cursor.is_valid() {
            let node = &self.nodes[cursor.index()];
            if node.is_element() {
                return Some(cursor);
            }
            cursor = node.next_sibling;
        }
        None
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|d| self.nodes[d.index()].as_text())
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.nodes[current.index()].next_sibling;
        Some(current)
    }
}

/// Pre-order iterator over a subtree, excluding its root
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        let node = &self.tree.nodes[current.index()];

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            // Climb until a next sibling exists, without leaving the subtree
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break NodeId::NONE;
                }
                let n = &self.tree.nodes[cursor.index()];
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                cursor = n.parent;
                if !cursor.is_valid() {
                    break NodeId::NONE;
                }
            }
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, [NodeId; 3]) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_element("a");
        let text = tree.create_text("hi");
        let b = tree.create_element("b");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, a).unwrap();
        tree.append_child(div, text).unwrap();
        tree.append_child(div, b).unwrap();
        (tree, div, [a, text, b])
    }

    #[test]
    fn test_append_and_children() {
        let (tree, div, [a, text, b]) = sample();
        assert_eq!(tree.children(div).collect::<Vec<_>>(), vec![a, text, b]);
        assert_eq!(tree.element_children(div).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(tree.parent(a), Some(div));
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn test_element_siblings_skip_text() {
        let (tree, _, [a, _, b]) = sample();
        assert_eq!(tree.next_element_sibling(a), Some(b));
        assert_eq!(tree.previous_element_sibling(b), Some(a));
        assert_eq!(tree.previous_element_sibling(a), None);
    }

    #[test]
    fn test_descendants_document_order() {
        let (mut tree, div, [a, text, b]) = sample();
        let inner = tree.create_element("i");
        tree.append_child(a, inner).unwrap();
        let all: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(all, vec![div, a, inner, text, b]);
        assert_eq!(tree.descendants(a).collect::<Vec<_>>(), vec![inner]);
        assert_eq!(tree.descendants(b).count(), 0);
    }

    #[test]
    fn test_move_and_remove() {
        let (mut tree, div, [a, text, b]) = sample();
        tree.append_child(div, a).unwrap();
        assert_eq!(tree.children(div).collect::<Vec<_>>(), vec![text, b, a]);
        tree.insert_before(div, a, Some(text)).unwrap();
        assert_eq!(tree.children(div).collect::<Vec<_>>(), vec![a, text, b]);
        tree.remove_child(div, text).unwrap();
        assert_eq!(tree.children(div).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(tree.remove_child(div, text), Err(DomError::NotAChild));
    }

    #[test]
    fn test_hierarchy_errors() {
        let (mut tree, div, [a, text, _]) = sample();
        assert_eq!(tree.append_child(a, div), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(text, a), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(div, div), Err(DomError::HierarchyRequest));
        assert_eq!(tree.text_content(div), "hi");
    }
}
