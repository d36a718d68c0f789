//! Document - High-level document API

use crate::{DomError, DomResult, DomTree, ElementData, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with an `html/head/body` skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.link_last(tree.root(), html);
        tree.link_last(html, head);
        tree.link_last(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create a document holding only the document node
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Re-locate `html`, `head` and `body` after the tree was filled externally
    pub fn finalize(&mut self) {
        let tag_of = |tree: &DomTree, id| tree.element(id).map(|e| e.tag.clone());

        self.html_element = self
            .tree
            .element_children(self.tree.root())
            .find(|&id| tag_of(&self.tree, id).as_deref() == Some("html"))
            .unwrap_or(NodeId::NONE);
        self.head_element = NodeId::NONE;
        self.body_element = NodeId::NONE;

        if !self.html_element.is_valid() {
            return;
        }
        for child in self.tree.element_children(self.html_element) {
            match tag_of(&self.tree, child).as_deref() {
                Some("head") if !self.head_element.is_valid() => self.head_element = child,
                Some("body") if !self.body_element.is_valid() => self.body_element = child,
                _ => {}
            }
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first <title> in <head>
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .element_children(self.head_element)
            .find(|&id| self.tree.element(id).is_some_and(|e| e.tag == "title"))
            .map(|title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get the first element in tree order with this id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree
            .descendant_elements(self.tree.root())
            .find(|&e| self.tree.element(e).and_then(|d| d.id.as_deref()) == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)
    }

    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_data_mut(element)?.set_attribute(name, value);
        Ok(())
    }

    fn element_data(&self, element: NodeId) -> DomResult<&ElementData> {
        let node = self.tree.get(element).ok_or(DomError::NotFound(element))?;
        node.as_element().ok_or(DomError::NotAnElement(element))
    }

    fn element_data_mut(&mut self, element: NodeId) -> DomResult<&mut ElementData> {
        let node = self.tree.get_mut(element).ok_or(DomError::NotFound(element))?;
        node.as_element_mut().ok_or(DomError::NotAnElement(element))
    }

    /// `element.classList.add(token)`
    pub fn class_add(&mut self, element: NodeId, token: &str) -> DomResult<()> {
        self.element_data_mut(element)?.classes.add(token)
    }

    /// `element.classList.remove(token)`
    pub fn class_remove(&mut self, element: NodeId, token: &str) -> DomResult<()> {
        self.element_data_mut(element)?.classes.remove(token)
    }

    /// `element.classList.toggle(token)`, returns the new presence
    pub fn class_toggle(&mut self, element: NodeId, token: &str) -> DomResult<bool> {
        self.element_data_mut(element)?.classes.toggle(token, None)
    }

    /// `element.classList.contains(token)`
    pub fn class_contains(&self, element: NodeId, token: &str) -> DomResult<bool> {
        Ok(self.element_data(element)?.classes.contains(token))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
