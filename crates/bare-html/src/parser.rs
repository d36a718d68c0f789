//! HTML5 Parser implementation
//!
//! Parses into html5ever's `RcDom`, then copies the tree into the arena.

use bare_dom::{Document, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::HtmlError;

/// HTML5 parser
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, HtmlError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, HtmlError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::empty(url);
        let root = document.tree().root();
        for child in dom.document.children.borrow().iter() {
            convert_node(child, &mut document, root);
        }
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }
}

fn convert_node(handle: &Handle, document: &mut Document, parent: NodeId) {
    let id = match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let id = document.create_element(&name.local);
            if let Some(element) = document.tree_mut().element_mut(id) {
                for attr in attrs.borrow().iter() {
                    element.set_attribute(&attr.name.local, &attr.value);
                }
            }
            id
        }
        NodeData::Text { contents } => {
            let text = contents.borrow();
            if text.trim().is_empty() {
                return;
            }
            document.tree_mut().create_text(&text)
        }
        NodeData::Comment { contents } => document.tree_mut().create_comment(contents),
        NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {
            return;
        }
    };

    if let Err(err) = document.append_child(parent, id) {
        tracing::warn!("Dropping node that cannot be attached: {}", err);
        return;
    }

    for child in handle.children.borrow().iter() {
        convert_node(child, document, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        assert_eq!(doc.title(), "Test");
        let p = doc.tree().element_children(doc.body()).next().unwrap();
        assert_eq!(doc.tree().element(p).unwrap().tag, "p");
        assert_eq!(doc.tree().text_content(p), "Hello");
    }

    #[test]
    fn test_fragment_gets_skeleton() {
        let doc = HtmlParser::new().parse("<div id=x class='a b'><span>Text</span></div>").unwrap();

        assert!(doc.body().is_valid());
        let div = doc.get_element_by_id("x").unwrap();
        assert_eq!(doc.tree().parent(div), Some(doc.body()));
        assert!(doc.class_contains(div, "b").unwrap());
    }

    #[test]
    fn test_attributes_copied() {
        let doc = HtmlParser::new()
            .parse(r#"<a ID="link" href="/x" class="nav  nav item" data-k="v">go</a>"#)
            .unwrap();
        let a = doc.get_element_by_id("link").unwrap();
        let data = doc.tree().element(a).unwrap();
        assert_eq!(data.get_attribute("href").as_deref(), Some("/x"));
        assert_eq!(data.get_attribute("data-k").as_deref(), Some("v"));
        assert_eq!(data.classes.value(), "nav item");
    }

    #[test]
    fn test_whitespace_text_dropped() {
        let doc = HtmlParser::new().parse("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>").unwrap();
        let ul = doc.tree().element_children(doc.body()).next().unwrap();
        assert_eq!(doc.tree().children(ul).count(), 2);
    }
}
