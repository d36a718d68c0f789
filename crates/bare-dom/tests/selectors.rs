//! Selector engine tests over a small document

use bare_dom::{Document, DomError, NodeId};

/// body > ul#list > li.item x5 (every second one `.odd`), p.note
fn list_document() -> (Document, Vec<NodeId>) {
    let mut doc = Document::default();
    let body = doc.body();
    let ul = doc.create_element("ul");
    doc.set_attribute(ul, "id", "list").unwrap();
    doc.append_child(body, ul).unwrap();

    let mut items = Vec::new();
    for i in 0..5 {
        let li = doc.create_element("li");
        doc.set_attribute(li, "class", if i % 2 == 0 { "item odd" } else { "item" }).unwrap();
        doc.set_attribute(li, "data-index", &i.to_string()).unwrap();
        doc.append_child(ul, li).unwrap();
        items.push(li);
    }

    let p = doc.create_element("p");
    doc.set_attribute(p, "class", "note").unwrap();
    doc.append_child(body, p).unwrap();
    (doc, items)
}

fn all(doc: &Document, selector: &str) -> Vec<NodeId> {
    doc.query_selector_all(doc.tree().root(), selector).unwrap().into_vec()
}

#[test]
fn test_nth_child_forms() {
    let (doc, items) = list_document();
    assert_eq!(all(&doc, "li:nth-child(odd)"), vec![items[0], items[2], items[4]]);
    assert_eq!(all(&doc, "li:nth-child(2n)"), vec![items[1], items[3]]);
    assert_eq!(all(&doc, "li:nth-child(-n+2)"), vec![items[0], items[1]]);
    assert_eq!(all(&doc, "li:nth-last-child(1)"), vec![items[4]]);
    assert_eq!(all(&doc, "li:nth-child( 3 )"), vec![items[2]]);
}

#[test]
fn test_nth_child_extreme_offsets() {
    let (doc, items) = list_document();
    let root = doc.tree().root();
    assert_eq!(all(&doc, "li:nth-child(n-2147483648)"), items);
    assert_eq!(all(&doc, "li:nth-child(-n+2147483647)"), items);
    assert_eq!(all(&doc, "li:nth-last-of-type(-n-2147483648)"), Vec::<NodeId>::new());
    assert_eq!(doc.query_selector(root, "li:nth-child(n-2147483648)").unwrap(), Some(items[0]));
}

#[test]
fn test_attribute_operators() {
    let (doc, items) = list_document();
    assert_eq!(all(&doc, "[data-index=\"3\"]"), vec![items[3]]);
    assert_eq!(all(&doc, "li[class~=odd]"), vec![items[0], items[2], items[4]]);
    assert_eq!(all(&doc, "[class^=item][class$=odd]").len(), 3);
    assert_eq!(all(&doc, "[class*=\"tem o\"]").len(), 3);
    assert_eq!(all(&doc, "[CLASS=\"ITEM\" i]"), vec![items[1], items[3]]);
    assert!(all(&doc, "[class^=\"\"]").is_empty());
}

#[test]
fn test_combinators_and_lists() {
    let (doc, items) = list_document();
    assert_eq!(all(&doc, "#list > .odd + li"), vec![items[1], items[3]]);
    assert_eq!(all(&doc, "li.odd ~ li:not(.odd)"), vec![items[1], items[3]]);
    assert_eq!(all(&doc, "ul ~ p").len(), 1);
    assert_eq!(all(&doc, "body li:is(.odd):last-child"), vec![items[4]]);
    assert_eq!(all(&doc, "p, #list").len(), 2);
}

#[test]
fn test_invalid_selectors() {
    let (doc, _) = list_document();
    let root = doc.tree().root();
    for selector in ["", "li >", ">li", "li[", "li:nth-child(x)", "li::before", "#1x"] {
        assert!(
            matches!(doc.query_selector(root, selector), Err(DomError::Syntax { .. })),
            "{selector:?}"
        );
    }
}
