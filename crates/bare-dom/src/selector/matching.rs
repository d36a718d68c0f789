//! Selector matching against the arena tree
//!
//! Complex selectors are matched right-to-left with backtracking over
//! descendant and subsequent-sibling combinators.

use super::{Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorList};
use crate::{DomTree, NodeId};

impl SelectorList {
    /// Check whether `element` matches any selector in the list
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, element))
    }
}

impl ComplexSelector {
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_at(tree, element, n - 1),
        }
    }

    fn matches_at(&self, tree: &DomTree, element: NodeId, idx: usize) -> bool {
        if !self.compounds[idx].matches(tree, element) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        let left = idx - 1;
        match self.combinators[left] {
            Combinator::Child => tree
                .parent(element)
                .is_some_and(|parent| self.matches_at(tree, parent, left)),
            Combinator::Descendant => {
                let mut cursor = tree.parent(element);
                while let Some(ancestor) = cursor {
                    if self.matches_at(tree, ancestor, left) {
                        return true;
                    }
                    cursor = tree.parent(ancestor);
                }
                false
            }
            Combinator::NextSibling => tree
                .previous_element_sibling(element)
                .is_some_and(|sibling| self.matches_at(tree, sibling, left)),
            Combinator::SubsequentSibling => {
                let mut cursor = tree.previous_element_sibling(element);
                while let Some(sibling) = cursor {
                    if self.matches_at(tree, sibling, left) {
                        return true;
                    }
                    cursor = tree.previous_element_sibling(sibling);
                }
                false
            }
        }
    }
}

impl CompoundSelector {
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        let Some(data) = tree.element(element) else {
            return false;
        };

        if let Some(tag) = &self.tag {
            if !data.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if self.ids.iter().any(|id| data.id.as_deref() != Some(id.as_str())) {
            return false;
        }
        if self.classes.iter().any(|class| !data.classes.contains(class)) {
            return false;
        }
        if self
            .attributes
            .iter()
            .any(|attr| !attr.matches(data.get_attribute(&attr.name).as_deref()))
        {
            return false;
        }
        self.pseudo_classes
            .iter()
            .all(|pseudo| matches_pseudo_class(tree, element, pseudo))
    }
}

/// 1-based position among element siblings and the sibling count,
/// optionally restricted to siblings with the same tag
fn sibling_position(tree: &DomTree, element: NodeId, same_type: bool) -> (i32, i32) {
    let Some(parent) = tree.parent(element) else {
        return (1, 1);
    };
    let tag = tree.element(element).map(|e| e.tag.as_str());
    let mut index = 0;
    let mut count = 0;
    for sibling in tree.element_children(parent) {
        if same_type && tree.element(sibling).map(|e| e.tag.as_str()) != tag {
            continue;
        }
        count += 1;
        if sibling == element {
            index = count;
        }
    }
    (index, count)
}

fn matches_pseudo_class(tree: &DomTree, element: NodeId, pseudo: &PseudoClass) -> bool {
    match pseudo {
        PseudoClass::Root => tree.parent(element) == Some(tree.root()),
        PseudoClass::Empty => tree
            .children(element)
            .all(|child| tree.get(child).is_some_and(|n| !n.is_element() && !n.is_text())),
        PseudoClass::FirstChild => tree.previous_element_sibling(element).is_none(),
        PseudoClass::LastChild => tree.next_element_sibling(element).is_none(),
        PseudoClass::OnlyChild => {
            tree.previous_element_sibling(element).is_none()
                && tree.next_element_sibling(element).is_none()
        }
        PseudoClass::FirstOfType => sibling_position(tree, element, true).0 == 1,
        PseudoClass::LastOfType => {
            let (index, count) = sibling_position(tree, element, true);
            index == count
        }
        PseudoClass::OnlyOfType => sibling_position(tree, element, true).1 == 1,
        PseudoClass::NthChild(expr) => expr.matches(sibling_position(tree, element, false).0),
        PseudoClass::NthLastChild(expr) => {
            let (index, count) = sibling_position(tree, element, false);
            expr.matches(count - index + 1)
        }
        PseudoClass::NthOfType(expr) => expr.matches(sibling_position(tree, element, true).0),
        PseudoClass::NthLastOfType(expr) => {
            let (index, count) = sibling_position(tree, element, true);
            expr.matches(count - index + 1)
        }
        PseudoClass::Not(list) => !list.matches(tree, element),
        PseudoClass::Is(list) | PseudoClass::Where(list) => list.matches(tree, element),
    }
}
