//! bare DOM - Document Object Model
//!
//! Arena-allocated document tree with class token lists, id/class/tag
//! lookups and a CSS selector engine backing `querySelector[All]`.

mod classlist;
mod document;
mod error;
mod node;
mod query;
pub mod selector;
mod tree;

pub use classlist::ClassList;
pub use document::Document;
pub use error::{DomError, DomResult};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use query::NodeList;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
