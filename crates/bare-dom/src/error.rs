//! DOM errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Selector could not be parsed or uses unsupported syntax
    #[error("'{selector}' is not a valid selector")]
    Syntax { selector: String },

    /// Empty class token
    #[error("the token provided must not be empty")]
    EmptyToken,

    /// Class token contains whitespace
    #[error("the token provided ('{token}') contains HTML space characters")]
    InvalidCharacter { token: String },

    /// Operation needs an element but got another node kind
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// Node does not exist in this tree
    #[error("node {0} not found")]
    NotFound(NodeId),

    /// Insertion would create a cycle or target a leaf node
    #[error("hierarchy request error")]
    HierarchyRequest,

    /// Node is not a child of the given parent
    #[error("node is not a child")]
    NotAChild,
}

impl DomError {
    pub(crate) fn syntax(selector: &str) -> Self {
        Self::Syntax { selector: selector.to_string() }
    }
}
