//! Library errors
//!
//! Host failures keep their `DomError` type on every facade call; this enum
//! only appears where the library itself can refuse.

use bare_dom::DomError;

use crate::env::TypeTag;

pub type BareResult<T> = Result<T, BareError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BareError {
    /// Misuse of the library surface, e.g. constructing the namespace
    #[error("usage error: {0}")]
    Usage(String),

    /// Method missing from the prototype table
    #[error("{type_tag} has no `{method}` method installed")]
    NotInstalled { type_tag: TypeTag, method: String },

    #[error(transparent)]
    Dom(#[from] DomError),
}
