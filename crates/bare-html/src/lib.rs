//! bare HTML loader
//!
//! Parses HTML text with html5ever and converts the result into a
//! [`bare_dom::Document`].

mod parser;

pub use parser::HtmlParser;

use bare_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// HTML loading error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
