//! domlens HTML Parser
//!
//! HTML5 parsing built on html5ever. Parsing is delegated entirely to
//! html5ever; this crate converts its `RcDom` into a [`ParsedNode`] tree.

mod parser;

use std::io::Read;

pub use domlens_dom::{Attribute, ElementNode, NodeKind, ParsedNode};
pub use parser::{DEFAULT_MAX_DEPTH, HtmlParser, ParseOptions};

/// Parse an HTML string into a document tree with default options
pub fn parse(html: &str) -> Result<ParsedNode, ParseError> {
    HtmlParser::new().parse(html)
}

/// Anything that can turn markup text into a document tree
///
/// A successful parse always yields a [`ParsedNode::Document`] root.
pub trait DocumentParser {
    fn parse(&self, text: &str) -> Result<ParsedNode, ParseError>;

    /// Parse a byte stream; invalid UTF-8 is replaced, not rejected
    fn parse_reader(&self, input: &mut dyn Read) -> Result<ParsedNode, ParseError> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        self.parse(&String::from_utf8_lossy(&bytes))
    }
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no markup to analyze")]
    Empty,

    #[error("{count} parse error(s), first: {first}")]
    Malformed { count: usize, first: String },

    #[error("elements nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
