//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to a `ParsedNode` tree.

use domlens_dom::{Attribute, ElementNode, ParsedNode};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use std::io::Read;

use crate::{DocumentParser, ParseError};

/// Default cap on element nesting during conversion
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parser options
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Fail on any error html5ever reports instead of recovering silently
    pub strict: bool,
    /// Maximum element nesting; deeper documents fail with `TooDeep`
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// HTML5 parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    options: ParseOptions,
}

impl HtmlParser {
    /// Create a new lenient HTML parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit options
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse an HTML string into a document tree
    pub fn parse(&self, html: &str) -> Result<ParsedNode, ParseError> {
        self.parse_reader(&mut html.as_bytes())
    }

    /// Parse HTML from any byte stream
    pub fn parse_reader<R: Read + ?Sized>(&self, input: &mut R) -> Result<ParsedNode, ParseError> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::Empty);
        }
        tracing::debug!("Parsing {} bytes of HTML", bytes.len());

        let mut opts = ParseOpts::default();
        opts.tree_builder.exact_errors = self.options.strict;

        let dom = parse_document(RcDom::default(), opts)
            .from_utf8()
            .read_from(&mut bytes.as_slice())?;

        let errors = dom.errors.borrow();
        if !errors.is_empty() {
            tracing::debug!("html5ever reported {} recoverable error(s)", errors.len());
            if self.options.strict {
                return Err(ParseError::Malformed {
                    count: errors.len(),
                    first: errors[0].to_string(),
                });
            }
        }

        let root = convert_node(&dom.document, 0, self.options.max_depth)?
            .unwrap_or_else(|| ParsedNode::document(Vec::new()));
        tracing::debug!("Parsed {} nodes", root.node_count());
        Ok(root)
    }
}

impl DocumentParser for HtmlParser {
    fn parse(&self, text: &str) -> Result<ParsedNode, ParseError> {
        HtmlParser::parse(self, text)
    }

    fn parse_reader(&self, input: &mut dyn Read) -> Result<ParsedNode, ParseError> {
        HtmlParser::parse_reader(self, input)
    }
}

/// Convert an RcDom node; kinds with no `ParsedNode` counterpart yield `None`
///
/// `depth` counts enclosing elements. Conversion stops with `TooDeep` before
/// recursing past `limit`.
fn convert_node(
    handle: &Handle,
    depth: usize,
    limit: usize,
) -> Result<Option<ParsedNode>, ParseError> {
    let node = match &handle.data {
        RcNodeData::Document => ParsedNode::document(convert_children(handle, depth, limit)?),
        RcNodeData::Text { contents } => ParsedNode::text(contents.borrow().to_string()),
        RcNodeData::Element { name, attrs, .. } => {
            if depth >= limit {
                tracing::warn!("Element nesting exceeds {} levels", limit);
                return Err(ParseError::TooDeep { limit });
            }
            let mut elem = ElementNode::new(name.local.to_string());
            elem.attributes = attrs
                .borrow()
                .iter()
                .map(|attr| Attribute::new(attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            elem.children = convert_children(handle, depth + 1, limit)?;
            ParsedNode::Element(elem)
        }
        // Comments, doctypes and processing instructions are not rendered
        RcNodeData::Doctype { .. }
        | RcNodeData::Comment { .. }
        | RcNodeData::ProcessingInstruction { .. } => return Ok(None),
    };
    Ok(Some(node))
}

fn convert_children(
    handle: &Handle,
    depth: usize,
    limit: usize,
) -> Result<Vec<ParsedNode>, ParseError> {
    let mut children = Vec::new();
    for child in handle.children.borrow().iter() {
        if let Some(node) = convert_node(child, depth, limit)? {
            children.push(node);
        }
    }
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domlens_dom::NodeKind;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        assert_eq!(doc.kind(), NodeKind::DocumentRoot);
        assert!(doc.node_count() > 4, "Expected more than 4 nodes, got {}", doc.node_count());
    }

    #[test]
    fn test_parse_fragment_gets_wrapped() {
        let doc = HtmlParser::new().parse("<div><span>Text</span></div>").unwrap();

        // Fragments get wrapped in html/head/body by html5ever
        let html = doc.children()[0].as_element().unwrap();
        assert_eq!(html.tag_name, "html");
        assert!(doc.find_element("body").is_some());
        assert!(doc.find_element("span").is_some());
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(HtmlParser::new().parse(""), Err(ParseError::Empty)));
        assert!(matches!(HtmlParser::new().parse(" \n\t "), Err(ParseError::Empty)));
    }

    #[test]
    fn test_comments_and_doctype_are_dropped() {
        let doc = HtmlParser::new()
            .parse("<!DOCTYPE html><!-- note --><p>x</p>")
            .unwrap();

        assert_eq!(doc.children().len(), 1);
        assert_eq!(doc.children()[0].as_element().unwrap().tag_name, "html");
    }

    #[test]
    fn test_strict_rejects_recoverable_errors() {
        let parser = HtmlParser::with_options(ParseOptions {
            strict: true,
            ..ParseOptions::default()
        });
        // Missing doctype is a parse error in html5ever's tree builder
        let result = parser.parse("<p>no doctype</p>");
        assert!(matches!(result, Err(ParseError::Malformed { .. })));

        let lenient = HtmlParser::new().parse("<p>no doctype</p>");
        assert!(lenient.is_ok());
    }

    #[test]
    fn test_depth_limit_counts_elements() {
        let parser = HtmlParser::with_options(ParseOptions {
            max_depth: 3,
            ..ParseOptions::default()
        });
        // html > body > p is exactly three levels
        assert!(parser.parse("<p>ok</p>").is_ok());
        assert!(matches!(
            parser.parse("<p><b>too deep</b></p>"),
            Err(ParseError::TooDeep { limit: 3 })
        ));
    }
}
