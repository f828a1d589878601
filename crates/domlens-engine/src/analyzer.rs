//! Analyzer - one analysis session
//!
//! Holds the current input, the last successfully parsed tree and the last
//! error message. Parse errors are caught here and turned into a message;
//! a failed analysis always drops the previous tree.

use std::io::Read;

use domlens_dom::ParsedNode;
use domlens_html::{DocumentParser, HtmlParser, ParseError};
use domlens_render::{PaletteError, Rendered, TreeRenderer};

use crate::Config;

/// Prefix of every user-visible parse error message
pub const ERROR_PREFIX: &str = "Invalid HTML or parsing error: ";

/// Shown before anything has been analyzed
pub const PLACEHOLDER: &str = "Paste HTML and run the analyzer to see the structure";

/// Analysis error
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("{}{}", ERROR_PREFIX, .0)]
    Parse(#[from] ParseError),
}

/// What a front end should display
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a> {
    /// Nothing analyzed yet
    Placeholder,
    /// Rendered tree of the last successful analysis
    Tree(Rendered),
    /// Message of the last failed analysis
    Error(&'a str),
}

/// Analysis session over a document parser
pub struct Analyzer<P = HtmlParser> {
    parser: P,
    renderer: TreeRenderer,
    input: String,
    tree: Option<ParsedNode>,
    error: Option<String>,
}

impl Analyzer<HtmlParser> {
    /// Create an analyzer with the html5ever parser and default palette
    pub fn new() -> Self {
        Self::with_parser(HtmlParser::new(), TreeRenderer::default())
    }

    /// Create an analyzer from configuration
    pub fn from_config(config: &Config) -> Result<Self, PaletteError> {
        let renderer = TreeRenderer::new(config.palette()?);
        Ok(Self::with_parser(HtmlParser::with_options(config.parse_options()), renderer))
    }
}

impl Default for Analyzer<HtmlParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: DocumentParser> Analyzer<P> {
    /// Create an analyzer over any parser
    pub fn with_parser(parser: P, renderer: TreeRenderer) -> Self {
        Self {
            parser,
            renderer,
            input: String::new(),
            tree: None,
            error: None,
        }
    }

    /// Replace the input text; the displayed result is kept until the next analysis
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Parse the current input, replacing the previous tree or error
    pub fn analyze(&mut self) -> Result<&ParsedNode, AnalyzeError> {
        let result = self.parser.parse(&self.input);
        self.finish(result)
    }

    /// Read and parse a byte stream; it becomes the current input
    ///
    /// Invalid UTF-8 is decoded lossily. A read failure is reported like a
    /// parse failure.
    pub fn analyze_reader<R: Read>(
        &mut self,
        input: &mut R,
    ) -> Result<&ParsedNode, AnalyzeError> {
        let mut bytes = Vec::new();
        if let Err(err) = input.read_to_end(&mut bytes) {
            self.input.clear();
            return self.finish(Err(err.into()));
        }
        self.input = String::from_utf8_lossy(&bytes).into_owned();
        let result = self.parser.parse_reader(&mut bytes.as_slice());
        self.finish(result)
    }

    fn finish(
        &mut self,
        result: Result<ParsedNode, ParseError>,
    ) -> Result<&ParsedNode, AnalyzeError> {
        self.error = None;

        match result {
            Ok(tree) => {
                tracing::info!("Analyzed document: {} nodes", tree.node_count());
                Ok(self.tree.insert(tree))
            }
            Err(err) => {
                let err = AnalyzeError::from(err);
                tracing::warn!("DOM parsing error: {}", err);
                self.tree = None;
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Reset input, tree and error
    pub fn clear(&mut self) {
        self.input.clear();
        self.tree = None;
        self.error = None;
    }

    /// Last successfully parsed tree
    pub fn tree(&self) -> Option<&ParsedNode> {
        self.tree.as_ref()
    }

    /// Last error message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn renderer(&self) -> &TreeRenderer {
        &self.renderer
    }

    /// Current display state; a tree is rendered fresh on every call
    pub fn view(&self) -> View<'_> {
        if let Some(message) = &self.error {
            return View::Error(message);
        }
        match &self.tree {
            Some(tree) => View::Tree(self.renderer.render(Some(tree), 0)),
            None => View::Placeholder,
        }
    }
}
