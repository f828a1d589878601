//! Parsed node - tagged union over the three node kinds
//!
//! Ownership is a plain tree: each node owns its children in document order.
//! The tree is built once per parse and never mutated by consumers.

use serde::Serialize;

/// Node discriminant, useful for logging and assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    DocumentRoot,
    Text,
    Element,
}

impl NodeKind {
    /// Kebab-case name used in logs and serialized output
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::DocumentRoot => "document-root",
            NodeKind::Text => "text",
            NodeKind::Element => "element",
        }
    }
}

/// A node of a parsed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParsedNode {
    /// Synthetic root of the document
    Document { children: Vec<ParsedNode> },
    /// Raw character data, possibly whitespace-only
    Text { value: String },
    /// Element with tag name, attributes and children
    Element(ElementNode),
}

impl ParsedNode {
    /// Create a document root
    pub fn document(children: Vec<ParsedNode>) -> Self {
        ParsedNode::Document { children }
    }

    /// Create a text node
    pub fn text(value: impl Into<String>) -> Self {
        ParsedNode::Text { value: value.into() }
    }

    /// Create an element node with no attributes or children
    pub fn element(tag_name: impl Into<String>) -> ElementNode {
        ElementNode::new(tag_name)
    }

    /// Discriminant of this node
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            ParsedNode::Document { .. } => NodeKind::DocumentRoot,
            ParsedNode::Text { .. } => NodeKind::Text,
            ParsedNode::Element(_) => NodeKind::Element,
        }
    }

    /// Children in document order (text nodes have none)
    pub fn children(&self) -> &[ParsedNode] {
        match self {
            ParsedNode::Document { children } => children,
            ParsedNode::Element(elem) => &elem.children,
            ParsedNode::Text { .. } => &[],
        }
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            ParsedNode::Element(elem) => Some(elem),
            _ => None,
        }
    }

    /// Get the raw text if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParsedNode::Text { value } => Some(value),
            _ => None,
        }
    }

    /// Total number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(ParsedNode::node_count).sum::<usize>()
    }

    /// Depth-first search for the first element with the given tag name
    pub fn find_element(&self, tag_name: &str) -> Option<&ElementNode> {
        if let Some(elem) = self.as_element() {
            if elem.tag_name == tag_name {
                return Some(elem);
            }
        }
        self.children().iter().find_map(|child| child.find_element(tag_name))
    }
}

impl From<ElementNode> for ParsedNode {
    fn from(elem: ElementNode) -> Self {
        ParsedNode::Element(elem)
    }
}

/// Element-specific data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementNode {
    /// Tag name, never empty
    pub tag_name: String,
    /// Attributes in source order; duplicate names are kept
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order
    pub children: Vec<ParsedNode>,
}

impl ElementNode {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute (builder style)
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Append a child (builder style)
    pub fn with_child(mut self, child: impl Into<ParsedNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// First value of the named attribute
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// Attribute as written in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
