//! Tree renderer
//!
//! Depth-first walk over a `ParsedNode` tree producing a render tree.
//! Every produced unit is keyed by its `NodePath`, so rendering the same
//! tree twice yields identical output.

use domlens_dom::{Attribute, ElementNode, NodePath, ParsedNode};
use serde::Serialize;

use crate::palette::{ATTRIBUTE_STYLE, Palette, Style};

/// Result of rendering one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    /// Nothing visible (absent node, whitespace-only text)
    Empty,
    /// A single text leaf or element container
    Unit(RenderUnit),
    /// Flattened children of a document root
    Sequence(Vec<Rendered>),
}

impl Rendered {
    /// True when nothing visible was produced
    pub fn is_empty(&self) -> bool {
        match self {
            Rendered::Empty => true,
            Rendered::Unit(_) => false,
            Rendered::Sequence(items) => items.iter().all(Rendered::is_empty),
        }
    }

    /// Top-level visible units in order, with sequences flattened
    pub fn units(&self) -> Vec<&RenderUnit> {
        let mut out = Vec::new();
        self.collect_units(&mut out);
        out
    }

    fn collect_units<'a>(&'a self, out: &mut Vec<&'a RenderUnit>) {
        match self {
            Rendered::Empty => {}
            Rendered::Unit(unit) => out.push(unit),
            Rendered::Sequence(items) => {
                for item in items {
                    item.collect_units(out);
                }
            }
        }
    }

    pub fn as_unit(&self) -> Option<&RenderUnit> {
        match self {
            Rendered::Unit(unit) => Some(unit),
            _ => None,
        }
    }
}

/// A visible unit of the render tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RenderUnit {
    /// Leaf holding trimmed text content
    Text {
        key: NodePath,
        style: Style,
        text: String,
    },
    /// Container with a tag header, attribute chips and one slot per child
    Element {
        key: NodePath,
        style: Style,
        tag: String,
        attributes: Vec<AttributeChip>,
        children: Vec<Rendered>,
    },
}

impl RenderUnit {
    pub fn key(&self) -> &NodePath {
        match self {
            RenderUnit::Text { key, .. } | RenderUnit::Element { key, .. } => key,
        }
    }

    pub fn style(&self) -> &Style {
        match self {
            RenderUnit::Text { style, .. } | RenderUnit::Element { style, .. } => style,
        }
    }

    /// Tag name for element units
    pub fn tag(&self) -> Option<&str> {
        match self {
            RenderUnit::Element { tag, .. } => Some(tag),
            RenderUnit::Text { .. } => None,
        }
    }

    /// Trimmed content for text units
    pub fn text(&self) -> Option<&str> {
        match self {
            RenderUnit::Text { text, .. } => Some(text),
            RenderUnit::Element { .. } => None,
        }
    }

    pub fn attributes(&self) -> &[AttributeChip] {
        match self {
            RenderUnit::Element { attributes, .. } => attributes,
            RenderUnit::Text { .. } => &[],
        }
    }

    /// Child slots, one per source child (some may be empty)
    pub fn children(&self) -> &[Rendered] {
        match self {
            RenderUnit::Element { children, .. } => children,
            RenderUnit::Text { .. } => &[],
        }
    }
}

/// One rendered `name="value"` attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeChip {
    /// Position within the element's attribute list
    pub index: usize,
    pub name: String,
    pub value: String,
    pub style: &'static str,
}

impl AttributeChip {
    fn new(index: usize, attr: &Attribute) -> Self {
        Self {
            index,
            name: attr.name.clone(),
            value: attr.value.clone(),
            style: ATTRIBUTE_STYLE,
        }
    }

    /// Key unique within the owning element, e.g. `0.1@attr2`
    pub fn key(&self, owner: &NodePath) -> String {
        format!("{owner}@attr{}", self.index)
    }

    /// Display label `name="value"`
    pub fn label(&self) -> String {
        format!("{}=\"{}\"", self.name, self.value)
    }
}

/// Renders parsed trees with an injected palette
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    palette: Palette,
}

impl TreeRenderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render `node` at `depth`; the root call uses depth 0
    pub fn render(&self, node: Option<&ParsedNode>, depth: usize) -> Rendered {
        match node {
            Some(node) => self.render_node(node, depth, NodePath::root()),
            None => Rendered::Empty,
        }
    }

    fn render_node(&self, node: &ParsedNode, depth: usize, path: NodePath) -> Rendered {
        match node {
            ParsedNode::Text { value } => {
                let text = value.trim();
                if text.is_empty() {
                    return Rendered::Empty;
                }
                Rendered::Unit(RenderUnit::Text {
                    key: path,
                    style: self.palette.style_for(depth),
                    text: text.to_string(),
                })
            }
            ParsedNode::Element(elem) => Rendered::Unit(self.render_element(elem, depth, path)),
            // The root adds no nesting level: children stay at the same depth
            ParsedNode::Document { children } => Rendered::Sequence(
                children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| self.render_node(child, depth, path.child(i)))
                    .collect(),
            ),
        }
    }

    fn render_element(&self, elem: &ElementNode, depth: usize, path: NodePath) -> RenderUnit {
        let attributes = elem
            .attributes
            .iter()
            .enumerate()
            .map(|(i, attr)| AttributeChip::new(i, attr))
            .collect();
        let children = elem
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| self.render_node(child, depth + 1, path.child(i)))
            .collect();

        RenderUnit::Element {
            style: self.palette.style_for(depth),
            key: path,
            tag: elem.tag_name.clone(),
            attributes,
            children,
        }
    }
}
