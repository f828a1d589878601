//! domlens DOM - Parsed document tree
//!
//! The tree handed from the HTML parser to the renderer. Every node is one of
//! three kinds (document root, text, element) and carries only the fields of
//! its kind.

mod node;
mod path;

pub use node::{Attribute, ElementNode, NodeKind, ParsedNode};
pub use path::NodePath;
