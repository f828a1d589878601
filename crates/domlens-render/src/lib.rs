//! domlens Render - Tree renderer and output writers
//!
//! Walks a parsed document tree and produces a nested, depth-styled render
//! tree. Writers turn that render tree into an indented outline, HTML markup
//! or JSON.
//!
//! # Example
//! ```rust,ignore
//! use domlens_render::{Palette, TreeRenderer, OutlineWriter};
//!
//! let renderer = TreeRenderer::new(Palette::default());
//! let rendered = renderer.render(Some(&document), 0);
//! print!("{}", OutlineWriter::new().write(&rendered));
//! ```

mod html;
mod outline;
mod palette;
mod tree;

pub use html::HtmlWriter;
pub use outline::OutlineWriter;
pub use palette::{ATTRIBUTE_STYLE, DEFAULT_PALETTE, Palette, PaletteError, Style};
pub use tree::{AttributeChip, RenderUnit, Rendered, TreeRenderer};

/// Serialize a render tree as pretty-printed JSON
pub fn to_json(rendered: &Rendered) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rendered)
}
