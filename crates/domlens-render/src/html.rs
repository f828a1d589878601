//! HTML writer
//!
//! Serializes a render tree into nested `<div>` markup. Each unit carries
//! its palette class and its path key as `data-key`.

use crate::tree::{RenderUnit, Rendered};

/// HTML writer
pub struct HtmlWriter {
    /// Whether to format output with indentation
    pub pretty_print: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self {
            pretty_print: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output
    pub fn compact() -> Self {
        Self {
            pretty_print: false,
            indent: String::new(),
        }
    }

    /// Serialize a render result
    pub fn write(&self, rendered: &Rendered) -> String {
        let mut output = String::new();
        self.write_rendered(rendered, &mut output, 0);
        output
    }

    fn write_rendered(&self, rendered: &Rendered, output: &mut String, level: usize) {
        for unit in rendered.units() {
            self.write_unit(unit, output, level);
        }
    }

    fn write_unit(&self, unit: &RenderUnit, output: &mut String, level: usize) {
        match unit {
            RenderUnit::Text { key, style, text } => {
                self.open_line(output, level);
                output.push_str("<div class=\"tree-text ");
                escape_attribute(&style.class, output);
                output.push_str("\" data-key=\"");
                output.push_str(&key.to_string());
                output.push_str("\">Text: &quot;");
                escape_text(text, output);
                output.push_str("&quot;</div>");
                self.close_line(output);
            }
            RenderUnit::Element {
                key,
                style,
                tag,
                attributes,
                children,
            } => {
                self.open_line(output, level);
                output.push_str("<div class=\"tree-element ");
                escape_attribute(&style.class, output);
                output.push_str("\" data-key=\"");
                output.push_str(&key.to_string());
                output.push_str("\">");
                self.close_line(output);

                // Header: tag name and attribute chips
                self.open_line(output, level + 1);
                output.push_str("<div class=\"tree-header\"><span class=\"tree-tag\">&lt;");
                escape_text(tag, output);
                output.push_str("&gt;</span>");
                for chip in attributes {
                    output.push_str("<span class=\"tree-attr ");
                    output.push_str(chip.style);
                    output.push_str("\" data-key=\"");
                    output.push_str(&chip.key(key));
                    output.push_str("\">");
                    escape_attribute(&chip.label(), output);
                    output.push_str("</span>");
                }
                output.push_str("</div>");
                self.close_line(output);

                if !children.is_empty() {
                    self.open_line(output, level + 1);
                    output.push_str("<div class=\"tree-children\">");
                    self.close_line(output);
                    for child in children {
                        self.write_rendered(child, output, level + 2);
                    }
                    self.open_line(output, level + 1);
                    output.push_str("</div>");
                    self.close_line(output);
                }

                self.open_line(output, level);
                output.push_str("</div>");
                self.close_line(output);
            }
        }
    }

    fn open_line(&self, output: &mut String, level: usize) {
        if self.pretty_print {
            for _ in 0..level {
                output.push_str(&self.indent);
            }
        }
    }

    fn close_line(&self, output: &mut String) {
        if self.pretty_print {
            output.push('\n');
        }
    }
}

/// Append `text` with markup characters replaced by entities.
/// Double quotes are only replaced when `in_quotes` is set.
fn escape_into(text: &str, in_quotes: bool, output: &mut String) {
    let mut rest = text;
    while let Some(pos) = rest.find(['&', '<', '>', '"']) {
        output.push_str(&rest[..pos]);
        let entity = match rest.as_bytes()[pos] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            _ if in_quotes => "&quot;",
            _ => "\"",
        };
        output.push_str(entity);
        rest = &rest[pos + 1..];
    }
    output.push_str(rest);
}

fn escape_text(text: &str, output: &mut String) {
    escape_into(text, false, output);
}

fn escape_attribute(text: &str, output: &mut String) {
    escape_into(text, true, output);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Palette, TreeRenderer};
    use domlens_dom::ParsedNode;

    #[test]
    fn test_text_keeps_quotes() {
        let mut output = String::new();
        escape_text(r#"if (a < b && c > "d") return"#, &mut output);
        assert_eq!(output, r#"if (a &lt; b &amp;&amp; c &gt; "d") return"#);
    }

    #[test]
    fn test_chip_label_quotes_escaped() {
        let mut output = String::new();
        escape_attribute(r#"onclick="go('<home>')""#, &mut output);
        assert_eq!(output, "onclick=&quot;go('&lt;home&gt;')&quot;");
    }

    #[test]
    fn test_escape_passes_unicode_through() {
        let mut output = String::new();
        escape_text("naïve → café", &mut output);
        assert_eq!(output, "naïve → café");
    }

    #[test]
    fn test_compact_element() {
        let node: ParsedNode = ParsedNode::element("p")
            .with_attr("title", "a<b")
            .with_child(ParsedNode::text(" 1 & 2 "))
            .into();
        let renderer = TreeRenderer::new(Palette::new(["d0", "d1"]).unwrap());
        let rendered = renderer.render(Some(&node), 0);
        let html = HtmlWriter::compact().write(&rendered);

        assert_eq!(
            html,
            "<div class=\"tree-element d0\" data-key=\"root\">\
             <div class=\"tree-header\"><span class=\"tree-tag\">&lt;p&gt;</span>\
             <span class=\"tree-attr bg-gray-100\" data-key=\"root@attr0\">\
             title=&quot;a&lt;b&quot;</span></div>\
             <div class=\"tree-children\">\
             <div class=\"tree-text d1\" data-key=\"0\">Text: &quot;1 &amp; 2&quot;</div>\
             </div></div>"
        );
    }

    #[test]
    fn test_empty_render_writes_nothing() {
        let rendered = TreeRenderer::default().render(None, 0);
        assert_eq!(HtmlWriter::new().write(&rendered), "");
    }
}
