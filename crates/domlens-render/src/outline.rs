//! Outline writer - indented text tree for terminals

use std::fmt::Write;

use owo_colors::{AnsiColors, OwoColorize};

use crate::tree::{RenderUnit, Rendered};

/// Terminal colours cycled by palette slot
const TERMINAL_COLORS: [AnsiColors; 6] = [
    AnsiColors::Blue,
    AnsiColors::Cyan,
    AnsiColors::Green,
    AnsiColors::Yellow,
    AnsiColors::Magenta,
    AnsiColors::Red,
];

/// Writes one line per visible unit, indented by nesting level
#[derive(Debug, Clone)]
pub struct OutlineWriter {
    /// Emit ANSI colours
    pub color: bool,
    /// Append the palette class to each line
    pub show_styles: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for OutlineWriter {
    fn default() -> Self {
        Self {
            color: false,
            show_styles: false,
            indent: "  ".to_string(),
        }
    }
}

impl OutlineWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_styles(mut self, show_styles: bool) -> Self {
        self.show_styles = show_styles;
        self
    }

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
        for _ in 0..level {
            output.push_str(&self.indent);
        }

        let mut line = match unit {
            RenderUnit::Text { text, .. } => format!("Text: \"{text}\""),
            RenderUnit::Element { tag, attributes, .. } => {
                let mut header = format!("<{tag}>");
                for chip in attributes {
                    header.push(' ');
                    header.push_str(&chip.label());
                }
                header
            }
        };
        if self.show_styles {
            let _ = write!(line, " [{}]", unit.style().class);
        }

        if self.color {
            let color = TERMINAL_COLORS[unit.style().index % TERMINAL_COLORS.len()];
            match unit {
                RenderUnit::Element { .. } => {
                    let _ = write!(output, "{}", line.color(color).bold());
                }
                RenderUnit::Text { .. } => {
                    let _ = write!(output, "{}", line.color(color));
                }
            }
        } else {
            output.push_str(&line);
        }
        output.push('\n');

        for child in unit.children() {
            self.write_rendered(child, output, level + 1);
        }
    }
}
