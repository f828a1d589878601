//! Depth palette
//!
//! A fixed, ordered list of style identifiers cycled by depth.

use serde::Serialize;

/// Default style classes, light to dark in three hues
pub const DEFAULT_PALETTE: [&str; 9] = [
    "bg-blue-50",
    "bg-blue-100",
    "bg-blue-200",
    "bg-green-50",
    "bg-green-100",
    "bg-green-200",
    "bg-purple-50",
    "bg-purple-100",
    "bg-purple-200",
];

/// Style class applied to attribute chips regardless of depth
pub const ATTRIBUTE_STYLE: &str = "bg-gray-100";

/// Palette error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("palette must contain at least one style")]
    Empty,
}

/// Immutable, non-empty style palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    styles: Vec<String>,
}

impl Palette {
    /// Build a palette from style identifiers
    pub fn new<I, S>(styles: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let styles: Vec<String> = styles.into_iter().map(Into::into).collect();
        if styles.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { styles })
    }

    /// Number of styles before the cycle repeats
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Style for the given depth: `palette[depth mod N]`
    #[inline]
    pub fn style_for(&self, depth: usize) -> Style {
        let index = depth % self.styles.len();
        Style {
            index,
            class: self.styles[index].clone(),
        }
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            styles: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A resolved style: palette slot and its class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Style {
    pub index: usize,
    pub class: String,
}
