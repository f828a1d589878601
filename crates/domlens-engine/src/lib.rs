//! domlens Engine
//!
//! Ties the parser and renderer together into an analysis session and
//! carries the configuration shared by the front ends.
//!
//! # Example
//! ```rust,ignore
//! use domlens_engine::{Analyzer, Config, View};
//!
//! let mut analyzer = Analyzer::from_config(&Config::default())?;
//! analyzer.set_input("<p>Hello</p>");
//! analyzer.analyze()?;
//! if let View::Tree(rendered) = analyzer.view() {
//!     println!("{}", domlens_engine::render::OutlineWriter::new().write(&rendered));
//! }
//! ```

mod analyzer;
mod config;
pub mod shorten;

pub use analyzer::{AnalyzeError, Analyzer, ERROR_PREFIX, PLACEHOLDER, View};
pub use config::{Config, ConfigError, OutputFormat, ParserConfig, RenderConfig, ShortenerConfig};
pub use shorten::{ShortenClient, ShortenError, ShortenedUrl};

// Re-export sub-crates for advanced usage
pub use domlens_dom as dom;
pub use domlens_html as html;
pub use domlens_render as render;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
