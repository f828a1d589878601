//! Engine Configuration
//!
//! Loaded from TOML; every section and key is optional.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use domlens_html::{DEFAULT_MAX_DEPTH, ParseOptions};
use domlens_render::{DEFAULT_PALETTE, Palette, PaletteError};
use serde::Deserialize;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

/// Engine configuration options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub parser: ParserConfig,
    pub shortener: ShortenerConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.palette()?;
        Ok(config)
    }

    /// Palette built from `render.palette`
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        Palette::new(self.render.palette.iter().cloned())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.parser.strict,
            max_depth: self.parser.max_depth,
        }
    }
}

/// Rendering options
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Depth palette, cycled by depth
    pub palette: Vec<String>,
    /// Default output format
    pub format: OutputFormat,
    /// Colour outline output
    pub color: bool,
    /// Append palette classes to outline lines
    pub show_styles: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
            format: OutputFormat::Outline,
            color: true,
            show_styles: false,
        }
    }
}

/// Parser options
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Reject documents html5ever had to repair
    pub strict: bool,
    /// Maximum element nesting accepted from the parser
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// URL shortener endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShortenerConfig {
    /// Backend base URL; requests go to `{base_url}/url/shorten`
    pub base_url: String,
    /// Prefix joined with the returned short id
    pub redirect_prefix: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            redirect_prefix: "http://localhost:8080/url/redirect/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Output format for rendered trees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Outline,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "outline" | "text" => Ok(OutputFormat::Outline),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.palette().unwrap(), Palette::default());
        assert_eq!(config.render.format, OutputFormat::Outline);
        assert!(!config.parser.strict);
        assert_eq!(config.parse_options().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.shortener.base_url, "http://localhost:8080");
        assert_eq!(config.shortener.timeout_secs, 30);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [render]
            palette = ["one", "two"]
            format = "json"

            [parser]
            strict = true
            max_depth = 64
            "#,
        )
        .unwrap();

        assert_eq!(config.palette().unwrap().len(), 2);
        assert_eq!(config.render.format, OutputFormat::Json);
        assert!(config.render.color);
        assert!(config.parse_options().strict);
        assert_eq!(config.parse_options().max_depth, 64);
        assert_eq!(config.shortener.redirect_prefix, "http://localhost:8080/url/redirect/");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.render.palette.len(), 9);
    }

    #[test]
    fn test_empty_palette_rejected() {
        let result = Config::from_toml_str("[render]\npalette = []\n");
        assert!(matches!(result, Err(ConfigError::Palette(PaletteError::Empty))));
    }

    #[test]
    fn test_bad_format_rejected() {
        let result = Config::from_toml_str("[render]\nformat = \"pdf\"\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Outline));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("domlens-config-{}.toml", std::process::id()));
        fs::write(&path, "[shortener]\nbase_url = \"http://short.test\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.shortener.base_url, "http://short.test");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/definitely/not/here/domlens.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
