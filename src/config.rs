//! Configuration handling for taboo

use std::path::PathBuf;

use crate::engine::JoinKind;

/// Output format for rendered tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Box-drawn grid
    #[default]
    Grid,
    /// Fixed-width text as produced by `print`
    Text,
    /// JSON array of records
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(OutputFormat::Grid),
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for loading and rendering tables
#[derive(Debug, Clone)]
pub struct Config {
    /// Input files, in command-line order
    pub files: Vec<PathBuf>,
    /// Join key on the left table
    pub left_key: Option<String>,
    /// Join key on the right table
    pub right_key: Option<String>,
    /// Join variant
    pub join_kind: JoinKind,
    /// `header=value` filters, all of which must hold
    pub where_terms: Vec<(String, String)>,
    /// Output format
    pub output_format: OutputFormat,
    /// For Excel files: which sheet to load
    pub sheet_name: Option<String>,
    /// Minimum column width for text output
    pub column_width: usize,
    /// Colour the grid header
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            left_key: None,
            right_key: None,
            join_kind: JoinKind::default(),
            where_terms: Vec::new(),
            output_format: OutputFormat::default(),
            sheet_name: None,
            column_width: crate::output::DEFAULT_COLUMN_WIDTH,
            color: false,
        }
    }
}

impl Config {
    /// Create a new Config with input files
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            ..Default::default()
        }
    }

    /// Set the join keys
    pub fn with_keys(mut self, left_key: String, right_key: String) -> Self {
        self.left_key = Some(left_key);
        self.right_key = Some(right_key);
        self
    }

    /// Set the join variant
    pub fn with_join_kind(mut self, kind: JoinKind) -> Self {
        self.join_kind = kind;
        self
    }

    /// Set row filters
    pub fn with_where_terms(mut self, terms: Vec<(String, String)>) -> Self {
        self.where_terms = terms;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set Excel sheet name
    pub fn with_sheet_name(mut self, name: String) -> Self {
        self.sheet_name = Some(name);
        self
    }

    /// Set the minimum column width for text output
    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    /// Enable a coloured grid header
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Split `header=value` at the first `=`
pub fn parse_where_term(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((header, value)) if !header.is_empty() => Ok((header.to_string(), value.to_string())),
        _ => Err(format!("Expected header=value, got: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_parse_where_term() {
        assert_eq!(
            parse_where_term("name=mr=meowgi"),
            Ok(("name".to_string(), "mr=meowgi".to_string()))
        );
        assert!(parse_where_term("=x").is_err());
        assert!(parse_where_term("name").is_err());
    }

    #[test]
    fn test_builder() {
        let config = Config::new(vec![PathBuf::from("a.csv")])
            .with_keys("color".into(), "colour".into())
            .with_join_kind(JoinKind::Inner)
            .with_column_width(20);
        assert_eq!(config.left_key.as_deref(), Some("color"));
        assert_eq!(config.right_key.as_deref(), Some("colour"));
        assert_eq!(config.join_kind, JoinKind::Inner);
        assert_eq!(config.column_width, 20);
        assert_eq!(config.output_format, OutputFormat::Grid);
    }
}
