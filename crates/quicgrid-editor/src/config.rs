//! Configuration management for the editor.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QUICGRID_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use quicgrid_ir::{
    ControlPolicy, DEFAULT_BODY_WIDTH, Grid, GridBuilder, MAX_TRACKS, SlotGeometry, Symbol,
    SymbolCatalog,
};

/// Complete editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Gate palette and symbol roles
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Maximum number of tracks (1-8)
    #[serde(default = "default_max_tracks")]
    pub max_tracks: usize,

    /// Gate body width as a fraction of the column pitch
    #[serde(default = "default_body_width")]
    pub body_width: f64,

    /// Handling of columns with more than one control
    #[serde(default)]
    pub control_policy: ControlPolicy,
}

/// Palette definition with labels as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Palette symbols in display order
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Symbols acting as controls
    #[serde(default = "default_controls")]
    pub controls: Vec<String>,

    /// Symbols that can be targeted by a control
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,

    /// Symbol used for empty cells
    #[serde(default = "default_identity")]
    pub identity: String,
}

fn default_max_tracks() -> usize {
    MAX_TRACKS
}

fn default_body_width() -> f64 {
    DEFAULT_BODY_WIDTH
}

fn default_symbols() -> Vec<String> {
    SymbolCatalog::STANDARD_SYMBOLS
        .iter()
        .map(char::to_string)
        .collect()
}

fn default_controls() -> Vec<String> {
    vec!["C".into()]
}

fn default_targets() -> Vec<String> {
    ["X", "Y", "Z", "N"].map(String::from).to_vec()
}

fn default_identity() -> String {
    "I".into()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            symbols: default_symbols(),
            controls: default_controls(),
            targets: default_targets(),
            identity: default_identity(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            catalog: CatalogConfig::default(),
            max_tracks: default_max_tracks(),
            body_width: default_body_width(),
            control_policy: ControlPolicy::default(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of defaults.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            EditorConfig::default()
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that are set and parse override the current values.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from an arbitrary variable lookup.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("QUICGRID_MAX_TRACKS") {
            if let Ok(val) = v.parse() {
                self.max_tracks = val;
            }
        }
        if let Some(v) = lookup("QUICGRID_BODY_WIDTH") {
            if let Ok(val) = v.parse() {
                self.body_width = val;
            }
        }
        if let Some(v) = lookup("QUICGRID_CONTROL_POLICY") {
            if let Ok(val) = v.parse() {
                self.control_policy = val;
            }
        }
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tracks == 0 || self.max_tracks > MAX_TRACKS {
            return Err(ConfigError::ValidationError(format!(
                "max_tracks must be between 1 and {MAX_TRACKS}, got {}",
                self.max_tracks
            )));
        }

        SlotGeometry::new(self.body_width)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        self.catalog()?;

        Ok(())
    }

    /// Build the symbol catalog described by this configuration.
    pub fn catalog(&self) -> Result<SymbolCatalog, ConfigError> {
        let c = &self.catalog;
        SymbolCatalog::from_labels(&c.symbols, &c.controls, &c.targets, &c.identity)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Grid template carrying the configured limits, without tracks.
    pub fn grid_template(&self) -> Result<GridBuilder, ConfigError> {
        let geometry = SlotGeometry::new(self.body_width)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        let identity = Symbol::parse(&self.catalog.identity)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        Ok(Grid::builder()
            .max_tracks(self.max_tracks)
            .geometry(geometry)
            .identity(identity))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicgrid_ir::SymbolRole;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.max_tracks, 8);
        assert_eq!(config.control_policy, ControlPolicy::Strict);
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog().unwrap(), SymbolCatalog::standard());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = EditorConfig::from_yaml_str("max_tracks: 4\ncontrol_policy: first_wins\n")
            .unwrap();
        assert_eq!(config.max_tracks, 4);
        assert_eq!(config.control_policy, ControlPolicy::FirstWins);
        assert_eq!(config.catalog, CatalogConfig::default());
    }

    #[test]
    fn test_custom_catalog() {
        let yaml = r"
catalog:
  symbols: [H, A, B, '.']
  controls: [A]
  targets: [B]
  identity: '.'
";
        let config = EditorConfig::from_yaml_str(yaml).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.role(Symbol::new('A')), SymbolRole::Control);
        assert_eq!(catalog.identity(), Symbol::new('.'));

        let grid = config.grid_template().unwrap().tracks(1).build().unwrap();
        assert_eq!(grid.identity(), Symbol::new('.'));
    }

    #[test]
    fn test_rejects_multi_character_symbol() {
        let yaml = "catalog:\n  symbols: [H, CN, I]\n";
        assert!(matches!(
            EditorConfig::from_yaml_str(yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_column_separator_in_catalog() {
        let palette = "catalog:\n  symbols: [H, ',', I]\n";
        assert!(matches!(
            EditorConfig::from_yaml_str(palette),
            Err(ConfigError::ValidationError(_))
        ));

        let identity = "catalog:\n  symbols: [H, ',']\n  identity: ','\n";
        assert!(matches!(
            EditorConfig::from_yaml_str(identity),
            Err(ConfigError::ValidationError(_))
        ));

        let mut config = EditorConfig::default();
        config.catalog.identity = ",".into();
        assert!(config.grid_template().is_err());
    }

    #[test]
    fn test_rejects_bad_limits() {
        assert!(EditorConfig::from_yaml_str("max_tracks: 9").is_err());
        assert!(EditorConfig::from_yaml_str("max_tracks: 0").is_err());
        assert!(EditorConfig::from_yaml_str("body_width: 1.5").is_err());
        assert!(matches!(
            EditorConfig::from_yaml_str("max_tracks: [1"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_merge_vars_overrides() {
        let vars: HashMap<&str, &str> = [
            ("QUICGRID_MAX_TRACKS", "3"),
            ("QUICGRID_CONTROL_POLICY", "first-wins"),
            ("QUICGRID_BODY_WIDTH", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config =
            EditorConfig::default().merge_vars(|k| vars.get(k).map(|v| (*v).to_string()));
        assert_eq!(config.max_tracks, 3);
        assert_eq!(config.control_policy, ControlPolicy::FirstWins);
        assert!((config.body_width - DEFAULT_BODY_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_tracks: 5").unwrap();
        let config = EditorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_tracks, 5);

        assert!(matches!(
            EditorConfig::from_file("/nonexistent/quicgrid.yaml"),
            Err(ConfigError::IoError(_))
        ));
    }
}
