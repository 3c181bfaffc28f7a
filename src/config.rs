//! Compiler configuration, loadable from YAML or JSON files.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{CompilerError, Result};

/// Target module format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    WebComponent,
    React,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::WebComponent
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::WebComponent => write!(f, "web-component"),
            OutputFormat::React => write!(f, "react"),
        }
    }
}

/// How generated CSS is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CssStrategy {
    /// Embedded in the Web Component template's `<style>` block.
    Inline,
    CssModules,
    /// Plain CSS with component-prefixed class names.
    Vanilla,
}

impl Default for CssStrategy {
    fn default() -> Self {
        CssStrategy::Inline
    }
}

impl fmt::Display for CssStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssStrategy::Inline => write!(f, "inline"),
            CssStrategy::CssModules => write!(f, "css-modules"),
            CssStrategy::Vanilla => write!(f, "vanilla"),
        }
    }
}

/// Theme extension merged into the built-in design-system vocabulary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeExtend {
    pub colors: IndexMap<String, String>,
    pub spacing: IndexMap<String, String>,
}

impl ThemeExtend {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.spacing.is_empty()
    }
}

/// Compiler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerConfig {
    /// Exact-match import source rewrites.
    pub package_mappings: IndexMap<String, String>,

    /// Per-specifier / per-tag renames.
    pub component_mappings: IndexMap<String, String>,

    /// Import exclusion patterns (boundary or extension matching).
    pub exclude_patterns: Vec<String>,

    pub css_strategy: CssStrategy,

    pub output_format: OutputFormat,

    /// Include warnings in the compilation output.
    pub warnings: bool,

    /// Indent width of generated modules and CSS.
    pub indent: usize,

    /// Optional design-system theme extension.
    pub theme: ThemeExtend,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            package_mappings: IndexMap::new(),
            component_mappings: IndexMap::new(),
            exclude_patterns: vec![
                ".css".to_string(),
                "react".to_string(),
                "react-dom".to_string(),
            ],
            css_strategy: CssStrategy::default(),
            output_format: OutputFormat::default(),
            warnings: true,
            indent: 2,
            theme: ThemeExtend::default(),
        }
    }
}

impl CompilerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CompilerError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        serde_yaml::from_str(&content).map_err(|e| CompilerError::ConfigError {
            message: format!("Failed to parse YAML config: {}", e),
        })
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CompilerError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| CompilerError::ConfigError {
            message: format!("Failed to parse JSON config: {}", e),
        })
    }

    /// Load configuration from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CompilerError::ConfigError {
                message: format!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .json",
                    path.display()
                ),
            }),
        }
    }

    /// Merge with another configuration; `other` wins on scalar options.
    pub fn merge(mut self, other: Self) -> Self {
        self.package_mappings.extend(other.package_mappings);
        self.component_mappings.extend(other.component_mappings);
        for pattern in other.exclude_patterns {
            if !self.exclude_patterns.contains(&pattern) {
                self.exclude_patterns.push(pattern);
            }
        }
        self.theme.colors.extend(other.theme.colors);
        self.theme.spacing.extend(other.theme.spacing);
        self.css_strategy = other.css_strategy;
        self.output_format = other.output_format;
        self.warnings = other.warnings;
        self.indent = other.indent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert!(config.exclude_patterns.contains(&".css".to_string()));
        assert!(config.warnings);
        assert_eq!(config.output_format, OutputFormat::WebComponent);
        assert_eq!(config.css_strategy, CssStrategy::Inline);
    }

    #[test]
    fn test_yaml_config_loading() {
        let yaml_content = r##"
packageMappings:
  "@player/react": "@player/elements"
componentMappings:
  PlayButton: media-play-button
excludePatterns:
  - ".css"
  - "react"
cssStrategy: css-modules
outputFormat: react
theme:
  colors:
    brand: "#1a73e8"
"##;

        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(yaml_content.as_bytes()).unwrap();

        let config = CompilerConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(
            config.package_mappings.get("@player/react").map(String::as_str),
            Some("@player/elements")
        );
        assert_eq!(config.css_strategy, CssStrategy::CssModules);
        assert_eq!(config.output_format, OutputFormat::React);
        assert_eq!(
            config.theme.colors.get("brand").map(String::as_str),
            Some("#1a73e8")
        );
        // Defaults still apply to unlisted fields.
        assert!(config.warnings);
        assert_eq!(config.indent, 2);
    }

    #[test]
    fn test_json_config_loading() {
        let json_content = r##"{
  "excludePatterns": [".css", "react", "react-dom"],
  "outputFormat": "web-component",
  "cssStrategy": "inline"
}"##;

        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json_content.as_bytes()).unwrap();

        let config = CompilerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.exclude_patterns.len(), 3);
        assert_eq!(config.output_format, OutputFormat::WebComponent);
    }

    #[test]
    fn test_unsupported_extension_is_config_error() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        let err = CompilerConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported config file format"));
    }

    #[test]
    fn test_config_merge() {
        let mut base = CompilerConfig::default();
        base.package_mappings
            .insert("@player/react".to_string(), "@player/elements".to_string());

        let mut other = CompilerConfig::default();
        other.css_strategy = CssStrategy::Vanilla;
        other
            .exclude_patterns
            .push("@player/styles".to_string());

        let merged = base.merge(other);
        assert_eq!(merged.css_strategy, CssStrategy::Vanilla);
        assert!(merged
            .exclude_patterns
            .contains(&"@player/styles".to_string()));
        assert_eq!(
            merged.package_mappings.get("@player/react").map(String::as_str),
            Some("@player/elements")
        );
        // No duplicated exclude patterns.
        assert_eq!(
            merged
                .exclude_patterns
                .iter()
                .filter(|p| p.as_str() == ".css")
                .count(),
            1
        );
    }
}
