//! JSON build report written by the CLI alongside the compiled outputs.
//!
//! The report carries the timestamp and statistics; compiled output files
//! never do, so repeated compilations of unchanged input stay byte-identical.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{CssStrategy, OutputFormat};

/// Metadata for the generated report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Version of the report format
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: DateTime<Utc>,

    /// Number of skin entry files compiled
    pub files_compiled: usize,

    pub output_format: String,

    pub css_strategy: String,

    /// Compiler version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_version: Option<String>,
}

/// Per-skin compilation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinReportEntry {
    /// Output files written for this skin
    pub outputs: Vec<String>,

    /// Warnings accumulated while compiling this skin
    pub warnings: Vec<String>,
}

/// Complete report structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileReport {
    pub metadata: ReportMetadata,

    /// Map of entry file to its compilation record
    pub skins: IndexMap<String, SkinReportEntry>,
}

impl CompileReport {
    pub fn new(output_format: OutputFormat, css_strategy: CssStrategy) -> Self {
        Self {
            metadata: ReportMetadata {
                version: "1.0.0".to_string(),
                generated_at: Utc::now(),
                files_compiled: 0,
                output_format: output_format.to_string(),
                css_strategy: css_strategy.to_string(),
                compiler_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            },
            skins: IndexMap::new(),
        }
    }

    pub fn add_skin(&mut self, entry: String, outputs: Vec<String>, warnings: Vec<String>) {
        self.metadata.files_compiled += 1;
        self.skins
            .insert(entry, SkinReportEntry { outputs, warnings });
    }

    /// Convert report to JSON value
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Convert report to pretty JSON string
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_creation() {
        let report = CompileReport::new(OutputFormat::WebComponent, CssStrategy::Inline);
        assert_eq!(report.metadata.version, "1.0.0");
        assert_eq!(report.metadata.files_compiled, 0);
        assert_eq!(report.metadata.output_format, "web-component");
        assert_eq!(report.metadata.css_strategy, "inline");
    }

    #[test]
    fn test_add_skin_counts_files() {
        let mut report = CompileReport::new(OutputFormat::React, CssStrategy::CssModules);
        report.add_skin(
            "src/PlayerSkin.jsx".to_string(),
            vec!["PlayerSkin.jsx".to_string(), "PlayerSkin.module.css".to_string()],
            vec!["excluded import 'react'".to_string()],
        );
        report.add_skin("src/MiniSkin.jsx".to_string(), vec![], vec![]);

        assert_eq!(report.metadata.files_compiled, 2);
        assert_eq!(report.skins["src/PlayerSkin.jsx"].outputs.len(), 2);
        assert_eq!(report.skins["src/PlayerSkin.jsx"].warnings.len(), 1);
    }

    #[test]
    fn test_json_serialization() {
        let report = CompileReport::new(OutputFormat::WebComponent, CssStrategy::Inline);
        let json = report.to_json();

        assert!(json["metadata"].is_object());
        assert_eq!(json["metadata"]["version"], "1.0.0");
        assert!(json["skins"].is_object());
    }
}
