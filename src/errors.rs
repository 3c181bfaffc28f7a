use thiserror::Error;

/// Main error type for the skin-compiler crate
#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("No files found matching the provided patterns")]
    NoFilesFound,

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to write output to {path}: {message}")]
    OutputError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("No pipeline registered for {key}")]
    UnknownPipeline { key: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CompilerError>;
