use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{CompilerConfig, CssStrategy, OutputFormat};
use crate::errors::Result;

/// Skin Compiler CLI - compiles Tailwind-styled JSX skins to Web Component
/// or React output
#[derive(Parser, Debug)]
#[command(name = "skin-compiler")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile skin source files to the configured output format
    Compile(CompileArgs),
    /// Compile a single skin from stdin and write the result to stdout
    Pipe(PipeArgs),
}

/// Arguments for the compile command
#[derive(Parser, Debug, Clone)]
pub struct CompileArgs {
    /// Input file patterns (glob patterns supported)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATTERN",
        required = true,
        num_args = 1..,
        help = "Input file patterns of skin sources"
    )]
    pub input: Vec<String>,

    /// Output directory
    #[arg(
        short = 'o',
        long = "out-dir",
        value_name = "DIR",
        required = true,
        help = "Directory where compiled output files are written"
    )]
    pub out_dir: PathBuf,

    /// Configuration file path
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "Path to a configuration file (YAML or JSON)"
    )]
    pub config: Option<PathBuf>,

    /// Output format override
    #[arg(long = "format", value_enum, help = "Output format (overrides the config file)")]
    pub format: Option<OutputFormat>,

    /// CSS strategy override
    #[arg(long = "css", value_enum, help = "CSS strategy (overrides the config file)")]
    pub css: Option<CssStrategy>,

    /// Exclude patterns (glob patterns to exclude)
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATTERN",
        num_args = 0..,
        help = "Patterns to exclude from scanning"
    )]
    pub exclude: Vec<String>,

    /// Number of parallel threads to use
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "NUM",
        help = "Number of parallel threads to use (defaults to number of CPU cores)"
    )]
    pub jobs: Option<usize>,

    /// Build report path
    #[arg(
        long = "report",
        value_name = "PATH",
        help = "Write a JSON build report to this path"
    )]
    pub report: Option<PathBuf>,

    /// Suppress warnings
    #[arg(
        long = "no-warnings",
        default_value_t = false,
        help = "Suppress compilation warnings in the output"
    )]
    pub no_warnings: bool,

    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        default_value_t = false,
        help = "Enable verbose output"
    )]
    pub verbose: bool,

    /// Dry run (don't write output files)
    #[arg(
        long = "dry-run",
        default_value_t = false,
        help = "Compile but don't write output files"
    )]
    pub dry_run: bool,
}

impl CompileArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.input.is_empty() {
            return Err("At least one input pattern must be provided".to_string());
        }

        if let Some(jobs) = self.jobs {
            if jobs == 0 {
                return Err("Number of jobs must be at least 1".to_string());
            }
        }

        Ok(())
    }

    /// Load the config file (if any) and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<CompilerConfig> {
        let mut config = match &self.config {
            Some(path) => CompilerConfig::from_file(path)?,
            None => CompilerConfig::default(),
        };
        if let Some(format) = self.format {
            config.output_format = format;
        }
        if let Some(css) = self.css {
            config.css_strategy = css;
        }
        if self.no_warnings {
            config.warnings = false;
        }
        Ok(config)
    }
}

/// Arguments for the pipe command
#[derive(Parser, Debug, Clone)]
pub struct PipeArgs {
    /// Output format override
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// CSS strategy override
    #[arg(long = "css", value_enum)]
    pub css: Option<CssStrategy>,

    /// Source name used in error messages
    #[arg(
        long = "source-name",
        value_name = "NAME",
        help = "Source name used in error messages (defaults to 'stdin')"
    )]
    pub source_name: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl PipeArgs {
    pub fn resolve_config(&self) -> Result<CompilerConfig> {
        let mut config = match &self.config {
            Some(path) => CompilerConfig::from_file(path)?,
            None => CompilerConfig::default(),
        };
        if let Some(format) = self.format {
            config.output_format = format;
        }
        if let Some(css) = self.css {
            config.css_strategy = css;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_jobs() {
        let args = CompileArgs {
            input: vec!["src/*.jsx".to_string()],
            out_dir: PathBuf::from("dist"),
            config: None,
            format: None,
            css: None,
            exclude: vec![],
            jobs: Some(0),
            report: None,
            no_warnings: false,
            verbose: false,
            dry_run: false,
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_flag_overrides_apply() {
        let args = CompileArgs {
            input: vec!["src/*.jsx".to_string()],
            out_dir: PathBuf::from("dist"),
            config: None,
            format: Some(OutputFormat::React),
            css: Some(CssStrategy::Vanilla),
            exclude: vec![],
            jobs: None,
            report: None,
            no_warnings: true,
            verbose: false,
            dry_run: false,
        };
        let config = args.resolve_config().unwrap();
        assert_eq!(config.output_format, OutputFormat::React);
        assert_eq!(config.css_strategy, CssStrategy::Vanilla);
        assert!(!config.warnings);
    }
}
