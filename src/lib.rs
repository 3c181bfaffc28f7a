pub mod arbitrary;
pub mod args;
pub mod attributes;
pub mod candidate;
pub mod config;
pub mod css;
pub mod design_system;
pub mod errors;
pub mod generator;
pub mod imports;
pub mod pipeline;
pub mod report;
pub mod segment;
pub mod source_parser;

pub use args::{Cli, Commands, CompileArgs, PipeArgs};
pub use candidate::{parse_candidate, parse_variant, Candidate, Modifier, UtilityValue, Variant, VariantValue};
pub use config::{CompilerConfig, CssStrategy, OutputFormat, ThemeExtend};
pub use css::{compile_tailwind_to_css, CssModulesOutput, TailwindCompilationConfig};
pub use design_system::{DesignSystem, UtilityKind, VariantKind};
pub use errors::{CompilerError, Result};
pub use pipeline::{
    compile, compile_source, CompilationFile, CompilationOutput, InputType, PipelineKey,
    PipelineRegistry,
};
pub use report::CompileReport;
pub use segment::segment;
pub use source_parser::{parse_source, ImportInfo, JsxElement, ParseConfig, ParsedSource};

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of a multi-file build
#[derive(Debug)]
pub struct BuildResult {
    /// Number of skin entry files compiled successfully
    pub files_compiled: usize,
    /// Paths of the output files written
    pub files_written: Vec<PathBuf>,
    /// Warnings from all compiled skins
    pub warnings: Vec<String>,
    /// Per-file fatal errors; the rest of the build is unaffected
    pub failures: Vec<(PathBuf, String)>,
    /// The build report
    pub report: CompileReport,
}

/// Main build entry point: collect files, compile in parallel, write output.
pub fn build(args: CompileArgs) -> Result<BuildResult> {
    args.validate().map_err(CompilerError::InvalidInput)?;

    let config = args.resolve_config()?;
    let files = collect_files(&args.input, &args.exclude)?;

    if files.is_empty() {
        return Err(CompilerError::NoFilesFound);
    }

    if args.verbose {
        eprintln!("Compiling {} skin files...", files.len());
        eprintln!("Input patterns: {:?}", args.input);
        eprintln!("Output directory: {}", args.out_dir.display());
        eprintln!(
            "Pipeline: react/{}/{}",
            config.output_format, config.css_strategy
        );
    }

    if let Some(jobs) = args.jobs {
        // Ignore the error if the global pool is already initialized.
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global();
    }

    #[cfg(feature = "cli")]
    let progress = make_progress(files.len() as u64, args.verbose);

    let results: Vec<(PathBuf, Result<CompilationOutput>)> = files
        .par_iter()
        .map(|path| {
            let result = pipeline::compile(path, &config);
            #[cfg(feature = "cli")]
            if let Some(pb) = &progress {
                pb.inc(1);
                pb.set_message(format!(
                    "{}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                ));
            }
            (path.clone(), result)
        })
        .collect();

    #[cfg(feature = "cli")]
    if let Some(pb) = &progress {
        pb.finish_with_message("done");
    }

    let mut report = CompileReport::new(config.output_format, config.css_strategy);
    let mut files_written = Vec::new();
    let mut warnings = Vec::new();
    let mut failures = Vec::new();
    let mut files_compiled = 0usize;

    for (path, result) in results {
        match result {
            Ok(output) => {
                files_compiled += 1;
                let mut outputs = Vec::new();
                for file in &output.files {
                    let out_path = args.out_dir.join(&file.path);
                    if !args.dry_run {
                        if let Some(parent) = out_path.parent() {
                            fs::create_dir_all(parent)?;
                        }
                        write_atomic(&out_path, &file.content).map_err(|e| {
                            CompilerError::OutputError {
                                path: out_path.display().to_string(),
                                message: e.to_string(),
                            }
                        })?;
                    }
                    outputs.push(file.path.clone());
                    files_written.push(out_path);
                }
                report.add_skin(path.display().to_string(), outputs, output.warnings.clone());
                warnings.extend(output.warnings);
            }
            // One file's fatal error leaves the rest of the build intact.
            Err(e) => failures.push((path, e.to_string())),
        }
    }

    if let Some(report_path) = &args.report {
        let content = report.to_pretty_json()?;
        write_atomic(report_path, &content).map_err(|e| CompilerError::OutputError {
            path: report_path.display().to_string(),
            message: e.to_string(),
        })?;
    }

    if args.verbose {
        eprintln!("\nCompilation complete:");
        eprintln!("  - Compiled {} skins", files_compiled);
        eprintln!("  - Wrote {} files", files_written.len());
        eprintln!("  - {} warnings, {} failures", warnings.len(), failures.len());
    }

    Ok(BuildResult {
        files_compiled,
        files_written,
        warnings,
        failures,
        report,
    })
}

/// Collect files matching the given patterns
pub fn collect_files(patterns: &[String], exclude_patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for pattern in patterns {
        for entry in glob::glob(pattern)? {
            let path = entry?;

            if path.is_dir() {
                continue;
            }

            if should_exclude(&path, exclude_patterns)? {
                continue;
            }

            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// Check if a path should be excluded
fn should_exclude(path: &Path, exclude_patterns: &[String]) -> Result<bool> {
    for pattern in exclude_patterns {
        let pattern = glob::Pattern::new(pattern)?;
        if pattern.matches_path(path) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Write file atomically by writing to temp file then renaming
fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> std::io::Result<()> {
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = match path.file_name() {
        Some(name) => path.with_file_name(format!("{}.tmp", name.to_string_lossy())),
        None => path.with_extension("tmp"),
    };

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(feature = "cli")]
fn make_progress(len: u64, verbose: bool) -> Option<indicatif::ProgressBar> {
    use indicatif::{ProgressBar, ProgressStyle};

    if verbose {
        return None;
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({msg})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    Some(pb)
}

/// Handle pipe command - read a skin source from stdin, write the compiled
/// module(s) to stdout
#[cfg(feature = "cli")]
pub async fn handle_pipe_command(args: PipeArgs) -> Result<()> {
    use tokio::io::{self, AsyncReadExt, AsyncWriteExt};

    let config = args.resolve_config()?;
    let source_name = args.source_name.clone().unwrap_or_else(|| "stdin".to_string());

    let mut input = String::new();
    let mut stdin = io::stdin();
    stdin
        .read_to_string(&mut input)
        .await
        .map_err(|e| CompilerError::InvalidInput(format!("Failed to read from stdin: {}", e)))?;

    if input.trim().is_empty() {
        return Ok(());
    }

    let output = compile_source(&input, &source_name, &config)?;

    let mut stdout = io::stdout();
    let multiple = output.files.len() > 1;
    for file in &output.files {
        if multiple {
            let banner = format!("/* --- {} --- */\n", file.path);
            stdout
                .write_all(banner.as_bytes())
                .await
                .map_err(pipe_output_error)?;
        }
        stdout
            .write_all(file.content.as_bytes())
            .await
            .map_err(pipe_output_error)?;
    }
    stdout.flush().await.map_err(pipe_output_error)?;

    for warning in &output.warnings {
        eprintln!("warning: {}", warning);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn pipe_output_error(e: std::io::Error) -> CompilerError {
    CompilerError::OutputError {
        path: "stdout".to_string(),
        message: e.to_string(),
    }
}
