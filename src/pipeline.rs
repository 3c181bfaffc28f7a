//! Pipeline selection and the per-file compile entry points.
//!
//! The registry maps a typed `(input, output, css-strategy)` key to a
//! concrete pipeline function. Registering a key twice is a configuration
//! error at startup; asking for an unregistered key is reported immediately,
//! never deferred.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::attributes::camel_to_kebab;
use crate::config::{CompilerConfig, CssStrategy, OutputFormat};
use crate::css::{compile_tailwind_to_css, TailwindCompilationConfig};
use crate::design_system::DesignSystem;
use crate::errors::{CompilerError, Result};
use crate::generator::{generate_react_module, generate_skin_module, SkinModuleData};
use crate::imports::transform_imports;
use crate::source_parser::{parse_source, AttrValue, ImportInfo, JsxChild, JsxElement, ParseConfig};

/// Kind of source fed into the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    /// JSX/TSX component source.
    React,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::React => write!(f, "react"),
        }
    }
}

/// Typed registry key; no stringly-typed composite keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub input: InputType,
    pub output: OutputFormat,
    pub css: CssStrategy,
}

impl fmt::Display for PipelineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.input, self.output, self.css)
    }
}

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationFile {
    pub path: String,
    pub content: String,
}

/// Result of compiling one skin source.
#[derive(Debug, Clone, Default)]
pub struct CompilationOutput {
    pub files: Vec<CompilationFile>,
    pub warnings: Vec<String>,
}

pub type PipelineFn = fn(&str, &str, &CompilerConfig) -> Result<CompilationOutput>;

/// Dispatch table from pipeline key to implementation.
pub struct PipelineRegistry {
    pipelines: HashMap<PipelineKey, PipelineFn>,
}

impl PipelineRegistry {
    pub fn new() -> Self {
        Self {
            pipelines: HashMap::new(),
        }
    }

    /// The built-in pipelines.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.pipelines.insert(
            PipelineKey {
                input: InputType::React,
                output: OutputFormat::WebComponent,
                css: CssStrategy::Inline,
            },
            compile_web_component_inline,
        );
        registry.pipelines.insert(
            PipelineKey {
                input: InputType::React,
                output: OutputFormat::React,
                css: CssStrategy::CssModules,
            },
            compile_react_css_modules,
        );
        registry.pipelines.insert(
            PipelineKey {
                input: InputType::React,
                output: OutputFormat::React,
                css: CssStrategy::Vanilla,
            },
            compile_react_vanilla,
        );
        registry
    }

    /// Register a pipeline; a duplicate key is a configuration error.
    pub fn register(&mut self, key: PipelineKey, pipeline: PipelineFn) -> Result<()> {
        if self.pipelines.contains_key(&key) {
            return Err(CompilerError::ConfigError {
                message: format!("pipeline '{}' registered twice", key),
            });
        }
        self.pipelines.insert(key, pipeline);
        Ok(())
    }

    pub fn get(&self, key: &PipelineKey) -> Result<PipelineFn> {
        self.pipelines
            .get(key)
            .copied()
            .ok_or_else(|| CompilerError::UnknownPipeline {
                key: key.to_string(),
            })
    }
}

impl Default for PipelineRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Compile one skin file through the default registry.
pub fn compile(entry_file: &Path, config: &CompilerConfig) -> Result<CompilationOutput> {
    let source = fs::read_to_string(entry_file).map_err(|e| CompilerError::ParseError {
        path: entry_file.display().to_string(),
        message: format!("Failed to read file: {}", e),
    })?;
    compile_source(&source, &entry_file.display().to_string(), config)
}

/// Compile already-resident source text through the default registry.
pub fn compile_source(
    source: &str,
    source_name: &str,
    config: &CompilerConfig,
) -> Result<CompilationOutput> {
    let registry = PipelineRegistry::with_defaults();
    let key = PipelineKey {
        input: InputType::React,
        output: config.output_format,
        css: config.css_strategy,
    };
    (registry.get(&key)?)(source, source_name, config)
}

struct PreparedSkin {
    component_name: String,
    imports: Vec<ImportInfo>,
    jsx: Option<JsxElement>,
    css: String,
    class_names: IndexMap<String, String>,
    type_declarations: String,
    warnings: Vec<String>,
}

fn prepare(
    source: &str,
    source_name: &str,
    config: &CompilerConfig,
    strategy: CssStrategy,
) -> Result<PreparedSkin> {
    let parsed = parse_source(source, source_name, &ParseConfig::full())?;
    let mut warnings = Vec::new();

    let component_name = match parsed.component_name {
        Some(name) => name,
        None => {
            warnings.push(format!(
                "no component found in {}; defaulting to 'Skin'",
                source_name
            ));
            "Skin".to_string()
        }
    };

    let (imports, import_warnings) = transform_imports(&parsed.imports, config);
    warnings.extend(import_warnings);

    let styles = parsed.styles.unwrap_or_default();
    if styles.is_empty() {
        if let Some(jsx) = &parsed.jsx_root {
            if references_styles(jsx) {
                warnings.push(format!(
                    "no styles object found in {}; class references left unresolved",
                    source_name
                ));
            }
        }
    }

    let themed;
    let design_system = if config.theme.is_empty() {
        DesignSystem::shared()
    } else {
        themed = DesignSystem::simplified_with_theme(&config.theme);
        &themed
    };

    let css_out = compile_tailwind_to_css(&TailwindCompilationConfig {
        styles: &styles,
        design_system,
        strategy,
        component_name: &component_name,
        indent: config.indent,
    });
    warnings.extend(css_out.warnings);

    Ok(PreparedSkin {
        component_name,
        imports,
        jsx: parsed.jsx_root,
        css: css_out.css,
        class_names: css_out.class_names,
        type_declarations: css_out.type_declarations,
        warnings,
    })
}

fn references_styles(element: &JsxElement) -> bool {
    element
        .attributes
        .iter()
        .any(|a| matches!(a.value, AttrValue::StyleRef(_)))
        || element.children.iter().any(|child| match child {
            JsxChild::Element(el) => references_styles(el),
            _ => false,
        })
}

fn gate_warnings(config: &CompilerConfig, warnings: Vec<String>) -> Vec<String> {
    if config.warnings {
        warnings
    } else {
        Vec::new()
    }
}

fn compile_web_component_inline(
    source: &str,
    source_name: &str,
    config: &CompilerConfig,
) -> Result<CompilationOutput> {
    let skin = prepare(source, source_name, config, CssStrategy::Inline)?;
    let module = generate_skin_module(&SkinModuleData {
        component_name: &skin.component_name,
        imports: &skin.imports,
        jsx: skin.jsx.as_ref(),
        css: &skin.css,
        class_names: &skin.class_names,
        component_mappings: &config.component_mappings,
        css_strategy: CssStrategy::Inline,
        indent: config.indent,
    });

    Ok(CompilationOutput {
        files: vec![CompilationFile {
            path: format!("{}.js", skin.component_name),
            content: module,
        }],
        warnings: gate_warnings(config, skin.warnings),
    })
}

fn compile_react_css_modules(
    source: &str,
    source_name: &str,
    config: &CompilerConfig,
) -> Result<CompilationOutput> {
    let skin = prepare(source, source_name, config, CssStrategy::CssModules)?;
    let module = generate_react_module(&SkinModuleData {
        component_name: &skin.component_name,
        imports: &skin.imports,
        jsx: skin.jsx.as_ref(),
        css: &skin.css,
        class_names: &skin.class_names,
        component_mappings: &config.component_mappings,
        css_strategy: CssStrategy::CssModules,
        indent: config.indent,
    });

    Ok(CompilationOutput {
        files: vec![
            CompilationFile {
                path: format!("{}.jsx", skin.component_name),
                content: module,
            },
            CompilationFile {
                path: format!("{}.module.css", skin.component_name),
                content: skin.css,
            },
            CompilationFile {
                path: format!("{}.module.css.d.ts", skin.component_name),
                content: skin.type_declarations,
            },
        ],
        warnings: gate_warnings(config, skin.warnings),
    })
}

fn compile_react_vanilla(
    source: &str,
    source_name: &str,
    config: &CompilerConfig,
) -> Result<CompilationOutput> {
    let skin = prepare(source, source_name, config, CssStrategy::Vanilla)?;
    let module = generate_react_module(&SkinModuleData {
        component_name: &skin.component_name,
        imports: &skin.imports,
        jsx: skin.jsx.as_ref(),
        css: &skin.css,
        class_names: &skin.class_names,
        component_mappings: &config.component_mappings,
        css_strategy: CssStrategy::Vanilla,
        indent: config.indent,
    });

    Ok(CompilationOutput {
        files: vec![
            CompilationFile {
                path: format!("{}.jsx", skin.component_name),
                content: module,
            },
            CompilationFile {
                path: format!("{}.css", camel_to_kebab(&skin.component_name)),
                content: skin.css,
            },
        ],
        warnings: gate_warnings(config, skin.warnings),
    })
}
