//! Import rewriting and exclusion.
//!
//! Exclusion uses boundary matching, not substring matching: a pattern
//! excludes a source only when they are equal, when the source continues the
//! pattern at a `/` package boundary, or when an extension pattern (leading
//! `.`) matches the end of the source. `@pkg/react-icons` is therefore
//! retained by the pattern `react`, and `react-dom` must be listed
//! explicitly.

use crate::config::CompilerConfig;
use crate::source_parser::ImportInfo;

/// Whether `source` matches any exclusion pattern.
pub fn is_excluded(source: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        if pattern.starts_with('.') {
            return source.ends_with(pattern.as_str());
        }
        source == pattern || source.starts_with(&format!("{}/", pattern))
    })
}

/// Rewrite the import list per the configuration; relative imports pass
/// through unchanged.
pub fn transform_imports(
    imports: &[ImportInfo],
    config: &CompilerConfig,
) -> (Vec<ImportInfo>, Vec<String>) {
    transform_imports_with(imports, config, |source| source.to_string())
}

/// Rewrite the import list, routing relative sources through a caller hook.
pub fn transform_imports_with<F>(
    imports: &[ImportInfo],
    config: &CompilerConfig,
    transform_relative: F,
) -> (Vec<ImportInfo>, Vec<String>)
where
    F: Fn(&str) -> String,
{
    let mut out = Vec::new();
    let mut warnings = Vec::new();

    for import in imports {
        if is_excluded(&import.source, &config.exclude_patterns) {
            warnings.push(format!("excluded import '{}'", import.source));
            continue;
        }

        let mut import = import.clone();
        if import.source.starts_with('.') {
            import.source = transform_relative(&import.source);
        } else if let Some(mapped) = config.package_mappings.get(&import.source) {
            import.source = mapped.clone();
            import.specifiers = import
                .specifiers
                .iter()
                .map(|specifier| rename_specifier(specifier, config))
                .collect();
        }
        out.push(import);
    }

    (out, warnings)
}

/// Specifier renames only apply when the mapped name is a valid identifier;
/// element-tag mappings like `media-play-button` stay out of import lists.
fn rename_specifier(specifier: &str, config: &CompilerConfig) -> String {
    match config.component_mappings.get(specifier) {
        Some(mapped) if is_identifier(mapped) => mapped.clone(),
        _ => specifier.to_string(),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(source: &str, specifiers: &[&str]) -> ImportInfo {
        ImportInfo {
            source: source.to_string(),
            specifiers: specifiers.iter().map(|s| s.to_string()).collect(),
            is_default: false,
        }
    }

    #[test]
    fn test_exact_and_boundary_exclusion() {
        let patterns = vec!["react".to_string()];
        assert!(is_excluded("react", &patterns));
        assert!(is_excluded("react/jsx-runtime", &patterns));
        // Boundary matching: substrings do not count.
        assert!(!is_excluded("@pkg/react-icons", &patterns));
        assert!(!is_excluded("react-dom", &patterns));
    }

    #[test]
    fn test_extension_pattern_exclusion() {
        let patterns = vec![".css".to_string()];
        assert!(is_excluded("./styles.module.css", &patterns));
        assert!(is_excluded("./player-skin.css", &patterns));
        assert!(!is_excluded("./player-skin", &patterns));
    }

    #[test]
    fn test_multiple_matches_exclude_once() {
        let config = CompilerConfig {
            exclude_patterns: vec![".css".to_string(), "./styles.module.css".to_string()],
            ..CompilerConfig::default()
        };
        let imports = vec![import("./styles.module.css", &[])];
        let (out, warnings) = transform_imports(&imports, &config);
        assert!(out.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_package_mapping_rewrites_source() {
        let mut config = CompilerConfig::default();
        config
            .package_mappings
            .insert("@player/react".to_string(), "@player/elements".to_string());
        config
            .component_mappings
            .insert("PlayButton".to_string(), "MediaPlayButton".to_string());

        let imports = vec![import("@player/react", &["PlayButton", "MuteButton"])];
        let (out, warnings) = transform_imports(&imports, &config);
        assert!(warnings.is_empty());
        assert_eq!(out[0].source, "@player/elements");
        assert_eq!(out[0].specifiers, vec!["MediaPlayButton", "MuteButton"]);
    }

    #[test]
    fn test_tag_style_mapping_does_not_rename_specifiers() {
        let mut config = CompilerConfig::default();
        config
            .package_mappings
            .insert("@player/react".to_string(), "@player/elements".to_string());
        config
            .component_mappings
            .insert("PlayButton".to_string(), "media-play-button".to_string());

        let imports = vec![import("@player/react", &["PlayButton"])];
        let (out, _) = transform_imports(&imports, &config);
        assert_eq!(out[0].specifiers, vec!["PlayButton"]);
    }

    #[test]
    fn test_relative_imports_pass_through_hook() {
        let config = CompilerConfig {
            exclude_patterns: vec![],
            ..CompilerConfig::default()
        };
        let imports = vec![import("./icons", &["PlayIcon"])];
        let (out, _) =
            transform_imports_with(&imports, &config, |source| format!("{}.js", source));
        assert_eq!(out[0].source, "./icons.js");
    }

    #[test]
    fn test_default_config_excludes_framework_runtime() {
        let config = CompilerConfig::default();
        let imports = vec![
            import("react", &["React"]),
            import("react-dom", &["render"]),
            import("./styles.module.css", &[]),
            import("@pkg/react-icons", &["Icon"]),
        ];
        let (out, warnings) = transform_imports(&imports, &config);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, "@pkg/react-icons");
        assert_eq!(warnings.len(), 3);
    }
}
