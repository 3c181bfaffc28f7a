//! The style pipeline: Tailwind-like class strings in, CSS rules out.
//!
//! Each styles-object entry is parsed candidate by candidate; candidates
//! sharing an identical variant stack merge into one rule, in first
//! occurrence order. Unparseable candidates become warnings and never abort
//! the file. Underscore-to-space substitution for arbitrary selectors and
//! values happens here, not in the decoder.

use indexmap::IndexMap;

use crate::attributes::camel_to_kebab;
use crate::candidate::{parse_candidate, Candidate, Modifier, UtilityValue, Variant, VariantValue};
use crate::config::CssStrategy;
use crate::design_system::{DesignSystem, PropertySpec, ValueScale};

/// Input to one style-pipeline run.
pub struct TailwindCompilationConfig<'a> {
    /// Style key -> space-separated class string, in declaration order.
    pub styles: &'a IndexMap<String, String>,
    pub design_system: &'a DesignSystem,
    pub strategy: CssStrategy,
    /// Component name, used for `vanilla` class-name scoping.
    pub component_name: &'a str,
    pub indent: usize,
}

/// Output of one style-pipeline run.
#[derive(Debug, Clone, Default)]
pub struct CssModulesOutput {
    pub css: String,
    /// Style key -> generated class name, in input order.
    pub class_names: IndexMap<String, String>,
    /// TypeScript declaration body for css-modules output.
    pub type_declarations: String,
    pub warnings: Vec<String>,
}

struct Declaration {
    property: String,
    value: String,
    /// Selector suffix for child-targeting utilities (`space-x-*`).
    nested: Option<&'static str>,
}

/// Compile every styles-object entry to CSS rules. Deterministic: the same
/// input produces byte-identical output.
pub fn compile_tailwind_to_css(config: &TailwindCompilationConfig<'_>) -> CssModulesOutput {
    let mut rules: Vec<String> = Vec::new();
    let mut class_names = IndexMap::new();
    let mut warnings = Vec::new();

    for (key, class_string) in config.styles {
        let class_name = generated_class_name(config, key);

        let mut groups: IndexMap<Vec<Variant>, Vec<Candidate>> = IndexMap::new();
        for token in class_string.split_whitespace() {
            match parse_candidate(token, config.design_system) {
                Some(candidate) => groups
                    .entry(candidate.variants.clone())
                    .or_default()
                    .push(candidate),
                None => warnings.push(format!(
                    "unknown utility class '{}' in style '{}'",
                    token, key
                )),
            }
        }

        for (stack, candidates) in &groups {
            emit_group(
                &mut rules,
                &mut warnings,
                config,
                key,
                &class_name,
                stack,
                candidates,
            );
        }

        class_names.insert(key.clone(), class_name);
    }

    CssModulesOutput {
        css: rules.join("\n"),
        type_declarations: type_declarations(&class_names),
        class_names,
        warnings,
    }
}

fn generated_class_name(config: &TailwindCompilationConfig<'_>, key: &str) -> String {
    match config.strategy {
        CssStrategy::Inline | CssStrategy::CssModules => key.to_string(),
        CssStrategy::Vanilla => format!(
            "{}-{}",
            camel_to_kebab(config.component_name),
            camel_to_kebab(key)
        ),
    }
}

fn emit_group(
    rules: &mut Vec<String>,
    warnings: &mut Vec<String>,
    config: &TailwindCompilationConfig<'_>,
    key: &str,
    class_name: &str,
    stack: &[Variant],
    candidates: &[Candidate],
) {
    let Some((selector, medias)) = selector_for(class_name, stack, config.design_system) else {
        warnings.push(format!(
            "no selector mapping for variants of '{}' in style '{}'",
            candidates
                .first()
                .map(|c| c.to_string())
                .unwrap_or_default(),
            key
        ));
        return;
    };

    let mut main: Vec<(String, String)> = Vec::new();
    let mut nested: IndexMap<&'static str, Vec<(String, String)>> = IndexMap::new();
    for candidate in candidates {
        match declarations_for(candidate, config.design_system) {
            Some(declarations) => {
                for declaration in declarations {
                    match declaration.nested {
                        Some(suffix) => nested
                            .entry(suffix)
                            .or_default()
                            .push((declaration.property, declaration.value)),
                        None => main.push((declaration.property, declaration.value)),
                    }
                }
            }
            None => warnings.push(format!(
                "no CSS mapping for '{}' in style '{}'",
                candidate, key
            )),
        }
    }

    if !main.is_empty() {
        rules.push(format_rule(&selector, &main, &medias, config.indent));
    }
    for (suffix, declarations) in &nested {
        let selector = format!("{}{}", selector, suffix);
        rules.push(format_rule(&selector, declarations, &medias, config.indent));
    }
}

/// Build the selector and media wrappers for one variant stack,
/// outer-to-inner.
fn selector_for(
    class_name: &str,
    stack: &[Variant],
    design_system: &DesignSystem,
) -> Option<(String, Vec<String>)> {
    let mut selector = format!(".{}", class_name);
    let mut medias = Vec::new();

    for variant in stack {
        match variant {
            Variant::Static { root } => {
                if let Some(media) = design_system.media_query(root) {
                    medias.push(media.to_string());
                } else if let Some(pseudo) = design_system.pseudo_class(root) {
                    selector.push_str(pseudo);
                } else {
                    return None;
                }
            }
            Variant::Functional { root, value, .. } => {
                selector.push_str(&attribute_selector(root, value));
            }
            Variant::Arbitrary {
                selector: fragment,
            } => {
                let fragment = unescape_underscores(fragment);
                selector = if fragment.contains('&') {
                    fragment.replace('&', &selector)
                } else {
                    format!("{}{}", selector, fragment)
                };
            }
            Variant::Compound {
                root,
                modifier,
                variant,
            } => {
                let marker = match modifier {
                    Some(name) => format!(".{}\\/{}", root, name),
                    None => format!(".{}", root),
                };
                let suffix = compound_suffix(variant, design_system)?;
                let combinator = if root == "peer" { " ~ " } else { " " };
                selector = format!("{}{}{}{}", marker, suffix, combinator, selector);
            }
        }
    }

    Some((selector, medias))
}

fn attribute_selector(root: &str, value: &Option<VariantValue>) -> String {
    let inner = match value {
        Some(VariantValue::Named(v)) if root == "aria" => format!("{}-{}=\"true\"", root, v),
        Some(VariantValue::Named(v)) => format!("{}-{}", root, v),
        Some(VariantValue::Arbitrary(v)) => format!("{}-{}", root, unescape_underscores(v)),
        None => root.to_string(),
    };
    format!("[{}]", inner)
}

fn compound_suffix(variant: &Variant, design_system: &DesignSystem) -> Option<String> {
    match variant {
        Variant::Static { root } => design_system.pseudo_class(root).map(str::to_string),
        Variant::Functional { root, value, .. } => Some(attribute_selector(root, value)),
        Variant::Arbitrary { selector } => Some(unescape_underscores(selector).replace('&', "")),
        Variant::Compound { .. } => None,
    }
}

/// Resolve one candidate to its declarations.
fn declarations_for(candidate: &Candidate, design_system: &DesignSystem) -> Option<Vec<Declaration>> {
    let (pairs, nested): (Vec<(String, String)>, Option<&'static str>) = match &candidate.value {
        None => {
            let declarations = design_system.static_declarations(&candidate.root)?;
            (
                declarations
                    .iter()
                    .map(|(p, v)| (p.to_string(), v.to_string()))
                    .collect(),
                None,
            )
        }
        Some(value) => {
            let spec = design_system.functional_spec(&candidate.root)?;
            let pairs = match spec.scale {
                ValueScale::Text => resolve_text(candidate, value, design_system)?,
                ValueScale::Border => resolve_border(candidate, value, design_system)?,
                ValueScale::Font => resolve_font(value, design_system)?,
                _ => {
                    let mut resolved = resolve_single(spec, value, design_system)?;
                    if matches!(spec.scale, ValueScale::Color) {
                        resolved = apply_color_modifier(&resolved, &candidate.modifier);
                    }
                    if candidate.negative {
                        resolved = negate(&resolved);
                    }
                    // Integer templates (`repeat({}, ...)`, `{}deg`) wrap the
                    // named count; an arbitrary value is already literal CSS.
                    let skip_template = matches!(value, UtilityValue::Arbitrary { .. })
                        && matches!(spec.scale, ValueScale::Integer);
                    let formatted = match spec.template {
                        Some(template) if !skip_template => template.replace("{}", &resolved),
                        _ => resolved,
                    };
                    spec.properties
                        .iter()
                        .map(|p| (p.to_string(), formatted.clone()))
                        .collect()
                }
            };
            (pairs, spec.nested_selector)
        }
    };

    Some(
        pairs
            .into_iter()
            .map(|(property, value)| Declaration {
                property,
                value: if candidate.important {
                    format!("{} !important", value)
                } else {
                    value
                },
                nested,
            })
            .collect(),
    )
}

fn resolve_single(
    spec: &PropertySpec,
    value: &UtilityValue,
    design_system: &DesignSystem,
) -> Option<String> {
    match value {
        UtilityValue::Arbitrary { value, .. } => Some(unescape_underscores(value)),
        UtilityValue::Named { value, fraction } => {
            if let Some(fraction) = fraction {
                return fraction_percent(fraction);
            }
            match spec.scale {
                ValueScale::Spacing => design_system.resolve_spacing(value),
                ValueScale::Size => resolve_size(spec, value, design_system),
                ValueScale::Color => design_system.color(value).map(str::to_string),
                ValueScale::Radius => design_system.radius(value).map(str::to_string),
                ValueScale::Leading => design_system
                    .leading(value)
                    .map(str::to_string)
                    .or_else(|| design_system.resolve_spacing(value)),
                ValueScale::Integer => is_all_digits(value).then(|| value.to_string()),
                ValueScale::Number => {
                    let n: f64 = value.parse().ok()?;
                    Some(trim_float(n / 100.0))
                }
                ValueScale::Milliseconds => {
                    is_all_digits(value).then(|| format!("{}ms", value))
                }
                ValueScale::Keyword(table) => table
                    .iter()
                    .find(|(name, _)| *name == value)
                    .map(|(_, css)| css.to_string()),
                ValueScale::Raw => Some(value.to_string()),
                ValueScale::Text | ValueScale::Border | ValueScale::Font => None,
            }
        }
    }
}

fn resolve_size(
    spec: &PropertySpec,
    value: &str,
    design_system: &DesignSystem,
) -> Option<String> {
    match value {
        "full" => Some("100%".to_string()),
        "min" => Some("min-content".to_string()),
        "max" => Some("max-content".to_string()),
        "fit" => Some("fit-content".to_string()),
        "screen" => {
            let horizontal = spec.properties.iter().any(|p| p.contains("width"));
            Some(if horizontal { "100vw" } else { "100vh" }.to_string())
        }
        _ => design_system.resolve_spacing(value),
    }
}

fn resolve_text(
    candidate: &Candidate,
    value: &UtilityValue,
    design_system: &DesignSystem,
) -> Option<Vec<(String, String)>> {
    match value {
        UtilityValue::Named { value, .. } => {
            if let Some((size, line_height)) = design_system.font_size(value) {
                Some(vec![
                    ("font-size".to_string(), size.to_string()),
                    ("line-height".to_string(), line_height.to_string()),
                ])
            } else {
                design_system.color(value).map(|color| {
                    vec![(
                        "color".to_string(),
                        apply_color_modifier(color, &candidate.modifier),
                    )]
                })
            }
        }
        UtilityValue::Arbitrary { value, data_type } => {
            let text = unescape_underscores(value);
            match data_type.as_deref() {
                Some("color") => Some(vec![(
                    "color".to_string(),
                    apply_color_modifier(&text, &candidate.modifier),
                )]),
                _ => Some(vec![("font-size".to_string(), text)]),
            }
        }
    }
}

fn resolve_border(
    candidate: &Candidate,
    value: &UtilityValue,
    design_system: &DesignSystem,
) -> Option<Vec<(String, String)>> {
    match value {
        UtilityValue::Named { value, .. } => {
            if is_all_digits(value) {
                Some(vec![("border-width".to_string(), format!("{}px", value))])
            } else {
                design_system.color(value).map(|color| {
                    vec![(
                        "border-color".to_string(),
                        apply_color_modifier(color, &candidate.modifier),
                    )]
                })
            }
        }
        UtilityValue::Arbitrary { value, data_type } => {
            let text = unescape_underscores(value);
            match data_type.as_deref() {
                Some("color") => Some(vec![(
                    "border-color".to_string(),
                    apply_color_modifier(&text, &candidate.modifier),
                )]),
                _ => Some(vec![("border-width".to_string(), text)]),
            }
        }
    }
}

fn resolve_font(value: &UtilityValue, design_system: &DesignSystem) -> Option<Vec<(String, String)>> {
    match value {
        UtilityValue::Named { value, .. } => {
            if let Some(weight) = design_system.font_weight(value) {
                Some(vec![("font-weight".to_string(), weight.to_string())])
            } else {
                design_system
                    .font_family(value)
                    .map(|family| vec![("font-family".to_string(), family.to_string())])
            }
        }
        UtilityValue::Arbitrary { value, .. } => {
            let text = unescape_underscores(value);
            if is_all_digits(&text) {
                Some(vec![("font-weight".to_string(), text)])
            } else {
                Some(vec![("font-family".to_string(), text)])
            }
        }
    }
}

fn apply_color_modifier(color: &str, modifier: &Option<Modifier>) -> String {
    match modifier {
        Some(Modifier::Named(m)) if is_all_digits(m) => {
            format!("color-mix(in srgb, {} {}%, transparent)", color, m)
        }
        _ => color.to_string(),
    }
}

fn negate(value: &str) -> String {
    if value == "0px" || value == "0" {
        value.to_string()
    } else if value.starts_with(|c: char| c.is_ascii_digit()) {
        format!("-{}", value)
    } else {
        format!("calc({} * -1)", value)
    }
}

fn fraction_percent(fraction: &str) -> Option<String> {
    let (numerator, denominator) = fraction.split_once('/')?;
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(format!("{}%", trim_float(numerator * 100.0 / denominator)))
}

fn trim_float(value: f64) -> String {
    let formatted = format!("{:.6}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// `_` becomes a space; `\_` stays a literal underscore.
pub(crate) fn unescape_underscores(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'_') => {
                chars.next();
                out.push('_');
            }
            '_' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

fn format_rule(
    selector: &str,
    declarations: &[(String, String)],
    medias: &[String],
    indent: usize,
) -> String {
    let unit = " ".repeat(indent);
    let mut out = String::new();
    for (depth, media) in medias.iter().enumerate() {
        out.push_str(&unit.repeat(depth));
        out.push_str(&format!("@media {} {{\n", media));
    }
    let base = unit.repeat(medias.len());
    out.push_str(&format!("{}{} {{\n", base, selector));
    for (property, value) in declarations {
        out.push_str(&format!("{}{}{}: {};\n", base, unit, property, value));
    }
    out.push_str(&format!("{}}}\n", base));
    for depth in (0..medias.len()).rev() {
        out.push_str(&unit.repeat(depth));
        out.push_str("}\n");
    }
    out
}

fn type_declarations(class_names: &IndexMap<String, String>) -> String {
    let mut out = String::from("declare const styles: {\n");
    for key in class_names.keys() {
        out.push_str(&format!("  readonly {}: string;\n", key));
    }
    out.push_str("};\nexport default styles;\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design_system::DesignSystem;

    fn run(styles: &[(&str, &str)], strategy: CssStrategy) -> CssModulesOutput {
        let styles: IndexMap<String, String> = styles
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        compile_tailwind_to_css(&TailwindCompilationConfig {
            styles: &styles,
            design_system: DesignSystem::shared(),
            strategy,
            component_name: "PlayerSkin",
            indent: 2,
        })
    }

    #[test]
    fn test_basic_rule_generation() {
        let out = run(&[("Button", "p-2 rounded")], CssStrategy::CssModules);
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
        assert!(out.css.contains(".Button {\n"));
        assert!(out.css.contains("padding: 0.5rem;"));
        assert!(out.css.contains("border-radius: 0.25rem;"));
        assert_eq!(out.class_names.get("Button").map(String::as_str), Some("Button"));
    }

    #[test]
    fn test_variant_stack_grouping() {
        let out = run(
            &[("Button", "p-2 hover:bg-gray-700 hover:text-white")],
            CssStrategy::CssModules,
        );
        // One base rule, one hover rule; hover candidates merged.
        assert_eq!(out.css.matches(".Button:hover {").count(), 1);
        let hover_rule = out
            .css
            .split(".Button:hover {")
            .nth(1)
            .unwrap();
        assert!(hover_rule.contains("background-color: #374151;"));
        assert!(hover_rule.contains("color: #fff;"));
    }

    #[test]
    fn test_media_variant_wraps_rule() {
        let out = run(&[("Layout", "md:p-4")], CssStrategy::CssModules);
        assert!(out.css.contains("@media (min-width: 768px) {\n"));
        assert!(out.css.contains("  .Layout {\n"));
        assert!(out.css.contains("    padding: 1rem;"));
    }

    #[test]
    fn test_functional_variant_attribute_selector() {
        let out = run(&[("Button", "data-[disabled]:opacity-50")], CssStrategy::CssModules);
        assert!(out.css.contains(".Button[data-disabled] {"));
        assert!(out.css.contains("opacity: 0.5;"));
    }

    #[test]
    fn test_arbitrary_selector_substitutes_ampersand() {
        let out = run(&[("Caption", "[&_p]:m-0")], CssStrategy::CssModules);
        assert!(out.css.contains(".Caption p {"), "{}", out.css);
        assert!(out.css.contains("margin: 0px;"));
    }

    #[test]
    fn test_compound_group_variant() {
        let out = run(&[("Thumb", "group-hover:opacity-50")], CssStrategy::CssModules);
        assert!(out.css.contains(".group:hover .Thumb {"), "{}", out.css);
    }

    #[test]
    fn test_unparseable_candidate_is_warning_not_error() {
        let out = run(&[("Button", "p-2 not-a-real-utility")], CssStrategy::CssModules);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("not-a-real-utility"));
        assert!(out.warnings[0].contains("Button"));
        // The parseable part still compiles.
        assert!(out.css.contains("padding: 0.5rem;"));
    }

    #[test]
    fn test_important_and_negative() {
        let out = run(&[("Nudge", "!-translate-x-1")], CssStrategy::CssModules);
        assert!(out.css.contains("translate: -0.25rem !important;"), "{}", out.css);
    }

    #[test]
    fn test_color_modifier_emits_color_mix() {
        let out = run(&[("Scrim", "bg-black/50")], CssStrategy::CssModules);
        assert!(out
            .css
            .contains("background-color: color-mix(in srgb, #000 50%, transparent);"));
    }

    #[test]
    fn test_fraction_resolves_to_percentage() {
        let out = run(&[("Half", "w-1/2 w-1/3")], CssStrategy::CssModules);
        assert!(out.css.contains("width: 50%;"));
        assert!(out.css.contains("width: 33.333333%;"));
    }

    #[test]
    fn test_arbitrary_value_underscores_become_spaces() {
        let out = run(&[("Grid", "grid-cols-[1fr_2fr]")], CssStrategy::CssModules);
        assert!(out.css.contains("grid-template-columns: 1fr 2fr;"), "{}", out.css);
    }

    #[test]
    fn test_vanilla_strategy_scopes_class_names() {
        let out = run(&[("Button", "p-2")], CssStrategy::Vanilla);
        assert_eq!(
            out.class_names.get("Button").map(String::as_str),
            Some("player-skin-button")
        );
        assert!(out.css.contains(".player-skin-button {"));
    }

    #[test]
    fn test_space_utility_targets_children() {
        let out = run(&[("Stack", "space-y-2")], CssStrategy::CssModules);
        assert!(
            out.css
                .contains(".Stack > :not([hidden]) ~ :not([hidden]) {"),
            "{}",
            out.css
        );
        assert!(out.css.contains("margin-top: 0.5rem;"));
    }

    #[test]
    fn test_determinism() {
        let a = run(&[("Button", "p-2 rounded hover:bg-gray-700")], CssStrategy::CssModules);
        let b = run(&[("Button", "p-2 rounded hover:bg-gray-700")], CssStrategy::CssModules);
        assert_eq!(a.css, b.css);
        assert_eq!(a.class_names, b.class_names);
    }

    #[test]
    fn test_type_declarations_list_every_key() {
        let out = run(
            &[("Container", "flex"), ("Button", "p-2")],
            CssStrategy::CssModules,
        );
        assert!(out.type_declarations.contains("readonly Container: string;"));
        assert!(out.type_declarations.contains("readonly Button: string;"));
    }
}
