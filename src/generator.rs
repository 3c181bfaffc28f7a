//! Final module text generation.
//!
//! Serialization is deterministic: fixed indent width, input declaration
//! order, no timestamps. The Web Component output follows the composition
//! style of the player elements it targets: one shared `getTemplateHTML`
//! function rather than a subclass hierarchy.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::attributes::{camel_to_kebab, AttrOutput, AttributePipeline, ProcessorContext};
use crate::config::{CssStrategy, OutputFormat};
use crate::source_parser::{ImportInfo, JsxChild, JsxElement};

/// Everything the generator needs for one module.
pub struct SkinModuleData<'a> {
    pub component_name: &'a str,
    pub imports: &'a [ImportInfo],
    pub jsx: Option<&'a JsxElement>,
    pub css: &'a str,
    /// Style key -> generated class name, from the CSS pipeline.
    pub class_names: &'a IndexMap<String, String>,
    /// Component name -> target element/component name.
    pub component_mappings: &'a IndexMap<String, String>,
    pub css_strategy: CssStrategy,
    pub indent: usize,
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize a template-literal-based Web Component module.
pub fn generate_skin_module(data: &SkinModuleData<'_>) -> String {
    let pipeline = AttributePipeline::default();
    let ctx = ProcessorContext {
        output_format: OutputFormat::WebComponent,
        css_strategy: data.css_strategy,
        class_names: data.class_names,
    };
    let unit = " ".repeat(data.indent);
    let tag = custom_element_name(data.component_name);
    let name = data.component_name;

    let mut out = String::new();
    let imports = format_imports(data.imports);
    if !imports.is_empty() {
        out.push_str(&imports);
        out.push('\n');
    }

    out.push_str("const styles = /* css */ `\n");
    out.push_str(&indent_block(data.css, &unit));
    out.push_str("`;\n\n");

    out.push_str("function getTemplateHTML() {\n");
    out.push_str(&format!("{}return `\n", unit));
    out.push_str(&format!("{}<style>${{styles}}</style>\n", unit.repeat(2)));
    if let Some(root) = data.jsx {
        serialize_html(root, &pipeline, &ctx, data.component_mappings, 2, &unit, &mut out);
    }
    out.push_str(&format!("{}`;\n}}\n\n", unit));

    out.push_str(&format!("class {} extends HTMLElement {{\n", name));
    out.push_str(&format!("{}static template = getTemplateHTML();\n\n", unit));
    out.push_str(&format!("{}connectedCallback() {{\n", unit));
    out.push_str(&format!("{}if (!this.shadowRoot) {{\n", unit.repeat(2)));
    out.push_str(&format!(
        "{}this.attachShadow({{ mode: 'open' }}).innerHTML = {}.template;\n",
        unit.repeat(3),
        name
    ));
    out.push_str(&format!("{}}}\n", unit.repeat(2)));
    out.push_str(&format!("{}}}\n}}\n\n", unit));

    out.push_str(&format!("if (!customElements.get('{}')) {{\n", tag));
    out.push_str(&format!("{}customElements.define('{}', {});\n", unit, tag, name));
    out.push_str("}\n\n");
    out.push_str(&format!("export {{ {}, getTemplateHTML }};\n", name));
    out
}

/// Serialize a React module; the matching style file import is added per
/// strategy.
pub fn generate_react_module(data: &SkinModuleData<'_>) -> String {
    let pipeline = AttributePipeline::default();
    let ctx = ProcessorContext {
        output_format: OutputFormat::React,
        css_strategy: data.css_strategy,
        class_names: data.class_names,
    };
    let unit = " ".repeat(data.indent);
    let name = data.component_name;

    let mut out = String::new();
    let imports = format_imports(data.imports);
    if !imports.is_empty() {
        out.push_str(&imports);
    }
    match data.css_strategy {
        CssStrategy::CssModules => {
            out.push_str(&format!("import styles from './{}.module.css';\n", name));
        }
        CssStrategy::Vanilla => {
            out.push_str(&format!("import './{}.css';\n", camel_to_kebab(name)));
        }
        CssStrategy::Inline => {}
    }
    out.push('\n');

    out.push_str(&format!("export function {}() {{\n", name));
    out.push_str(&format!("{}return (\n", unit));
    if let Some(root) = data.jsx {
        serialize_jsx(root, &pipeline, &ctx, data.component_mappings, 2, &unit, &mut out);
    } else {
        out.push_str(&format!("{}null\n", unit.repeat(2)));
    }
    out.push_str(&format!("{});\n}}\n\n", unit));
    out.push_str(&format!("export default {};\n", name));
    out
}

/// Derive the custom-element tag from the component name; a dash is
/// mandatory, so single-word names get a `-skin` suffix.
pub fn custom_element_name(component: &str) -> String {
    let kebab = camel_to_kebab(component);
    if valid_custom_element_name().is_match(&kebab) {
        kebab
    } else {
        format!("{}-skin", kebab)
    }
}

fn valid_custom_element_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)+$").expect("custom element pattern is valid")
    })
}

fn serialize_html(
    element: &JsxElement,
    pipeline: &AttributePipeline,
    ctx: &ProcessorContext<'_>,
    mappings: &IndexMap<String, String>,
    depth: usize,
    unit: &str,
    out: &mut String,
) {
    let tag = web_tag_name(&element.name, mappings);
    let pad = unit.repeat(depth);

    let mut attrs = String::new();
    for attribute in &element.attributes {
        let processed = pipeline.process(&attribute.name, &attribute.value, ctx);
        match processed.value {
            AttrOutput::Literal(value) => {
                attrs.push_str(&format!(" {}=\"{}\"", processed.name, escape_template(&value)));
            }
            AttrOutput::Bare => attrs.push_str(&format!(" {}", processed.name)),
            AttrOutput::Expression(_) | AttrOutput::Omit => {}
        }
    }

    let renderable: Vec<&JsxChild> = element
        .children
        .iter()
        .filter(|child| !matches!(child, JsxChild::Expression(_)))
        .collect();

    if renderable.is_empty() {
        if VOID_ELEMENTS.contains(&tag.as_str()) {
            out.push_str(&format!("{}<{}{}>\n", pad, tag, attrs));
        } else {
            out.push_str(&format!("{}<{}{}></{}>\n", pad, tag, attrs, tag));
        }
        return;
    }

    out.push_str(&format!("{}<{}{}>\n", pad, tag, attrs));
    for child in renderable {
        match child {
            JsxChild::Element(el) => {
                serialize_html(el, pipeline, ctx, mappings, depth + 1, unit, out)
            }
            JsxChild::Text(text) => {
                out.push_str(&format!("{}{}\n", unit.repeat(depth + 1), escape_template(text)))
            }
            JsxChild::Expression(_) => {}
        }
    }
    out.push_str(&format!("{}</{}>\n", pad, tag));
}

fn serialize_jsx(
    element: &JsxElement,
    pipeline: &AttributePipeline,
    ctx: &ProcessorContext<'_>,
    mappings: &IndexMap<String, String>,
    depth: usize,
    unit: &str,
    out: &mut String,
) {
    let tag = mappings
        .get(&element.name)
        .cloned()
        .unwrap_or_else(|| element.name.clone());
    let pad = unit.repeat(depth);

    let mut attrs = String::new();
    for attribute in &element.attributes {
        let processed = pipeline.process(&attribute.name, &attribute.value, ctx);
        match processed.value {
            AttrOutput::Literal(value) => {
                attrs.push_str(&format!(" {}=\"{}\"", processed.name, value));
            }
            AttrOutput::Expression(expr) => {
                attrs.push_str(&format!(" {}={{{}}}", processed.name, expr));
            }
            AttrOutput::Bare => attrs.push_str(&format!(" {}", processed.name)),
            AttrOutput::Omit => {}
        }
    }

    if element.children.is_empty() {
        out.push_str(&format!("{}<{}{} />\n", pad, tag, attrs));
        return;
    }

    out.push_str(&format!("{}<{}{}>\n", pad, tag, attrs));
    for child in &element.children {
        match child {
            JsxChild::Element(el) => serialize_jsx(el, pipeline, ctx, mappings, depth + 1, unit, out),
            JsxChild::Text(text) => out.push_str(&format!("{}{}\n", unit.repeat(depth + 1), text)),
            JsxChild::Expression(expr) => {
                out.push_str(&format!("{}{{{}}}\n", unit.repeat(depth + 1), expr))
            }
        }
    }
    out.push_str(&format!("{}</{}>\n", pad, tag));
}

/// Component tags become custom-element tags; plain HTML tags pass through.
fn web_tag_name(name: &str, mappings: &IndexMap<String, String>) -> String {
    if let Some(mapped) = mappings.get(name) {
        return mapped.clone();
    }
    if name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        custom_element_name(name)
    } else {
        name.to_string()
    }
}

fn format_imports(imports: &[ImportInfo]) -> String {
    let mut out = String::new();
    for import in imports {
        if import.specifiers.is_empty() {
            out.push_str(&format!("import '{}';\n", import.source));
        } else if import.is_default {
            let default = &import.specifiers[0];
            if import.specifiers.len() == 1 {
                out.push_str(&format!("import {} from '{}';\n", default, import.source));
            } else {
                out.push_str(&format!(
                    "import {}, {{ {} }} from '{}';\n",
                    default,
                    import.specifiers[1..].join(", "),
                    import.source
                ));
            }
        } else {
            out.push_str(&format!(
                "import {{ {} }} from '{}';\n",
                import.specifiers.join(", "),
                import.source
            ));
        }
    }
    out
}

fn indent_block(text: &str, unit: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("{}{}\n", unit, line));
        }
    }
    out
}

/// Backticks and interpolation markers must not terminate the template.
fn escape_template(text: &str) -> String {
    text.replace('`', "\\`").replace("${", "\\${")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_parser::{AttrValue, JsxAttribute};

    fn sample_element() -> JsxElement {
        JsxElement {
            name: "div".to_string(),
            attributes: vec![JsxAttribute {
                name: "className".to_string(),
                value: AttrValue::StyleRef("Container".to_string()),
            }],
            children: vec![
                JsxChild::Element(JsxElement {
                    name: "PlayButton".to_string(),
                    attributes: vec![JsxAttribute {
                        name: "ariaLabel".to_string(),
                        value: AttrValue::Literal("Play".to_string()),
                    }],
                    children: vec![],
                    self_closing: true,
                }),
                JsxChild::Text("Now playing".to_string()),
            ],
            self_closing: false,
        }
    }

    fn sample_data<'a>(
        jsx: &'a JsxElement,
        class_names: &'a IndexMap<String, String>,
        mappings: &'a IndexMap<String, String>,
        strategy: CssStrategy,
    ) -> SkinModuleData<'a> {
        SkinModuleData {
            component_name: "PlayerSkin",
            imports: &[],
            jsx: Some(jsx),
            css: ".Container {\n  display: flex;\n}\n",
            class_names,
            component_mappings: mappings,
            css_strategy: strategy,
            indent: 2,
        }
    }

    #[test]
    fn test_custom_element_name() {
        assert_eq!(custom_element_name("PlayerSkin"), "player-skin");
        assert_eq!(custom_element_name("MiniAudioSkin"), "mini-audio-skin");
        // Single-word names need a dash.
        assert_eq!(custom_element_name("Skin"), "skin-skin");
    }

    #[test]
    fn test_web_component_module_shape() {
        let jsx = sample_element();
        let mut class_names = IndexMap::new();
        class_names.insert("Container".to_string(), "Container".to_string());
        let mappings = IndexMap::new();
        let module =
            generate_skin_module(&sample_data(&jsx, &class_names, &mappings, CssStrategy::Inline));

        assert!(module.contains("const styles = /* css */ `"));
        assert!(module.contains("<style>${styles}</style>"));
        assert!(module.contains("class PlayerSkin extends HTMLElement {"));
        assert!(module.contains("customElements.define('player-skin', PlayerSkin);"));
        assert!(module.contains("export { PlayerSkin, getTemplateHTML };"));
        // className resolved to a plain class attribute.
        assert!(module.contains("<div class=\"Container\">"));
        // Component tag lowered to a custom element; camelCase kebab'd.
        assert!(module.contains("<play-button aria-label=\"Play\"></play-button>"));
    }

    #[test]
    fn test_component_mapping_overrides_tag() {
        let jsx = sample_element();
        let class_names = IndexMap::new();
        let mut mappings = IndexMap::new();
        mappings.insert("PlayButton".to_string(), "media-play-button".to_string());
        let module =
            generate_skin_module(&sample_data(&jsx, &class_names, &mappings, CssStrategy::Inline));
        assert!(module.contains("<media-play-button"));
    }

    #[test]
    fn test_react_module_shape() {
        let jsx = sample_element();
        let mut class_names = IndexMap::new();
        class_names.insert("Container".to_string(), "Container".to_string());
        let mappings = IndexMap::new();
        let module = generate_react_module(&sample_data(
            &jsx,
            &class_names,
            &mappings,
            CssStrategy::CssModules,
        ));

        assert!(module.contains("import styles from './PlayerSkin.module.css';"));
        assert!(module.contains("export function PlayerSkin() {"));
        assert!(module.contains("className={styles.Container}"));
        assert!(module.contains("<PlayButton ariaLabel=\"Play\" />"));
        assert!(module.contains("export default PlayerSkin;"));
    }

    #[test]
    fn test_react_vanilla_uses_plain_class_names() {
        let jsx = sample_element();
        let mut class_names = IndexMap::new();
        class_names.insert(
            "Container".to_string(),
            "player-skin-container".to_string(),
        );
        let mappings = IndexMap::new();
        let module = generate_react_module(&sample_data(
            &jsx,
            &class_names,
            &mappings,
            CssStrategy::Vanilla,
        ));
        assert!(module.contains("import './player-skin.css';"));
        assert!(module.contains("className=\"player-skin-container\""));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let jsx = sample_element();
        let class_names = IndexMap::new();
        let mappings = IndexMap::new();
        let a =
            generate_skin_module(&sample_data(&jsx, &class_names, &mappings, CssStrategy::Inline));
        let b =
            generate_skin_module(&sample_data(&jsx, &class_names, &mappings, CssStrategy::Inline));
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_imports() {
        let imports = vec![
            ImportInfo {
                source: "@player/elements".to_string(),
                specifiers: vec!["PlayButton".to_string(), "MuteButton".to_string()],
                is_default: false,
            },
            ImportInfo {
                source: "@player/icons".to_string(),
                specifiers: vec!["Icons".to_string()],
                is_default: true,
            },
            ImportInfo {
                source: "./theme.js".to_string(),
                specifiers: vec![],
                is_default: false,
            },
        ];
        let text = format_imports(&imports);
        assert!(text.contains("import { PlayButton, MuteButton } from '@player/elements';"));
        assert!(text.contains("import Icons from '@player/icons';"));
        assert!(text.contains("import './theme.js';"));
    }
}
