//! Ordered attribute processors applied while serializing JSX elements.
//!
//! The pipeline is an explicit list: processors run in order, the first one
//! that claims an attribute wins, and a guaranteed default processor closes
//! the chain (`className`->`class`, camelCase->kebab-case, literals pass
//! through verbatim, opaque expressions become a placeholder).

use indexmap::IndexMap;

use crate::config::{CssStrategy, OutputFormat};
use crate::source_parser::AttrValue;

/// Context shared by all processors for one serialization run.
pub struct ProcessorContext<'a> {
    pub output_format: OutputFormat,
    pub css_strategy: CssStrategy,
    /// Style key -> generated class name, from the CSS pipeline.
    pub class_names: &'a IndexMap<String, String>,
}

/// How a processed attribute serializes into the target format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOutput {
    /// `name="value"`.
    Literal(String),
    /// `name={expr}` (React output only).
    Expression(String),
    /// Bare `name` with no value.
    Bare,
    /// Attribute does not appear in the output.
    Omit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedAttribute {
    pub name: String,
    pub value: AttrOutput,
}

/// One transform in the chain. Returning `None` passes the attribute on.
pub trait AttributeProcessor {
    fn name(&self) -> &'static str;

    fn process(
        &self,
        name: &str,
        value: &AttrValue,
        ctx: &ProcessorContext<'_>,
    ) -> Option<ProcessedAttribute>;
}

/// Handles `className`/`class`, resolving style references per strategy.
pub struct ClassAttributeProcessor;

impl AttributeProcessor for ClassAttributeProcessor {
    fn name(&self) -> &'static str {
        "class-attribute"
    }

    fn process(
        &self,
        name: &str,
        value: &AttrValue,
        ctx: &ProcessorContext<'_>,
    ) -> Option<ProcessedAttribute> {
        if name != "className" && name != "class" {
            return None;
        }

        let resolve = |key: &String| {
            ctx.class_names
                .get(key)
                .cloned()
                .unwrap_or_else(|| key.clone())
        };

        let processed = match ctx.output_format {
            OutputFormat::WebComponent => ProcessedAttribute {
                name: "class".to_string(),
                value: match value {
                    AttrValue::Literal(s) => AttrOutput::Literal(s.clone()),
                    AttrValue::StyleRef(key) => AttrOutput::Literal(resolve(key)),
                    AttrValue::Expression(_) => AttrOutput::Omit,
                    AttrValue::Empty => AttrOutput::Bare,
                },
            },
            OutputFormat::React => ProcessedAttribute {
                name: "className".to_string(),
                value: match value {
                    AttrValue::Literal(s) => AttrOutput::Literal(s.clone()),
                    AttrValue::StyleRef(key) => match ctx.css_strategy {
                        CssStrategy::CssModules => {
                            AttrOutput::Expression(format!("styles.{}", key))
                        }
                        _ => AttrOutput::Literal(resolve(key)),
                    },
                    AttrValue::Expression(e) => AttrOutput::Expression(e.clone()),
                    AttrValue::Empty => AttrOutput::Bare,
                },
            },
        };
        Some(processed)
    }
}

/// Drops `onClick`-style handlers from static Web Component templates; React
/// output keeps them, so the processor declines and the default applies.
pub struct EventHandlerProcessor;

impl AttributeProcessor for EventHandlerProcessor {
    fn name(&self) -> &'static str {
        "event-handler"
    }

    fn process(
        &self,
        name: &str,
        _value: &AttrValue,
        ctx: &ProcessorContext<'_>,
    ) -> Option<ProcessedAttribute> {
        if ctx.output_format == OutputFormat::WebComponent && is_event_handler(name) {
            return Some(ProcessedAttribute {
                name: name.to_string(),
                value: AttrOutput::Omit,
            });
        }
        None
    }
}

/// The guaranteed tail of the chain; always claims.
pub struct DefaultAttributeProcessor;

impl DefaultAttributeProcessor {
    fn apply(
        &self,
        name: &str,
        value: &AttrValue,
        ctx: &ProcessorContext<'_>,
    ) -> ProcessedAttribute {
        let out_name = match ctx.output_format {
            OutputFormat::WebComponent => camel_to_kebab(name),
            OutputFormat::React => name.to_string(),
        };

        let resolve = |key: &String| {
            ctx.class_names
                .get(key)
                .cloned()
                .unwrap_or_else(|| key.clone())
        };

        let value = match value {
            AttrValue::Literal(s) => AttrOutput::Literal(s.clone()),
            AttrValue::Empty => AttrOutput::Bare,
            AttrValue::StyleRef(key) => match ctx.output_format {
                OutputFormat::WebComponent => AttrOutput::Literal(resolve(key)),
                OutputFormat::React => AttrOutput::Expression(format!("styles.{}", key)),
            },
            AttrValue::Expression(e) => match ctx.output_format {
                // Opaque expressions cannot run in a static template.
                OutputFormat::WebComponent => AttrOutput::Omit,
                OutputFormat::React => AttrOutput::Expression(e.clone()),
            },
        };

        ProcessedAttribute {
            name: out_name,
            value,
        }
    }
}

impl AttributeProcessor for DefaultAttributeProcessor {
    fn name(&self) -> &'static str {
        "default"
    }

    fn process(
        &self,
        name: &str,
        value: &AttrValue,
        ctx: &ProcessorContext<'_>,
    ) -> Option<ProcessedAttribute> {
        Some(self.apply(name, value, ctx))
    }
}

/// The ordered chain plus its guaranteed default.
pub struct AttributePipeline {
    processors: Vec<Box<dyn AttributeProcessor>>,
    default: DefaultAttributeProcessor,
}

impl AttributePipeline {
    /// Custom chain; the default processor is still appended implicitly.
    pub fn with_processors(processors: Vec<Box<dyn AttributeProcessor>>) -> Self {
        Self {
            processors,
            default: DefaultAttributeProcessor,
        }
    }

    pub fn process(
        &self,
        name: &str,
        value: &AttrValue,
        ctx: &ProcessorContext<'_>,
    ) -> ProcessedAttribute {
        for processor in &self.processors {
            if let Some(result) = processor.process(name, value, ctx) {
                return result;
            }
        }
        self.default.apply(name, value, ctx)
    }
}

impl Default for AttributePipeline {
    fn default() -> Self {
        Self::with_processors(vec![
            Box::new(ClassAttributeProcessor),
            Box::new(EventHandlerProcessor),
        ])
    }
}

fn is_event_handler(name: &str) -> bool {
    name.len() > 2
        && name.starts_with("on")
        && name[2..].chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// `ariaLabel` -> `aria-label`.
pub(crate) fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (idx, ch) in name.char_indices() {
        if ch.is_ascii_uppercase() {
            if idx > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(
        format: OutputFormat,
        strategy: CssStrategy,
        class_names: &'a IndexMap<String, String>,
    ) -> ProcessorContext<'a> {
        ProcessorContext {
            output_format: format,
            css_strategy: strategy,
            class_names,
        }
    }

    #[test]
    fn test_class_name_becomes_class_for_web_components() {
        let names = IndexMap::new();
        let pipeline = AttributePipeline::default();
        let out = pipeline.process(
            "className",
            &AttrValue::Literal("flex".to_string()),
            &ctx(OutputFormat::WebComponent, CssStrategy::Inline, &names),
        );
        assert_eq!(out.name, "class");
        assert_eq!(out.value, AttrOutput::Literal("flex".to_string()));
    }

    #[test]
    fn test_style_ref_resolution_per_strategy() {
        let mut names = IndexMap::new();
        names.insert("Button".to_string(), "skin-button".to_string());
        let pipeline = AttributePipeline::default();

        let wc = pipeline.process(
            "className",
            &AttrValue::StyleRef("Button".to_string()),
            &ctx(OutputFormat::WebComponent, CssStrategy::Inline, &names),
        );
        assert_eq!(wc.value, AttrOutput::Literal("skin-button".to_string()));

        let modules = pipeline.process(
            "className",
            &AttrValue::StyleRef("Button".to_string()),
            &ctx(OutputFormat::React, CssStrategy::CssModules, &names),
        );
        assert_eq!(
            modules.value,
            AttrOutput::Expression("styles.Button".to_string())
        );

        let vanilla = pipeline.process(
            "className",
            &AttrValue::StyleRef("Button".to_string()),
            &ctx(OutputFormat::React, CssStrategy::Vanilla, &names),
        );
        assert_eq!(vanilla.value, AttrOutput::Literal("skin-button".to_string()));
    }

    #[test]
    fn test_camel_case_attributes_kebab_for_web_components() {
        let names = IndexMap::new();
        let pipeline = AttributePipeline::default();
        let out = pipeline.process(
            "ariaLabel",
            &AttrValue::Literal("Play".to_string()),
            &ctx(OutputFormat::WebComponent, CssStrategy::Inline, &names),
        );
        assert_eq!(out.name, "aria-label");

        let react = pipeline.process(
            "ariaLabel",
            &AttrValue::Literal("Play".to_string()),
            &ctx(OutputFormat::React, CssStrategy::CssModules, &names),
        );
        assert_eq!(react.name, "ariaLabel");
    }

    #[test]
    fn test_event_handlers_dropped_from_templates() {
        let names = IndexMap::new();
        let pipeline = AttributePipeline::default();
        let out = pipeline.process(
            "onClick",
            &AttrValue::Expression("() => play()".to_string()),
            &ctx(OutputFormat::WebComponent, CssStrategy::Inline, &names),
        );
        assert_eq!(out.value, AttrOutput::Omit);

        let react = pipeline.process(
            "onClick",
            &AttrValue::Expression("() => play()".to_string()),
            &ctx(OutputFormat::React, CssStrategy::CssModules, &names),
        );
        assert_eq!(
            react.value,
            AttrOutput::Expression("() => play()".to_string())
        );
    }

    #[test]
    fn test_opaque_expression_is_placeholder_for_templates() {
        let names = IndexMap::new();
        let pipeline = AttributePipeline::default();
        let out = pipeline.process(
            "title",
            &AttrValue::Expression("video.title".to_string()),
            &ctx(OutputFormat::WebComponent, CssStrategy::Inline, &names),
        );
        assert_eq!(out.value, AttrOutput::Omit);
    }

    #[test]
    fn test_first_claim_wins_over_later_processors() {
        // A custom chain where a processor shadows the class handler.
        struct ShoutProcessor;
        impl AttributeProcessor for ShoutProcessor {
            fn name(&self) -> &'static str {
                "shout"
            }
            fn process(
                &self,
                name: &str,
                _value: &AttrValue,
                _ctx: &ProcessorContext<'_>,
            ) -> Option<ProcessedAttribute> {
                (name == "className").then(|| ProcessedAttribute {
                    name: "CLASS".to_string(),
                    value: AttrOutput::Bare,
                })
            }
        }

        let names = IndexMap::new();
        let pipeline = AttributePipeline::with_processors(vec![
            Box::new(ShoutProcessor),
            Box::new(ClassAttributeProcessor),
        ]);
        let out = pipeline.process(
            "className",
            &AttrValue::Empty,
            &ctx(OutputFormat::WebComponent, CssStrategy::Inline, &names),
        );
        assert_eq!(out.name, "CLASS");
    }

    #[test]
    fn test_camel_to_kebab() {
        assert_eq!(camel_to_kebab("ariaLabel"), "aria-label");
        assert_eq!(camel_to_kebab("dataTestId"), "data-test-id");
        assert_eq!(camel_to_kebab("plain"), "plain");
        assert_eq!(camel_to_kebab("PlayButton"), "play-button");
    }
}
