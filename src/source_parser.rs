//! Parsing of skin component sources into the excerpts the compiler needs.
//!
//! The heavy lifting is done by SWC's ECMAScript parser (with JSX/TSX
//! syntax); this module walks the resulting AST once and extracts imports,
//! the top-level JSX tree, the component name, and the `styles` object.
//! Callers opt into each extraction through `ParseConfig`, so a simple
//! compile does not pay for styles extraction it will not use.

use std::sync::Arc;

use indexmap::IndexMap;
use swc_core::common::{FileName, Globals, SourceMap, Span, Spanned, GLOBALS};
use swc_core::ecma::ast::*;
use swc_core::ecma::parser::{parse_file_as_module, EsSyntax, Syntax, TsSyntax};
use swc_core::ecma::visit::{Visit, VisitWith};

use crate::errors::{CompilerError, Result};

/// Flags gating which `ParsedSource` fields are populated.
#[derive(Debug, Clone, Copy)]
pub struct ParseConfig {
    pub extract_jsx: bool,
    pub extract_component_name: bool,
    pub extract_imports: bool,
    pub extract_styles: bool,
}

impl ParseConfig {
    /// Everything: the style-aware skin pipelines use this.
    pub fn full() -> Self {
        Self {
            extract_jsx: true,
            extract_component_name: true,
            extract_imports: true,
            extract_styles: true,
        }
    }

    /// Tree and name only, for simple structural compiles.
    pub fn jsx_only() -> Self {
        Self {
            extract_jsx: true,
            extract_component_name: true,
            extract_imports: false,
            extract_styles: false,
        }
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::full()
    }
}

/// One import declaration of the source module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    pub source: String,
    /// Local names; when `is_default` is set the first entry is the default.
    pub specifiers: Vec<String>,
    pub is_default: bool,
}

/// Attribute value as extracted from JSX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// String literal, passed through verbatim.
    Literal(String),
    /// `styles.Key` member reference, resolved by the style pipeline.
    StyleRef(String),
    /// Any other expression, kept as opaque source text.
    Expression(String),
    /// Attribute with no value.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxAttribute {
    pub name: String,
    pub value: AttrValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsxChild {
    Element(JsxElement),
    Text(String),
    Expression(String),
}

/// A JSX element lifted out of the SWC AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxElement {
    pub name: String,
    pub attributes: Vec<JsxAttribute>,
    pub children: Vec<JsxChild>,
    pub self_closing: bool,
}

/// Extraction result for one source file. Created per file, consumed by the
/// downstream transforms, and discarded.
#[derive(Debug, Default)]
pub struct ParsedSource {
    pub imports: Vec<ImportInfo>,
    pub jsx_root: Option<JsxElement>,
    pub component_name: Option<String>,
    pub styles: Option<IndexMap<String, String>>,
}

/// Parse a skin source. Syntax errors are fatal for the file and carry the
/// source name plus the parser's message and span.
pub fn parse_source(source: &str, source_name: &str, config: &ParseConfig) -> Result<ParsedSource> {
    let source_map = Arc::new(SourceMap::default());
    let source_file = source_map.new_source_file(
        FileName::Custom(source_name.to_string()).into(),
        source.to_string(),
    );

    let syntax = syntax_for(source_name);

    let mut recovered_errors = Vec::new();
    let module = GLOBALS.set(&Globals::new(), || {
        parse_file_as_module(
            &source_file,
            syntax,
            EsVersion::latest(),
            None,
            &mut recovered_errors,
        )
        .map_err(|e| CompilerError::ParseError {
            path: source_name.to_string(),
            message: format!("{:?}", e),
        })
    })?;

    // A recovered error is still a syntax error for this file.
    if let Some(error) = recovered_errors.first() {
        return Err(CompilerError::ParseError {
            path: source_name.to_string(),
            message: format!("{:?}", error),
        });
    }

    let mut visitor = SkinVisitor {
        source,
        base: source_file.start_pos.0,
        config: *config,
        parsed: ParsedSource::default(),
        current_binding: None,
    };
    module.visit_with(&mut visitor);

    Ok(visitor.parsed)
}

fn syntax_for(source_name: &str) -> Syntax {
    let is_typescript = source_name.ends_with(".ts") || source_name.ends_with(".tsx");
    if is_typescript {
        Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        })
    }
}

struct SkinVisitor<'a> {
    source: &'a str,
    base: u32,
    config: ParseConfig,
    parsed: ParsedSource,
    current_binding: Option<String>,
}

impl SkinVisitor<'_> {
    /// Original source text covered by `span`.
    fn snippet(&self, span: Span) -> String {
        let lo = span.lo.0.saturating_sub(self.base) as usize;
        let hi = span.hi.0.saturating_sub(self.base) as usize;
        self.source.get(lo..hi).unwrap_or_default().to_string()
    }

    fn convert_element(&self, node: &JSXElement) -> JsxElement {
        let name = jsx_name(&node.opening.name);

        let mut attributes = Vec::new();
        for attr in &node.opening.attrs {
            if let JSXAttrOrSpread::JSXAttr(attr) = attr {
                let attr_name = match &attr.name {
                    JSXAttrName::Ident(ident) => ident.sym.to_string(),
                    JSXAttrName::JSXNamespacedName(n) => format!("{}:{}", n.ns.sym, n.name.sym),
                };
                let value = match &attr.value {
                    None => AttrValue::Empty,
                    Some(JSXAttrValue::Lit(Lit::Str(s))) => AttrValue::Literal(s.value.to_string()),
                    Some(JSXAttrValue::JSXExprContainer(container)) => match &container.expr {
                        JSXExpr::Expr(expr) => self.convert_expr_value(expr),
                        JSXExpr::JSXEmptyExpr(_) => AttrValue::Empty,
                    },
                    Some(other) => AttrValue::Expression(self.snippet(other.span())),
                };
                attributes.push(JsxAttribute {
                    name: attr_name,
                    value,
                });
            }
        }

        JsxElement {
            name,
            attributes,
            children: self.convert_children(&node.children),
            self_closing: node.opening.self_closing,
        }
    }

    fn convert_children(&self, children: &[JSXElementChild]) -> Vec<JsxChild> {
        let mut out = Vec::new();
        for child in children {
            match child {
                JSXElementChild::JSXText(text) => {
                    let text = text.value.split_whitespace().collect::<Vec<_>>().join(" ");
                    if !text.is_empty() {
                        out.push(JsxChild::Text(text));
                    }
                }
                JSXElementChild::JSXElement(el) => out.push(JsxChild::Element(self.convert_element(el))),
                JSXElementChild::JSXExprContainer(container) => {
                    if let JSXExpr::Expr(expr) = &container.expr {
                        out.push(JsxChild::Expression(self.snippet(expr.span())));
                    }
                }
                JSXElementChild::JSXFragment(fragment) => {
                    out.extend(self.convert_children(&fragment.children));
                }
                _ => {}
            }
        }
        out
    }

    fn convert_expr_value(&self, expr: &Expr) -> AttrValue {
        if let Expr::Lit(Lit::Str(s)) = expr {
            return AttrValue::Literal(s.value.to_string());
        }
        if let Expr::Member(member) = expr {
            if let (Expr::Ident(obj), MemberProp::Ident(prop)) = (&*member.obj, &member.prop) {
                if obj.sym.as_ref() == "styles" {
                    return AttrValue::StyleRef(prop.sym.to_string());
                }
            }
        }
        AttrValue::Expression(self.snippet(expr.span()))
    }
}

impl Visit for SkinVisitor<'_> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        if !self.config.extract_imports {
            return;
        }

        let mut specifiers = Vec::new();
        let mut is_default = false;
        for spec in &node.specifiers {
            match spec {
                ImportSpecifier::Default(d) => {
                    is_default = true;
                    specifiers.insert(0, d.local.sym.to_string());
                }
                ImportSpecifier::Named(n) => specifiers.push(n.local.sym.to_string()),
                ImportSpecifier::Namespace(ns) => specifiers.push(ns.local.sym.to_string()),
            }
        }

        self.parsed.imports.push(ImportInfo {
            source: node.src.value.to_string(),
            specifiers,
            is_default,
        });
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        let name = match &node.name {
            Pat::Ident(ident) => Some(ident.id.sym.to_string()),
            _ => None,
        };

        if let (Some(name), Some(init)) = (&name, &node.init) {
            if name == "styles" {
                if let Expr::Object(obj) = &**init {
                    if self.config.extract_styles && self.parsed.styles.is_none() {
                        self.parsed.styles = Some(extract_styles_object(obj));
                    }
                    // A styles object is data, not component structure.
                    return;
                }
            }
            if is_component_name(name) && matches!(&**init, Expr::Arrow(_) | Expr::Fn(_)) {
                let previous = self.current_binding.replace(name.clone());
                node.visit_children_with(self);
                self.current_binding = previous;
                return;
            }
        }

        node.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        let name = node.ident.sym.to_string();
        if is_component_name(&name) {
            let previous = self.current_binding.replace(name);
            node.visit_children_with(self);
            self.current_binding = previous;
        } else {
            node.visit_children_with(self);
        }
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        if let DefaultDecl::Fn(f) = &node.decl {
            if let Some(ident) = &f.ident {
                let previous = self.current_binding.replace(ident.sym.to_string());
                node.visit_children_with(self);
                self.current_binding = previous;
                return;
            }
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        if self.config.extract_component_name && self.parsed.component_name.is_none() {
            self.parsed.component_name = self.current_binding.clone();
        }
        if self.config.extract_jsx && self.parsed.jsx_root.is_none() {
            self.parsed.jsx_root = Some(self.convert_element(node));
        }
        // The root conversion already covered every nested element.
    }
}

fn jsx_name(name: &JSXElementName) -> String {
    match name {
        JSXElementName::Ident(ident) => ident.sym.to_string(),
        JSXElementName::JSXMemberExpr(member) => {
            fn object_name(obj: &JSXObject) -> String {
                match obj {
                    JSXObject::Ident(ident) => ident.sym.to_string(),
                    JSXObject::JSXMemberExpr(member) => {
                        format!("{}.{}", object_name(&member.obj), member.prop.sym)
                    }
                }
            }
            format!("{}.{}", object_name(&member.obj), member.prop.sym)
        }
        JSXElementName::JSXNamespacedName(n) => format!("{}:{}", n.ns.sym, n.name.sym),
    }
}

fn extract_styles_object(obj: &ObjectLit) -> IndexMap<String, String> {
    let mut styles = IndexMap::new();
    for prop in &obj.props {
        let PropOrSpread::Prop(prop) = prop else {
            continue;
        };
        let Prop::KeyValue(kv) = &**prop else {
            continue;
        };
        let key = match &kv.key {
            PropName::Ident(ident) => ident.sym.to_string(),
            PropName::Str(s) => s.value.to_string(),
            _ => continue,
        };
        match &*kv.value {
            Expr::Lit(Lit::Str(value)) => {
                styles.insert(key, value.value.to_string());
            }
            // Template literal without interpolation also counts.
            Expr::Tpl(tpl) if tpl.exprs.is_empty() && tpl.quasis.len() == 1 => {
                let quasi = &tpl.quasis[0];
                let value = quasi
                    .cooked
                    .as_ref()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| quasi.raw.to_string());
                styles.insert(key, value);
            }
            _ => {}
        }
    }
    styles
}

fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKIN: &str = r#"
import * as React from 'react';
import { PlayButton } from '@player/react';

const styles = {
  Container: 'flex items-center p-2',
  Button: 'p-2 rounded hover:bg-gray-700',
};

export function MiniSkin() {
  return (
    <div className={styles.Container} data-skin="mini">
      <PlayButton className={styles.Button} disabled />
      <span>{label}</span>
      Ready
    </div>
  );
}
"#;

    #[test]
    fn test_extracts_imports() {
        let parsed = parse_source(SKIN, "mini.jsx", &ParseConfig::full()).unwrap();
        assert_eq!(parsed.imports.len(), 2);
        assert_eq!(parsed.imports[0].source, "react");
        assert_eq!(parsed.imports[0].specifiers, vec!["React"]);
        assert_eq!(parsed.imports[1].source, "@player/react");
        assert_eq!(parsed.imports[1].specifiers, vec!["PlayButton"]);
        assert!(!parsed.imports[1].is_default);
    }

    #[test]
    fn test_extracts_component_name_and_jsx() {
        let parsed = parse_source(SKIN, "mini.jsx", &ParseConfig::full()).unwrap();
        assert_eq!(parsed.component_name.as_deref(), Some("MiniSkin"));

        let root = parsed.jsx_root.unwrap();
        assert_eq!(root.name, "div");
        assert_eq!(root.attributes[0].name, "className");
        assert_eq!(
            root.attributes[0].value,
            AttrValue::StyleRef("Container".to_string())
        );
        assert_eq!(
            root.attributes[1].value,
            AttrValue::Literal("mini".to_string())
        );
        assert_eq!(root.children.len(), 3);
        match &root.children[0] {
            JsxChild::Element(el) => {
                assert_eq!(el.name, "PlayButton");
                assert!(el.self_closing);
                assert_eq!(el.attributes[1].value, AttrValue::Empty);
            }
            other => panic!("expected element child, got {:?}", other),
        }
        assert_eq!(
            root.children[2],
            JsxChild::Text("Ready".to_string())
        );
    }

    #[test]
    fn test_extracts_styles_object() {
        let parsed = parse_source(SKIN, "mini.jsx", &ParseConfig::full()).unwrap();
        let styles = parsed.styles.unwrap();
        assert_eq!(styles.len(), 2);
        assert_eq!(
            styles.get("Container").map(String::as_str),
            Some("flex items-center p-2")
        );
    }

    #[test]
    fn test_opaque_expression_children_keep_source_text() {
        let parsed = parse_source(SKIN, "mini.jsx", &ParseConfig::full()).unwrap();
        let root = parsed.jsx_root.unwrap();
        match &root.children[1] {
            JsxChild::Element(el) => {
                assert_eq!(el.children, vec![JsxChild::Expression("label".to_string())]);
            }
            other => panic!("expected span element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_gates_extraction() {
        let parsed = parse_source(SKIN, "mini.jsx", &ParseConfig::jsx_only()).unwrap();
        assert!(parsed.imports.is_empty());
        assert!(parsed.styles.is_none());
        assert!(parsed.jsx_root.is_some());
        assert_eq!(parsed.component_name.as_deref(), Some("MiniSkin"));
    }

    #[test]
    fn test_syntax_error_is_fatal_with_context() {
        let err = parse_source("cont x = <div", "broken.jsx", &ParseConfig::full()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("broken.jsx"), "{}", message);
    }

    #[test]
    fn test_arrow_component() {
        let source = r#"
const Overlay = () => <div className="p-4">Overlay</div>;
export default Overlay;
"#;
        let parsed = parse_source(source, "overlay.jsx", &ParseConfig::full()).unwrap();
        assert_eq!(parsed.component_name.as_deref(), Some("Overlay"));
        let root = parsed.jsx_root.unwrap();
        assert_eq!(
            root.attributes[0].value,
            AttrValue::Literal("p-4".to_string())
        );
    }
}
