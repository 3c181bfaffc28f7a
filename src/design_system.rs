//! The immutable design-system registry.
//!
//! Built once per session from a fixed vocabulary of utility roots and
//! variant names, optionally extended with theme colors/spacing from the
//! configuration file. All queries are pure hash lookups keyed by root name
//! only, never by a reconstructed candidate string, so `data-[disabled]`
//! is always looked up as `data`.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::config::ThemeExtend;

/// Kind of a utility root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityKind {
    /// Bare keyword with no value, e.g. `flex`.
    Static,
    /// Root that takes a value suffix, e.g. `bg` in `bg-blue-500`.
    Functional,
}

/// Kind of a variant root as reported by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Static,
    Functional,
    Arbitrary,
    None,
}

/// Lookup surface for utility roots.
#[derive(Debug, Default)]
pub struct UtilityRegistry {
    static_roots: HashSet<&'static str>,
    functional_roots: HashSet<&'static str>,
}

impl UtilityRegistry {
    pub fn has(&self, root: &str, kind: UtilityKind) -> bool {
        match kind {
            UtilityKind::Static => self.static_roots.contains(root),
            UtilityKind::Functional => self.functional_roots.contains(root),
        }
    }
}

/// Lookup surface for variant roots.
#[derive(Debug, Default)]
pub struct VariantRegistry {
    static_roots: HashSet<&'static str>,
    functional_roots: HashSet<&'static str>,
    compound_roots: HashSet<&'static str>,
}

impl VariantRegistry {
    pub fn has(&self, root: &str) -> bool {
        self.kind(root) != VariantKind::None
    }

    pub fn kind(&self, root: &str) -> VariantKind {
        if self.static_roots.contains(root) {
            VariantKind::Static
        } else if self.functional_roots.contains(root) {
            VariantKind::Functional
        } else {
            VariantKind::None
        }
    }

    /// Roots like `group`/`peer` that wrap another variant.
    pub fn is_compound_root(&self, root: &str) -> bool {
        self.compound_roots.contains(root)
    }
}

/// How a functional utility's named value resolves to CSS text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueScale {
    /// Numeric 0.25rem scale plus `px`/`auto`/`full` keywords.
    Spacing,
    /// Spacing plus sizing keywords (`full`, `screen`, `min`, `max`, `fit`).
    Size,
    Color,
    /// Font sizes first, colors second (`text-lg` vs `text-white`).
    Text,
    /// Integer widths first, colors second (`border-2` vs `border-gray-200`).
    Border,
    /// Font weights first, families second (`font-bold` vs `font-mono`).
    Font,
    Radius,
    /// Line-height keywords plus the numeric spacing scale.
    Leading,
    /// Raw integer passthrough (`z-10`).
    Integer,
    /// Numeric percentage of one (`opacity-50` -> 0.5).
    Number,
    /// Plain milliseconds (`duration-200` -> 200ms).
    Milliseconds,
    /// Fixed keyword table.
    Keyword(&'static [(&'static str, &'static str)]),
    /// Value text used verbatim (`cursor-pointer`).
    Raw,
}

/// Declaration mapping for one functional utility root.
#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    pub properties: &'static [&'static str],
    pub scale: ValueScale,
    /// Optional value template, `{}` replaced by the resolved value.
    pub template: Option<&'static str>,
    /// Selector suffix for child-targeting utilities (`space-x-*`).
    pub nested_selector: Option<&'static str>,
}

const fn spec(properties: &'static [&'static str], scale: ValueScale) -> PropertySpec {
    PropertySpec {
        properties,
        scale,
        template: None,
        nested_selector: None,
    }
}

const FLEX_VALUES: &[(&str, &str)] = &[
    ("1", "1 1 0%"),
    ("auto", "1 1 auto"),
    ("initial", "0 1 auto"),
    ("none", "none"),
];

const TRANSITION_PROPS: &[(&str, &str)] = &[
    ("none", "none"),
    ("all", "all"),
    ("colors", "color, background-color, border-color, fill, stroke"),
    ("opacity", "opacity"),
    ("transform", "transform"),
    ("shadow", "box-shadow"),
];

const TRACKING_VALUES: &[(&str, &str)] = &[
    ("tighter", "-0.05em"),
    ("tight", "-0.025em"),
    ("normal", "0em"),
    ("wide", "0.025em"),
    ("wider", "0.05em"),
    ("widest", "0.1em"),
];

const SHADOW_VALUES: &[(&str, &str)] = &[
    ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
    ("md", "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)"),
    ("lg", "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)"),
    ("xl", "0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)"),
    ("none", "none"),
];

const OBJECT_FIT_VALUES: &[(&str, &str)] = &[
    ("contain", "contain"),
    ("cover", "cover"),
    ("fill", "fill"),
    ("none", "none"),
    ("scale-down", "scale-down"),
];

const ASPECT_VALUES: &[(&str, &str)] = &[
    ("auto", "auto"),
    ("square", "1 / 1"),
    ("video", "16 / 9"),
];

const FUNCTIONAL_SPECS: &[(&str, PropertySpec)] = &[
    ("p", spec(&["padding"], ValueScale::Spacing)),
    ("px", spec(&["padding-left", "padding-right"], ValueScale::Spacing)),
    ("py", spec(&["padding-top", "padding-bottom"], ValueScale::Spacing)),
    ("pt", spec(&["padding-top"], ValueScale::Spacing)),
    ("pr", spec(&["padding-right"], ValueScale::Spacing)),
    ("pb", spec(&["padding-bottom"], ValueScale::Spacing)),
    ("pl", spec(&["padding-left"], ValueScale::Spacing)),
    ("m", spec(&["margin"], ValueScale::Spacing)),
    ("mx", spec(&["margin-left", "margin-right"], ValueScale::Spacing)),
    ("my", spec(&["margin-top", "margin-bottom"], ValueScale::Spacing)),
    ("mt", spec(&["margin-top"], ValueScale::Spacing)),
    ("mr", spec(&["margin-right"], ValueScale::Spacing)),
    ("mb", spec(&["margin-bottom"], ValueScale::Spacing)),
    ("ml", spec(&["margin-left"], ValueScale::Spacing)),
    ("gap", spec(&["gap"], ValueScale::Spacing)),
    ("gap-x", spec(&["column-gap"], ValueScale::Spacing)),
    ("gap-y", spec(&["row-gap"], ValueScale::Spacing)),
    (
        "space-x",
        PropertySpec {
            properties: &["margin-left"],
            scale: ValueScale::Spacing,
            template: None,
            nested_selector: Some(" > :not([hidden]) ~ :not([hidden])"),
        },
    ),
    (
        "space-y",
        PropertySpec {
            properties: &["margin-top"],
            scale: ValueScale::Spacing,
            template: None,
            nested_selector: Some(" > :not([hidden]) ~ :not([hidden])"),
        },
    ),
    ("w", spec(&["width"], ValueScale::Size)),
    ("h", spec(&["height"], ValueScale::Size)),
    ("size", spec(&["width", "height"], ValueScale::Size)),
    ("min-w", spec(&["min-width"], ValueScale::Size)),
    ("min-h", spec(&["min-height"], ValueScale::Size)),
    ("max-w", spec(&["max-width"], ValueScale::Size)),
    ("max-h", spec(&["max-height"], ValueScale::Size)),
    ("inset", spec(&["inset"], ValueScale::Spacing)),
    ("top", spec(&["top"], ValueScale::Spacing)),
    ("right", spec(&["right"], ValueScale::Spacing)),
    ("bottom", spec(&["bottom"], ValueScale::Spacing)),
    ("left", spec(&["left"], ValueScale::Spacing)),
    ("bg", spec(&["background-color"], ValueScale::Color)),
    ("text", spec(&["color"], ValueScale::Text)),
    ("border", spec(&["border-color"], ValueScale::Border)),
    ("rounded", spec(&["border-radius"], ValueScale::Radius)),
    ("opacity", spec(&["opacity"], ValueScale::Number)),
    ("z", spec(&["z-index"], ValueScale::Integer)),
    ("flex", spec(&["flex"], ValueScale::Keyword(FLEX_VALUES))),
    (
        "grid-cols",
        PropertySpec {
            properties: &["grid-template-columns"],
            scale: ValueScale::Integer,
            template: Some("repeat({}, minmax(0, 1fr))"),
            nested_selector: None,
        },
    ),
    (
        "col-span",
        PropertySpec {
            properties: &["grid-column"],
            scale: ValueScale::Integer,
            template: Some("span {} / span {}"),
            nested_selector: None,
        },
    ),
    ("translate-x", spec(&["translate"], ValueScale::Spacing)),
    (
        "translate-y",
        PropertySpec {
            properties: &["translate"],
            scale: ValueScale::Spacing,
            template: Some("0 {}"),
            nested_selector: None,
        },
    ),
    ("scale", spec(&["scale"], ValueScale::Number)),
    (
        "rotate",
        PropertySpec {
            properties: &["rotate"],
            scale: ValueScale::Integer,
            template: Some("{}deg"),
            nested_selector: None,
        },
    ),
    ("duration", spec(&["transition-duration"], ValueScale::Milliseconds)),
    ("delay", spec(&["transition-delay"], ValueScale::Milliseconds)),
    (
        "transition",
        spec(&["transition-property"], ValueScale::Keyword(TRANSITION_PROPS)),
    ),
    ("font", spec(&["font-weight"], ValueScale::Font)),
    ("leading", spec(&["line-height"], ValueScale::Leading)),
    (
        "tracking",
        spec(&["letter-spacing"], ValueScale::Keyword(TRACKING_VALUES)),
    ),
    ("shadow", spec(&["box-shadow"], ValueScale::Keyword(SHADOW_VALUES))),
    ("fill", spec(&["fill"], ValueScale::Color)),
    ("stroke", spec(&["stroke"], ValueScale::Color)),
    (
        "object",
        spec(&["object-fit"], ValueScale::Keyword(OBJECT_FIT_VALUES)),
    ),
    ("cursor", spec(&["cursor"], ValueScale::Raw)),
    ("aspect", spec(&["aspect-ratio"], ValueScale::Keyword(ASPECT_VALUES))),
];

const STATIC_UTILITIES: &[(&str, &[(&str, &str)])] = &[
    ("flex", &[("display", "flex")]),
    ("inline-flex", &[("display", "inline-flex")]),
    ("grid", &[("display", "grid")]),
    ("block", &[("display", "block")]),
    ("inline-block", &[("display", "inline-block")]),
    ("inline", &[("display", "inline")]),
    ("hidden", &[("display", "none")]),
    ("contents", &[("display", "contents")]),
    ("relative", &[("position", "relative")]),
    ("absolute", &[("position", "absolute")]),
    ("fixed", &[("position", "fixed")]),
    ("sticky", &[("position", "sticky")]),
    ("items-start", &[("align-items", "flex-start")]),
    ("items-center", &[("align-items", "center")]),
    ("items-end", &[("align-items", "flex-end")]),
    ("items-stretch", &[("align-items", "stretch")]),
    ("items-baseline", &[("align-items", "baseline")]),
    ("justify-start", &[("justify-content", "flex-start")]),
    ("justify-center", &[("justify-content", "center")]),
    ("justify-end", &[("justify-content", "flex-end")]),
    ("justify-between", &[("justify-content", "space-between")]),
    ("justify-around", &[("justify-content", "space-around")]),
    ("justify-evenly", &[("justify-content", "space-evenly")]),
    ("flex-row", &[("flex-direction", "row")]),
    ("flex-row-reverse", &[("flex-direction", "row-reverse")]),
    ("flex-col", &[("flex-direction", "column")]),
    ("flex-col-reverse", &[("flex-direction", "column-reverse")]),
    ("flex-wrap", &[("flex-wrap", "wrap")]),
    ("flex-nowrap", &[("flex-wrap", "nowrap")]),
    ("grow", &[("flex-grow", "1")]),
    ("grow-0", &[("flex-grow", "0")]),
    ("shrink", &[("flex-shrink", "1")]),
    ("shrink-0", &[("flex-shrink", "0")]),
    ("rounded", &[("border-radius", "0.25rem")]),
    ("border", &[("border-width", "1px"), ("border-style", "solid")]),
    (
        "truncate",
        &[
            ("overflow", "hidden"),
            ("text-overflow", "ellipsis"),
            ("white-space", "nowrap"),
        ],
    ),
    ("uppercase", &[("text-transform", "uppercase")]),
    ("lowercase", &[("text-transform", "lowercase")]),
    ("capitalize", &[("text-transform", "capitalize")]),
    ("italic", &[("font-style", "italic")]),
    ("not-italic", &[("font-style", "normal")]),
    ("underline", &[("text-decoration-line", "underline")]),
    ("no-underline", &[("text-decoration-line", "none")]),
    ("overflow-hidden", &[("overflow", "hidden")]),
    ("overflow-auto", &[("overflow", "auto")]),
    ("overflow-visible", &[("overflow", "visible")]),
    ("pointer-events-none", &[("pointer-events", "none")]),
    ("pointer-events-auto", &[("pointer-events", "auto")]),
    ("select-none", &[("user-select", "none")]),
    (
        "transition",
        &[
            (
                "transition-property",
                "color, background-color, border-color, opacity, transform",
            ),
            ("transition-duration", "150ms"),
            ("transition-timing-function", "cubic-bezier(0.4, 0, 0.2, 1)"),
        ],
    ),
    (
        "antialiased",
        &[
            ("-webkit-font-smoothing", "antialiased"),
            ("-moz-osx-font-smoothing", "grayscale"),
        ],
    ),
];

const STATIC_VARIANTS: &[&str] = &[
    "hover",
    "focus",
    "focus-visible",
    "focus-within",
    "active",
    "disabled",
    "enabled",
    "checked",
    "visited",
    "target",
    "required",
    "first",
    "last",
    "odd",
    "even",
    "empty",
    // media-query variants
    "sm",
    "md",
    "lg",
    "xl",
    "2xl",
    "dark",
];

const FUNCTIONAL_VARIANTS: &[&str] = &["data", "aria"];

const COMPOUND_VARIANTS: &[&str] = &["group", "peer"];

const PSEUDO_CLASSES: &[(&str, &str)] = &[
    ("hover", ":hover"),
    ("focus", ":focus"),
    ("focus-visible", ":focus-visible"),
    ("focus-within", ":focus-within"),
    ("active", ":active"),
    ("disabled", ":disabled"),
    ("enabled", ":enabled"),
    ("checked", ":checked"),
    ("visited", ":visited"),
    ("target", ":target"),
    ("required", ":required"),
    ("first", ":first-child"),
    ("last", ":last-child"),
    ("odd", ":nth-child(odd)"),
    ("even", ":nth-child(even)"),
    ("empty", ":empty"),
];

const MEDIA_VARIANTS: &[(&str, &str)] = &[
    ("sm", "(min-width: 640px)"),
    ("md", "(min-width: 768px)"),
    ("lg", "(min-width: 1024px)"),
    ("xl", "(min-width: 1280px)"),
    ("2xl", "(min-width: 1536px)"),
    ("dark", "(prefers-color-scheme: dark)"),
];

const FONT_SIZES: &[(&str, &str, &str)] = &[
    ("xs", "0.75rem", "1rem"),
    ("sm", "0.875rem", "1.25rem"),
    ("base", "1rem", "1.5rem"),
    ("lg", "1.125rem", "1.75rem"),
    ("xl", "1.25rem", "1.75rem"),
    ("2xl", "1.5rem", "2rem"),
    ("3xl", "1.875rem", "2.25rem"),
    ("4xl", "2.25rem", "2.5rem"),
];

const FONT_WEIGHTS: &[(&str, &str)] = &[
    ("thin", "100"),
    ("extralight", "200"),
    ("light", "300"),
    ("normal", "400"),
    ("medium", "500"),
    ("semibold", "600"),
    ("bold", "700"),
    ("extrabold", "800"),
    ("black", "900"),
];

const FONT_FAMILIES: &[(&str, &str)] = &[
    ("sans", "ui-sans-serif, system-ui, sans-serif"),
    ("serif", "ui-serif, Georgia, serif"),
    ("mono", "ui-monospace, SFMono-Regular, Menlo, monospace"),
];

const RADII: &[(&str, &str)] = &[
    ("none", "0px"),
    ("sm", "0.125rem"),
    ("md", "0.375rem"),
    ("lg", "0.5rem"),
    ("xl", "0.75rem"),
    ("2xl", "1rem"),
    ("3xl", "1.5rem"),
    ("full", "9999px"),
];

const LEADING_VALUES: &[(&str, &str)] = &[
    ("none", "1"),
    ("tight", "1.25"),
    ("snug", "1.375"),
    ("normal", "1.5"),
    ("relaxed", "1.625"),
    ("loose", "2"),
];

const COLOR_KEYWORDS: &[(&str, &str)] = &[
    ("white", "#fff"),
    ("black", "#000"),
    ("transparent", "transparent"),
    ("current", "currentColor"),
    ("inherit", "inherit"),
];

const PALETTE: &[(&str, &[(&str, &str)])] = &[
    (
        "gray",
        &[
            ("50", "#f9fafb"),
            ("100", "#f3f4f6"),
            ("200", "#e5e7eb"),
            ("300", "#d1d5db"),
            ("400", "#9ca3af"),
            ("500", "#6b7280"),
            ("600", "#4b5563"),
            ("700", "#374151"),
            ("800", "#1f2937"),
            ("900", "#111827"),
        ],
    ),
    (
        "slate",
        &[
            ("50", "#f8fafc"),
            ("100", "#f1f5f9"),
            ("200", "#e2e8f0"),
            ("300", "#cbd5e1"),
            ("400", "#94a3b8"),
            ("500", "#64748b"),
            ("600", "#475569"),
            ("700", "#334155"),
            ("800", "#1e293b"),
            ("900", "#0f172a"),
        ],
    ),
    (
        "blue",
        &[
            ("50", "#eff6ff"),
            ("100", "#dbeafe"),
            ("200", "#bfdbfe"),
            ("300", "#93c5fd"),
            ("400", "#60a5fa"),
            ("500", "#3b82f6"),
            ("600", "#2563eb"),
            ("700", "#1d4ed8"),
            ("800", "#1e40af"),
            ("900", "#1e3a8a"),
        ],
    ),
    (
        "red",
        &[
            ("50", "#fef2f2"),
            ("100", "#fee2e2"),
            ("200", "#fecaca"),
            ("300", "#fca5a5"),
            ("400", "#f87171"),
            ("500", "#ef4444"),
            ("600", "#dc2626"),
            ("700", "#b91c1c"),
            ("800", "#991b1b"),
            ("900", "#7f1d1d"),
        ],
    ),
    (
        "green",
        &[
            ("50", "#f0fdf4"),
            ("100", "#dcfce7"),
            ("200", "#bbf7d0"),
            ("300", "#86efac"),
            ("400", "#4ade80"),
            ("500", "#22c55e"),
            ("600", "#16a34a"),
            ("700", "#15803d"),
            ("800", "#166534"),
            ("900", "#14532d"),
        ],
    ),
    (
        "yellow",
        &[
            ("50", "#fefce8"),
            ("100", "#fef9c3"),
            ("200", "#fef08a"),
            ("300", "#fde047"),
            ("400", "#facc15"),
            ("500", "#eab308"),
            ("600", "#ca8a04"),
            ("700", "#a16207"),
            ("800", "#854d0e"),
            ("900", "#713f12"),
        ],
    ),
];

/// The design system: utility/variant registries plus the value tables the
/// CSS pipeline resolves named values against. Immutable after construction.
#[derive(Debug)]
pub struct DesignSystem {
    pub utilities: UtilityRegistry,
    pub variants: VariantRegistry,
    functional_specs: HashMap<&'static str, PropertySpec>,
    static_declarations: HashMap<&'static str, &'static [(&'static str, &'static str)]>,
    colors: IndexMap<String, String>,
    spacing: IndexMap<String, String>,
    font_sizes: HashMap<&'static str, (&'static str, &'static str)>,
    font_weights: HashMap<&'static str, &'static str>,
    font_families: HashMap<&'static str, &'static str>,
    radii: HashMap<&'static str, &'static str>,
    leading: HashMap<&'static str, &'static str>,
    pseudo_classes: HashMap<&'static str, &'static str>,
    media_variants: HashMap<&'static str, &'static str>,
}

impl DesignSystem {
    /// Build the registry from the built-in vocabulary.
    pub fn simplified() -> Self {
        Self::simplified_with_theme(&ThemeExtend::default())
    }

    /// Build the registry, extending colors and spacing from a theme section.
    pub fn simplified_with_theme(theme: &ThemeExtend) -> Self {
        let mut colors: IndexMap<String, String> = COLOR_KEYWORDS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (family, shades) in PALETTE {
            for (shade, hex) in *shades {
                colors.insert(format!("{}-{}", family, shade), hex.to_string());
            }
        }
        for (name, value) in &theme.colors {
            colors.insert(name.clone(), value.clone());
        }

        let spacing: IndexMap<String, String> = theme
            .spacing
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            utilities: UtilityRegistry {
                static_roots: STATIC_UTILITIES.iter().map(|(root, _)| *root).collect(),
                functional_roots: FUNCTIONAL_SPECS.iter().map(|(root, _)| *root).collect(),
            },
            variants: VariantRegistry {
                static_roots: STATIC_VARIANTS.iter().copied().collect(),
                functional_roots: FUNCTIONAL_VARIANTS.iter().copied().collect(),
                compound_roots: COMPOUND_VARIANTS.iter().copied().collect(),
            },
            functional_specs: FUNCTIONAL_SPECS.iter().map(|(k, v)| (*k, *v)).collect(),
            static_declarations: STATIC_UTILITIES.iter().map(|(k, v)| (*k, *v)).collect(),
            colors,
            spacing,
            font_sizes: FONT_SIZES.iter().map(|(k, s, lh)| (*k, (*s, *lh))).collect(),
            font_weights: FONT_WEIGHTS.iter().copied().collect(),
            font_families: FONT_FAMILIES.iter().copied().collect(),
            radii: RADII.iter().copied().collect(),
            leading: LEADING_VALUES.iter().copied().collect(),
            pseudo_classes: PSEUDO_CLASSES.iter().copied().collect(),
            media_variants: MEDIA_VARIANTS.iter().copied().collect(),
        }
    }

    /// The process-wide shared instance used by the default pipelines.
    pub fn shared() -> &'static DesignSystem {
        static SHARED: OnceLock<DesignSystem> = OnceLock::new();
        SHARED.get_or_init(DesignSystem::simplified)
    }

    pub fn functional_spec(&self, root: &str) -> Option<&PropertySpec> {
        self.functional_specs.get(root)
    }

    pub fn static_declarations(&self, root: &str) -> Option<&'static [(&'static str, &'static str)]> {
        self.static_declarations.get(root).copied()
    }

    pub fn color(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(String::as_str)
    }

    /// Resolve a spacing token: theme override, keyword, or the numeric
    /// 0.25rem scale.
    pub fn resolve_spacing(&self, token: &str) -> Option<String> {
        if let Some(value) = self.spacing.get(token) {
            return Some(value.clone());
        }
        match token {
            "px" => Some("1px".to_string()),
            "auto" => Some("auto".to_string()),
            "full" => Some("100%".to_string()),
            _ => {
                let n: f64 = token.parse().ok()?;
                if !n.is_finite() || n < 0.0 {
                    return None;
                }
                Some(format_rem(n * 0.25))
            }
        }
    }

    pub fn font_size(&self, name: &str) -> Option<(&str, &str)> {
        self.font_sizes.get(name).copied()
    }

    pub fn font_weight(&self, name: &str) -> Option<&str> {
        self.font_weights.get(name).copied()
    }

    pub fn font_family(&self, name: &str) -> Option<&str> {
        self.font_families.get(name).copied()
    }

    pub fn radius(&self, name: &str) -> Option<&str> {
        self.radii.get(name).copied()
    }

    pub fn leading(&self, name: &str) -> Option<&str> {
        self.leading.get(name).copied()
    }

    pub fn pseudo_class(&self, variant: &str) -> Option<&str> {
        self.pseudo_classes.get(variant).copied()
    }

    /// Media query for responsive/`dark` variants.
    pub fn media_query(&self, variant: &str) -> Option<&str> {
        self.media_variants.get(variant).copied()
    }
}

fn format_rem(value: f64) -> String {
    if value == 0.0 {
        "0px".to_string()
    } else {
        format!("{}rem", value)
    }
}
