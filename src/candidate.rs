//! Parsing of utility-class candidates and their variant stacks.
//!
//! `parse_candidate` is a pure function of its inputs: the same string and
//! design system always produce the same result, and an unparseable string
//! is a normal `None` outcome, never an error.

use std::fmt;

use crate::arbitrary::decode_arbitrary_value;
use crate::design_system::{DesignSystem, UtilityKind, VariantKind};
use crate::segment::{find_unscoped, segment};

/// Value part of a utility, either drawn from the named vocabulary or
/// supplied inline in brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UtilityValue {
    Named { value: String, fraction: Option<String> },
    Arbitrary { value: String, data_type: Option<String> },
}

/// Trailing `/modifier` on a utility (`bg-blue-500/50`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    Named(String),
    Arbitrary(String),
}

/// Argument of a functional variant (`data-[disabled]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariantValue {
    Named(String),
    Arbitrary(String),
}

/// One conditional prefix on a utility, outermost first in the stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Bare keyword, e.g. `hover`.
    Static { root: String },
    /// Keyword with an argument, e.g. `data-[disabled]` or `aria-checked`.
    Functional {
        root: String,
        value: Option<VariantValue>,
        modifier: Option<String>,
    },
    /// Raw selector fragment in brackets, e.g. `[&_p]`.
    Arbitrary { selector: String },
    /// A variant wrapping another variant, e.g. `group-hover/name`.
    Compound {
        root: String,
        modifier: Option<String>,
        variant: Box<Variant>,
    },
}

/// One fully parsed utility-class token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub root: String,
    pub value: Option<UtilityValue>,
    pub modifier: Option<Modifier>,
    pub important: bool,
    pub negative: bool,
    /// Ordered outer-to-inner, exactly as written.
    pub variants: Vec<Variant>,
}

/// Parse a single class token against the design system.
///
/// Returns `None` when any segment fails to resolve; there are no partial
/// results and no exceptions.
pub fn parse_candidate(input: &str, design_system: &DesignSystem) -> Option<Candidate> {
    if input.is_empty() {
        return None;
    }

    let (important, rest) = match input.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let (mut negative, rest) = match rest.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    if rest.is_empty() {
        return None;
    }

    let segments = segment(rest, ':');
    let (utility, variant_segments) = segments.split_last()?;

    // `hover:-translate-x-1` carries the sign on the utility segment.
    let mut utility = *utility;
    if let Some(stripped) = utility.strip_prefix('-') {
        negative = true;
        utility = stripped;
    }

    let mut variants = Vec::with_capacity(variant_segments.len());
    for seg in variant_segments {
        variants.push(parse_variant(seg, design_system)?);
    }

    let (root, value, modifier) = parse_utility(utility, design_system)?;

    Some(Candidate {
        root,
        value,
        modifier,
        important,
        negative,
        variants,
    })
}

/// Parse one variant segment.
pub fn parse_variant(seg: &str, design_system: &DesignSystem) -> Option<Variant> {
    if seg.is_empty() {
        return None;
    }

    // Bare arbitrary selector: `[&_p]`.
    if seg.starts_with('[') {
        if !seg.ends_with(']') {
            return None;
        }
        let decoded = decode_arbitrary_value(&seg[1..seg.len() - 1])?;
        return Some(Variant::Arbitrary {
            selector: decoded.value,
        });
    }

    let (base, modifier) = split_variant_modifier(seg)?;

    // Compound: `group-hover`, `peer-data-[state]`, `group-[&_p]`.
    if let Some((root, rest)) = base.split_once('-') {
        if design_system.variants.is_compound_root(root) && !rest.is_empty() {
            let nested = parse_variant(rest, design_system)?;
            return Some(Variant::Compound {
                root: root.to_string(),
                modifier,
                variant: Box::new(nested),
            });
        }
    }

    // Functional with a bracketed argument: `data-[disabled]`.
    if let Some(open) = find_unscoped(base, '[') {
        if !base.ends_with(']') || open == 0 {
            return None;
        }
        let root = base[..open].strip_suffix('-')?;
        if design_system.variants.kind(root) != VariantKind::Functional {
            return None;
        }
        let decoded = decode_arbitrary_value(&base[open + 1..base.len() - 1])?;
        return Some(Variant::Functional {
            root: root.to_string(),
            value: Some(VariantValue::Arbitrary(decoded.value)),
            modifier,
        });
    }

    // Static keyword.
    if design_system.variants.kind(base) == VariantKind::Static {
        return match modifier {
            None => Some(Variant::Static {
                root: base.to_string(),
            }),
            Some(_) => None,
        };
    }

    // Functional with a named argument: `aria-checked`.
    if let Some((root, rest)) = base.split_once('-') {
        if design_system.variants.kind(root) == VariantKind::Functional && !rest.is_empty() {
            return Some(Variant::Functional {
                root: root.to_string(),
                value: Some(VariantValue::Named(rest.to_string())),
                modifier,
            });
        }
    }

    None
}

/// Split the utility segment into root, value, and modifier.
fn parse_utility(
    seg: &str,
    design_system: &DesignSystem,
) -> Option<(String, Option<UtilityValue>, Option<Modifier>)> {
    if seg.is_empty() {
        return None;
    }

    let (base, modifier) = split_utility_modifier(seg)?;

    // Arbitrary value: `bg-[#1a2b3c]`.
    if let Some(open) = find_unscoped(base, '[') {
        if !base.ends_with(']') || open == 0 {
            return None;
        }
        let root = base[..open].strip_suffix('-')?;
        if !design_system.utilities.has(root, UtilityKind::Functional) {
            return None;
        }
        let decoded = decode_arbitrary_value(&base[open + 1..base.len() - 1])?;
        return Some((
            root.to_string(),
            Some(UtilityValue::Arbitrary {
                value: decoded.value,
                data_type: decoded.data_type,
            }),
            modifier,
        ));
    }

    // Bare static utility.
    if design_system.utilities.has(base, UtilityKind::Static) {
        return Some((base.to_string(), None, modifier));
    }

    // Functional with a named value: the longest registered root wins, so
    // `translate-x-px` resolves to root `translate-x`, not `translate`.
    let dash_positions: Vec<usize> = base.match_indices('-').map(|(idx, _)| idx).collect();
    for idx in dash_positions.into_iter().rev() {
        let (root, value) = (&base[..idx], &base[idx + 1..]);
        if root.is_empty() || value.is_empty() {
            continue;
        }
        if !design_system.utilities.has(root, UtilityKind::Functional) {
            continue;
        }
        // `w-1/2` is a fraction, not a value with an opacity modifier.
        if let Some(Modifier::Named(m)) = &modifier {
            if is_all_digits(value) && is_all_digits(m) {
                let joined = format!("{}/{}", value, m);
                return Some((
                    root.to_string(),
                    Some(UtilityValue::Named {
                        value: joined.clone(),
                        fraction: Some(joined),
                    }),
                    None,
                ));
            }
        }
        return Some((
            root.to_string(),
            Some(UtilityValue::Named {
                value: value.to_string(),
                fraction: None,
            }),
            modifier,
        ));
    }

    None
}

fn split_utility_modifier(seg: &str) -> Option<(&str, Option<Modifier>)> {
    let parts = segment(seg, '/');
    if parts.len() == 1 {
        return Some((seg, None));
    }
    let raw = *parts.last()?;
    if raw.is_empty() {
        return None;
    }
    let base = &seg[..seg.len() - raw.len() - 1];
    let modifier = if raw.starts_with('[') && raw.ends_with(']') {
        Modifier::Arbitrary(decode_arbitrary_value(&raw[1..raw.len() - 1])?.value)
    } else {
        Modifier::Named(raw.to_string())
    };
    Some((base, Some(modifier)))
}

fn split_variant_modifier(seg: &str) -> Option<(&str, Option<String>)> {
    let parts = segment(seg, '/');
    if parts.len() == 1 {
        return Some((seg, None));
    }
    let raw = *parts.last()?;
    if raw.is_empty() {
        return None;
    }
    let base = &seg[..seg.len() - raw.len() - 1];
    Some((base, Some(raw.to_string())))
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Static { root } => write!(f, "{}", root),
            Variant::Arbitrary { selector } => write!(f, "[{}]", selector),
            Variant::Functional {
                root,
                value,
                modifier,
            } => {
                write!(f, "{}", root)?;
                match value {
                    Some(VariantValue::Named(v)) => write!(f, "-{}", v)?,
                    Some(VariantValue::Arbitrary(v)) => write!(f, "-[{}]", v)?,
                    None => {}
                }
                if let Some(m) = modifier {
                    write!(f, "/{}", m)?;
                }
                Ok(())
            }
            Variant::Compound {
                root,
                modifier,
                variant,
            } => {
                write!(f, "{}-{}", root, variant)?;
                if let Some(m) = modifier {
                    write!(f, "/{}", m)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.important {
            write!(f, "!")?;
        }
        for variant in &self.variants {
            write!(f, "{}:", variant)?;
        }
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.root)?;
        match &self.value {
            Some(UtilityValue::Named { value, .. }) => write!(f, "-{}", value)?,
            Some(UtilityValue::Arbitrary { value, .. }) => write!(f, "-[{}]", value)?,
            None => {}
        }
        match &self.modifier {
            Some(Modifier::Named(m)) => write!(f, "/{}", m)?,
            Some(Modifier::Arbitrary(m)) => write!(f, "/[{}]", m)?,
            None => {}
        }
        Ok(())
    }
}
