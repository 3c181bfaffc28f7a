//! Top-level segmentation of utility-class candidate strings.
//!
//! Separators only count at bracket depth zero, so the `:` inside
//! `data-[disabled]:flex` never produces a split point and the candidate
//! segments into `data-[disabled]` and `flex`.

/// Split `input` at every top-level occurrence of `separator`.
///
/// `[...]`, `(...)` and quoted strings open a nested scope in which the
/// separator is ignored. Unterminated scopes are not an error: the remainder
/// is returned unsplit and the caller decides whether the segment parses.
pub fn segment(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;

    for (idx, ch) in input.char_indices() {
        match ch {
            '\'' | '"' => match quote {
                Some(q) if q == ch => quote = None,
                Some(_) => {}
                None => quote = Some(ch),
            },
            '[' | '(' if quote.is_none() => depth += 1,
            ']' | ')' if quote.is_none() => depth = depth.saturating_sub(1),
            _ if ch == separator && depth == 0 && quote.is_none() => {
                parts.push(&input[start..idx]);
                start = idx + ch.len_utf8();
            }
            _ => {}
        }
    }

    parts.push(&input[start..]);
    parts
}

/// Index of the first `target` character that is outside quotes and
/// parentheses. Used to locate the opening bracket of an arbitrary value.
pub fn find_unscoped(input: &str, target: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (idx, ch) in input.char_indices() {
        match ch {
            '\'' | '"' => match quote {
                Some(q) if q == ch => quote = None,
                Some(_) => {}
                None => quote = Some(ch),
            },
            _ if ch == target && depth == 0 && quote.is_none() => return Some(idx),
            '(' if quote.is_none() => depth += 1,
            ')' if quote.is_none() => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    None
}

/// Whether brackets and parentheses balance outside of quoted strings.
pub fn is_balanced(input: &str) -> bool {
    let mut depth = 0i64;
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match ch {
            '\'' | '"' => match quote {
                Some(q) if q == ch => quote = None,
                Some(_) => {}
                None => quote = Some(ch),
            },
            '[' | '(' if quote.is_none() => depth += 1,
            ']' | ')' if quote.is_none() => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0 && quote.is_none()
}
