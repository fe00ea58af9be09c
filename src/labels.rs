//! Structured force labels.
//!
//! Interactions carry their label as rendered text because that is what the
//! external math typesetter consumes, but building and decorating labels goes
//! through [`ForceLabel`] so the subscript and annotation are never rebuilt by
//! hand from the rendered string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A force symbol with an optional subscript and plain-text annotation.
///
/// Renders to the LaTeX-like syntax understood by the typesetter, for
/// example `\vec{F}_g` or `\vec{F}_{g,\text{Earth}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForceLabel {
    /// Base symbol, e.g. `F` or `f`
    pub symbol: String,
    /// Whether the symbol is wrapped in `\vec{}`
    pub vector: bool,
    /// Subscript without braces, e.g. `g` or `N`
    pub subscript: Option<String>,
    /// Plain text appended to the subscript inside `\text{}`
    pub annotation: Option<String>,
}

impl ForceLabel {
    /// A vector symbol without subscript, e.g. `\vec{f}`.
    pub fn vector(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            vector: true,
            subscript: None,
            annotation: None,
        }
    }

    /// A vector symbol with a subscript, e.g. `\vec{F}_g`.
    pub fn vector_with_subscript(symbol: impl Into<String>, subscript: impl Into<String>) -> Self {
        Self {
            subscript: Some(subscript.into()),
            ..Self::vector(symbol)
        }
    }

    /// Returns a copy with the given annotation. An empty annotation clears it.
    pub fn with_annotation(&self, annotation: &str) -> Self {
        let annotation = annotation.trim();
        Self {
            annotation: (!annotation.is_empty()).then(|| annotation.to_string()),
            ..self.clone()
        }
    }

    /// Parses a rendered label.
    ///
    /// Accepts `\vec{F}`, `\vec{F}_g`, `\vec{F}_{net}`, `\vec{F}_{g,\text{Earth}}`
    /// and bare symbols such as `T` or `W_1`. Anything that does not follow the
    /// syntax, including trailing text such as `\vec{F}^2`, ends up as the
    /// symbol, so parsing never fails and never drops text.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        Self::parse_structured(text).unwrap_or_else(|| Self {
            symbol: text.to_string(),
            vector: false,
            subscript: None,
            annotation: None,
        })
    }

    fn parse_structured(text: &str) -> Option<Self> {
        let (symbol, vector, rest) = match text.strip_prefix("\\vec") {
            Some(after) => {
                let (inner, rest) = take_braced(after)?;
                (inner, true, rest)
            }
            None => match text.find('_') {
                Some(idx) => (&text[..idx], false, &text[idx..]),
                None => (text, false, ""),
            },
        };

        if rest.is_empty() {
            return Some(Self {
                symbol: symbol.to_string(),
                vector,
                subscript: None,
                annotation: None,
            });
        }

        let after_underscore = rest.strip_prefix('_')?;
        let (raw_subscript, tail) = match take_braced(after_underscore) {
            Some(parts) => parts,
            None => {
                let first = after_underscore.chars().next()?;
                after_underscore.split_at(first.len_utf8())
            }
        };
        if !tail.is_empty() {
            return None;
        }
        let (subscript, annotation) = split_annotation(raw_subscript);

        Some(Self {
            symbol: symbol.to_string(),
            vector,
            subscript,
            annotation,
        })
    }

    /// Renders the label for the math typesetter.
    pub fn to_latex(&self) -> String {
        let base = if self.vector {
            format!("\\vec{{{}}}", self.symbol)
        } else {
            self.symbol.clone()
        };
        match (&self.subscript, &self.annotation) {
            (None, None) => base,
            (Some(sub), None) if sub.chars().count() == 1 => format!("{base}_{sub}"),
            (Some(sub), None) => format!("{base}_{{{sub}}}"),
            (None, Some(note)) => format!("{base}_{{\\text{{{}}}}}", escape_text(note)),
            (Some(sub), Some(note)) => {
                format!("{base}_{{{sub},\\text{{{}}}}}", escape_text(note))
            }
        }
    }

    /// Plain-text rendering for surfaces that cannot typeset, e.g. `F_g (on Earth)`.
    pub fn to_plain(&self) -> String {
        let mut out = self.symbol.clone();
        if let Some(sub) = &self.subscript {
            out.push('_');
            out.push_str(sub);
        }
        if let Some(note) = &self.annotation {
            out.push_str(&format!(" (on {note})"));
        }
        out
    }
}

impl fmt::Display for ForceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_latex())
    }
}

/// Splits `{...}` off the front of `s`, honouring nested and escaped braces.
fn take_braced(s: &str) -> Option<(&str, &str)> {
    let body = s.strip_prefix('{')?;
    let mut depth = 1usize;
    let mut escaped = false;
    for (idx, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&body[..idx], &body[idx + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

fn split_annotation(subscript: &str) -> (Option<String>, Option<String>) {
    let Some(start) = subscript.find("\\text") else {
        return (non_empty(subscript), None);
    };
    let note = take_braced(&subscript[start + "\\text".len()..]).map(|(inner, _)| inner);
    let head = subscript[..start].trim_end_matches(',');
    (
        non_empty(head),
        note.and_then(non_empty).map(|note| unescape_text(&note)),
    )
}

/// Escapes user text for use inside `\text{}`.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find('\\') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        rest = if let Some(tail) = after.strip_prefix("textbackslash{}") {
            out.push('\\');
            tail
        } else if after.starts_with('{') || after.starts_with('}') {
            out.push_str(&after[..1]);
            &after[1..]
        } else {
            out.push('\\');
            after
        };
    }
    out.push_str(rest);
    out
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
