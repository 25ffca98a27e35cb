//! Merging generated code with user-authored fragments.
//!
//! Everything here is plain text matching over generated source, not parsing.
//! A miss never fails the caller: the generated markup comes back unchanged and
//! [`SpliceOutcome::PatternMiss`] says why.

use chrono::SecondsFormat;

use draftline_config::{MOBILE_BREAKPOINT_PX, TABLET_BREAKPOINT_PX};

use crate::state::DocumentMeta;

/// Element tags accepted as evidence of vector markup.
pub const VECTOR_TAGS: &[&str] = &[
    "svg", "g", "path", "rect", "circle", "ellipse", "line", "polyline", "polygon", "text", "use",
    "defs",
];

const RETURN_OPEN: &str = "return (";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CombineError {
    #[error("generated source has no `return (` expression")]
    ReturnNotFound,
    #[error("`return (` expression is not closed")]
    Unbalanced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceOutcome {
    NoUserMarkup,
    Spliced,
    PatternMiss(CombineError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupOutcome {
    pub markup: String,
    pub splice: SpliceOutcome,
}

/// Whether `markup` contains at least one recognised vector element tag.
pub fn contains_vector_element(markup: &str) -> bool {
    markup
        .match_indices('<')
        .filter_map(|(ix, _)| tag_name(&markup[ix..]))
        .any(|name| {
            VECTOR_TAGS
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(name))
        })
}

// Name of the opening tag at the start of `s` (which must begin with `<`).
fn tag_name(s: &str) -> Option<&str> {
    let rest = s.strip_prefix('<')?;
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(rest.len());
    let name = &rest[..end];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.') {
        return None;
    }
    Some(name)
}

// Byte range of the expression between `return (` and its matching `)`.
fn return_expression(source: &str) -> Result<(usize, usize), CombineError> {
    let start = source
        .find(RETURN_OPEN)
        .ok_or(CombineError::ReturnNotFound)?
        + RETURN_OPEN.len();

    let mut depth = 1usize;
    for (offset, c) in source[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((start, start + offset));
                }
            }
            _ => {}
        }
    }
    Err(CombineError::Unbalanced)
}

/// Splice `user` markup into the single `return ( ... )` expression of `generated`.
///
/// A vector-graphic root is grouped with the user markup in a fragment,
/// original first; any other root is followed by the user markup as a sibling
/// block. Whitespace around the root is kept, and the inserted lines take the
/// root's indentation.
pub fn splice_user_markup(generated: &str, user: &str) -> Result<String, CombineError> {
    let (open, close) = return_expression(generated)?;
    let span = &generated[open..close];
    let root = span.trim();
    let leading = &span[..span.len() - span.trim_start().len()];
    let trailing = &span[span.trim_end().len()..];
    let indent = leading.rsplit('\n').next().unwrap_or_default();

    let spliced = if tag_name(root) == Some("svg") {
        format!("<>\n{indent}{root}\n{indent}{user}\n{indent}</>")
    } else {
        format!("{root}\n{indent}{user}")
    };

    Ok(format!(
        "{}{leading}{spliced}{trailing}{}",
        &generated[..open],
        &generated[close..]
    ))
}

fn markup_header(meta: &DocumentMeta) -> String {
    format!(
        "/**\n * Generated from design file: {}\n * Generated at: {}\n * Components: {}\n * Styles: {}\n */",
        meta.name,
        meta.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        meta.component_count,
        meta.style_count
    )
}

pub fn combine_markup(generated: &str, user: &str, meta: Option<&DocumentMeta>) -> MarkupOutcome {
    let user = user.trim();
    let (body, splice) = if user.is_empty() {
        (generated.to_string(), SpliceOutcome::NoUserMarkup)
    } else {
        match splice_user_markup(generated, user) {
            Ok(spliced) => (spliced, SpliceOutcome::Spliced),
            Err(e) => (generated.to_string(), SpliceOutcome::PatternMiss(e)),
        }
    };

    let markup = match meta {
        Some(meta) => format!("{}\n{}", markup_header(meta), body),
        None => body,
    };
    MarkupOutcome { markup, splice }
}

fn responsive_section() -> String {
    format!(
        "/* Responsive styles */\n\
         @media (max-width: {TABLET_BREAKPOINT_PX}px) {{\n  .generated-component {{\n    width: 100%;\n    padding: 16px;\n  }}\n}}\n\n\
         @media (max-width: {MOBILE_BREAKPOINT_PX}px) {{\n  .generated-component {{\n    padding: 8px;\n    font-size: 14px;\n  }}\n}}"
    )
}

/// Assemble the final stylesheet: header, base, additional, responsive.
///
/// Empty sources drop their section; the responsive rules are always present.
pub fn combine_styles(base: &str, extra: &str, meta: Option<&DocumentMeta>) -> String {
    let mut sections = Vec::with_capacity(4);

    if let Some(meta) = meta {
        sections.push(format!(
            "/* Styles generated from {} on {} */",
            meta.name,
            meta.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    if !base.trim().is_empty() {
        sections.push(format!("/* Base styles */\n{}", base.trim()));
    }
    if !extra.trim().is_empty() {
        sections.push(format!("/* Additional styles */\n{}", extra.trim()));
    }
    sections.push(responsive_section());

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_stops_at_attributes_and_rejects_closers() {
        assert_eq!(tag_name("<svg width=\"1\">"), Some("svg"));
        assert_eq!(tag_name("<path/>"), Some("path"));
        assert_eq!(tag_name("</svg>"), None);
        assert_eq!(tag_name("< svg>"), None);
    }

    #[test]
    fn return_expression_skips_nested_parens() {
        let src = "function A() {\n  return (\n    <div onClick={() => f(1)}>x</div>\n  );\n}";
        let (open, close) = return_expression(src).unwrap();
        assert_eq!(src[open..close].trim(), "<div onClick={() => f(1)}>x</div>");
    }
}
