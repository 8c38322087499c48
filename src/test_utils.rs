//! Test utilities for rendered HTML and generated source
//!
//! Rendered documents are compared by structure rather than by bytes, since
//! indentation and line breaks are cosmetic.

use dom_query::Document;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::has_tag_method;
use crate::flowifier::{MarkupKind, MarkupNode};

static TAG_CALL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*\.(?:([a-z][a-z0-9]*)\(\)|element\("([^"]*)"\))\s*$"#)
        .expect("Invalid tag call regex")
});

/// Structural outline of `html`, one line per element, text or comment
///
/// Each line is indented two spaces per depth. Whitespace-only text is
/// dropped and remaining text is trimmed, so pretty and minified renders of
/// the same tree produce the same outline.
///
/// ```
/// use html_flow::test_utils::outline;
///
/// assert_eq!(
///     outline("<p class=\"x\">\n  Hi\n</p>"),
///     outline("<p class=\"x\">Hi</p>")
/// );
/// ```
pub fn outline(html: &str) -> Vec<String> {
    let doc = Document::from(html);
    let mut lines = Vec::new();
    collect_outline(&doc.root(), 0, &mut lines);
    lines
}

fn collect_outline<N: MarkupNode>(node: &N, depth: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(depth);
    let next = match node.kind() {
        MarkupKind::Element => {
            let attributes: String = node
                .attributes()
                .iter()
                .map(|(name, value)| format!(" {}={:?}", name, value))
                .collect();
            lines.push(format!(
                "{}<{}{}>",
                pad,
                node.tag_name().unwrap_or_default(),
                attributes
            ));
            depth + 1
        }
        MarkupKind::Text | MarkupKind::Data => {
            let text = node.whole_text();
            if !text.trim().is_empty() {
                lines.push(format!("{}{:?}", pad, text.trim()));
            }
            return;
        }
        MarkupKind::Comment => {
            lines.push(format!("{}<!--{}-->", pad, node.whole_text()));
            return;
        }
        MarkupKind::Document => depth,
        MarkupKind::Doctype | MarkupKind::Other => return,
    };

    for child in node.children() {
        collect_outline(&child, next, lines);
    }
}

/// Normalize HTML for comparison: the outline joined into one string
pub fn normalize_html(html: &str) -> String {
    outline(html).join("\n")
}

/// Assert that two HTML strings have the same structure
///
/// ```
/// use html_flow::assert_html_eq;
///
/// assert_html_eq!("<div>\n  <p>Text</p>\n</div>", "<div><p>Text</p></div>");
/// ```
#[macro_export]
macro_rules! assert_html_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_html_eq!($left, $right, "")
    };
    ($left:expr, $right:expr, $($arg:tt)*) => {
        {
            let left_normalized = $crate::test_utils::normalize_html($left);
            let right_normalized = $crate::test_utils::normalize_html($right);

            if left_normalized != right_normalized {
                panic!(
                    "HTML assertion failed: {}\n\nLeft (normalized):\n{}\n\nRight (normalized):\n{}\n\nOriginal left:\n{}\n\nOriginal right:\n{}",
                    format!($($arg)*),
                    left_normalized,
                    right_normalized,
                    $left,
                    $right
                );
            }
        }
    };
}

/// Tag names of every element in `html`, in document order
pub fn element_tags(html: &str) -> Vec<String> {
    outline(html)
        .iter()
        .filter_map(|line| {
            let line = line.trim_start();
            line.strip_prefix('<')
                .filter(|rest| !rest.starts_with("!--"))
                .map(|rest| {
                    rest.split(|c: char| c == ' ' || c == '>')
                        .next()
                        .unwrap_or_default()
                        .to_string()
                })
        })
        .collect()
}

/// Tags opened by generated builder source, in call order
pub fn flowified_tags(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let captures = TAG_CALL_REGEX.captures(line)?;
            if let Some(method) = captures.get(1) {
                has_tag_method(method.as_str()).then(|| method.as_str().to_string())
            } else {
                captures.get(2).map(|tag| tag.as_str().to_string())
            }
        })
        .collect()
}

/// Count elements matching a selector
pub fn count_elements(html: &str, selector: &str) -> usize {
    Document::from(html).select(selector).nodes().len()
}

/// Attribute values of the elements matching a selector
pub fn extract_attrs_by_selector(html: &str, selector: &str, attr: &str) -> Vec<String> {
    let doc = Document::from(html);
    let selection = doc.select(selector);

    selection
        .nodes()
        .iter()
        .filter_map(|node| node.attr(attr).map(|v| v.to_string()))
        .collect()
}
