//! String helpers shared by the renderer and the flowifier
//!
//! HTML escaping returns `Cow` so text that needs no escaping is written
//! without an allocation. Rust literal escaping produces source text that
//! re-parses to exactly the original string.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fmt::Write;

static IDENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex"));

static ELEMENT_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[A-Za-z][^\s\x00-\x1F\x7F"'<>/=]*$"#).expect("Invalid element name regex")
});

static ATTRIBUTE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[^\s\x00-\x1F\x7F"'<>/=]+$"#).expect("Invalid attribute name regex")
});

/// Whether `name` can be written as a tag name without changing the markup
///
/// Names start with an ASCII letter and contain no whitespace, control
/// characters, quotes, `<`, `>`, `/` or `=`. Custom elements (`my-card`) and
/// namespaced SVG names pass.
pub fn is_element_name(name: &str) -> bool {
    ELEMENT_NAME_REGEX.is_match(name)
}

/// Whether `name` can be written as an attribute name, `xlink:href` included
pub fn is_attribute_name(name: &str) -> bool {
    ATTRIBUTE_NAME_REGEX.is_match(name)
}

/// Whether `text` can sit between `<!--` and `-->` and parse back unchanged
pub fn is_comment_text(text: &str) -> bool {
    !(text.starts_with('>')
        || text.starts_with("->")
        || text.ends_with("<!-")
        || text.contains("<!--")
        || text.contains("-->")
        || text.contains("--!>"))
}

/// Whether `name` can be used as a Rust identifier
///
/// Only the lexical shape is checked; `_` alone and keywords are rejected.
pub fn is_identifier(name: &str) -> bool {
    IDENT_REGEX.is_match(name) && name != "_" && !is_keyword(name)
}

/// Whether `path` is a `::`-separated path of identifiers, such as `crate::html`
pub fn is_path(path: &str) -> bool {
    path.split("::")
        .all(|segment| is_identifier(segment) || matches!(segment, "crate" | "self" | "super"))
}

fn is_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "async" | "await" | "break" | "const" | "continue" | "crate" | "dyn" | "else"
            | "enum" | "extern" | "false" | "fn" | "for" | "if" | "impl" | "in" | "let"
            | "loop" | "match" | "mod" | "move" | "mut" | "pub" | "ref" | "return" | "self"
            | "Self" | "static" | "struct" | "super" | "trait" | "true" | "type" | "unsafe"
            | "use" | "where" | "while" | "yield"
    )
}

/// Split a dot-separated property path into segments
///
/// `"user.name"` becomes `["user", "name"]`; an empty path yields no segments.
pub fn split_path(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split('.').map(String::from).collect()
}

/// Escape text content for HTML output (`&`, `<`, `>`)
pub fn escape_html_text(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>']) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + input.len() / 4);
    for ch in input.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(ch),
        }
    }
    Cow::Owned(result)
}

/// Escape an attribute value for a double-quoted HTML attribute
pub fn escape_html_attribute(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + input.len() / 4);
    for ch in input.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    Cow::Owned(result)
}

/// Append `c` to `out` as it must appear inside a double-quoted Rust literal
fn push_escaped_char(out: &mut String, c: char) {
    match c {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\0' => out.push_str("\\0"),
        c if c.is_control() => {
            // writing to a String cannot fail
            let _ = write!(out, "\\u{{{:x}}}", c as u32);
        }
        c => out.push(c),
    }
}

fn quoted(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len() + 2);
    result.push('"');
    for c in segment.chars() {
        push_escaped_char(&mut result, c);
    }
    result.push('"');
    result
}

/// Render `value` as a Rust string literal expression
///
/// A value containing line breaks is split after each `\n` into a
/// `concat!(...)` expression, one literal per line, with continuation lines
/// prefixed by `indent`. The expression always evaluates to `value`.
///
/// ```rust
/// use html_flow::utils::rust_string_literal;
///
/// assert_eq!(rust_string_literal("say \"hi\"", ""), r#""say \"hi\"""#);
/// assert_eq!(
///     rust_string_literal("a\nb", "    "),
///     "concat!(\"a\\n\",\n    \"b\")"
/// );
/// ```
pub fn rust_string_literal(value: &str, indent: &str) -> String {
    let segments: Vec<&str> = value.split_inclusive('\n').collect();
    if segments.len() <= 1 {
        return quoted(value);
    }

    let mut result = String::from("concat!(");
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            result.push_str(",\n");
            result.push_str(indent);
        }
        result.push_str(&quoted(segment));
    }
    result.push(')');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("name"), vec!["name"]);
        assert_eq!(split_path("user.profile.name"), vec!["user", "profile", "name"]);
        assert!(split_path("").is_empty());
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("landing_page"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("my-page"));
        assert!(!is_identifier("fn"));
        assert!(!is_identifier("_"));
        assert!(is_path("html_flow"));
        assert!(is_path("crate::html"));
        assert!(!is_path("html::"));
    }

    #[test]
    fn test_markup_names() {
        assert!(is_element_name("div"));
        assert!(is_element_name("my-card"));
        assert!(is_element_name("foreignObject"));
        assert!(!is_element_name(""));
        assert!(!is_element_name("a b"));
        assert!(!is_element_name("1st"));
        assert!(!is_element_name("p>"));
        assert!(!is_element_name("br/"));

        assert!(is_attribute_name("class"));
        assert!(is_attribute_name("data-id"));
        assert!(is_attribute_name("xlink:href"));
        assert!(is_attribute_name("@click"));
        assert!(!is_attribute_name(""));
        assert!(!is_attribute_name("x onload=alert(1) y"));
        assert!(!is_attribute_name("a\"b"));
        assert!(!is_attribute_name("a=b"));
        assert!(!is_attribute_name("a>"));
    }

    #[test]
    fn test_comment_text() {
        assert!(is_comment_text(" note "));
        assert!(is_comment_text(""));
        assert!(is_comment_text("a - b -- c"));
        assert!(is_comment_text("trailing-"));
        assert!(!is_comment_text("a-->b"));
        assert!(!is_comment_text(">start"));
        assert!(!is_comment_text("->start"));
        assert!(!is_comment_text("nested <!-- comment"));
        assert!(!is_comment_text("a--!>b"));
        assert!(!is_comment_text("end<!-"));
    }

    #[test]
    fn test_escape_html_text() {
        assert!(matches!(escape_html_text("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_html_text("a < b & c"), "a &lt; b &amp; c");
        // quotes are fine in text
        assert_eq!(escape_html_text("\"q\""), "\"q\"");
    }

    #[test]
    fn test_escape_html_attribute() {
        assert!(matches!(escape_html_attribute("plain"), Cow::Borrowed(_)));
        assert_eq!(
            escape_html_attribute("say \"<hi>\" & go"),
            "say &quot;&lt;hi&gt;&quot; &amp; go"
        );
    }

    #[test]
    fn test_rust_literal_simple() {
        assert_eq!(rust_string_literal("", ""), "\"\"");
        assert_eq!(rust_string_literal("Hi", ""), "\"Hi\"");
        assert_eq!(rust_string_literal("it's", ""), "\"it's\"");
        assert_eq!(rust_string_literal("back\\slash", ""), "\"back\\\\slash\"");
    }

    #[test]
    fn test_rust_literal_control_characters() {
        assert_eq!(rust_string_literal("a\tb\r", ""), "\"a\\tb\\r\"");
        assert_eq!(rust_string_literal("\u{8}\u{c}", ""), "\"\\u{8}\\u{c}\"");
        assert_eq!(rust_string_literal("\u{7f}", ""), "\"\\u{7f}\"");
        assert_eq!(rust_string_literal("nul\0", ""), "\"nul\\0\"");
    }

    #[test]
    fn test_rust_literal_trailing_newline_stays_single() {
        assert_eq!(rust_string_literal("line\n", "  "), "\"line\\n\"");
    }

    #[test]
    fn test_rust_literal_multiline() {
        assert_eq!(
            rust_string_literal("one\ntwo\nthree", "    "),
            "concat!(\"one\\n\",\n    \"two\\n\",\n    \"three\")"
        );
    }

    #[test]
    fn test_rust_literal_keeps_non_ascii() {
        assert_eq!(rust_string_literal("olá ✓", ""), "\"olá ✓\"");
    }
}
