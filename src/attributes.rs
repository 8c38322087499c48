//! Attribute classification for generated source
//!
//! Each attribute of a parsed element becomes one builder call. The resolver
//! picks the most specific call the builder offers, checked in this order:
//!
//! 1. hyphenated names (`data-*`, `aria-*`, ...) and `property` on `<meta>`
//!    always use the generic `.attr(name, value)`;
//! 2. attributes with an enumerated domain (`dir`, `rel`, `type`, ...) use the
//!    typed setter when the value is an exact member of the domain;
//! 3. `async` becomes `.attr_async(true)` when its value is empty, `true` or
//!    `async`;
//! 4. attributes with a named setter use it (`.attr_class("x")`);
//! 5. everything else falls back to the generic call.
//!
//! An unrecognized value is never an error; it just takes the generic path.

use crate::catalog::{
    self, ContentEditable, Dir, Draggable, EnumAttribute, Rel, Spellcheck, Translate, TypeContent,
};
use crate::utils::rust_string_literal;

/// One builder call setting one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeCall {
    /// A typed setter taking a Rust expression, e.g. `.attr_dir(Dir::Rtl)`
    Typed { method: String, argument: String },
    /// A named setter taking a string, e.g. `.attr_class("nav")`
    Named { method: &'static str, value: String },
    /// `.attr(name, value)`
    Generic { name: String, value: String },
}

impl AttributeCall {
    /// The call as Rust source, starting with the `.`
    ///
    /// `indent` prefixes continuation lines of multi-line string values.
    pub fn to_source(&self, indent: &str) -> String {
        match self {
            AttributeCall::Typed { method, argument } => format!(".{}({})", method, argument),
            AttributeCall::Named { method, value } => {
                format!(".{}({})", method, rust_string_literal(value, indent))
            }
            AttributeCall::Generic { name, value } => format!(
                ".attr({}, {})",
                rust_string_literal(name, indent),
                rust_string_literal(value, indent)
            ),
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, AttributeCall::Generic { .. })
    }
}

/// Choose the builder call for attribute `name="value"` on `element`
pub fn resolve_attribute(element: &str, name: &str, value: &str) -> AttributeCall {
    let generic = || AttributeCall::Generic {
        name: name.to_string(),
        value: value.to_string(),
    };

    if name.contains('-') || (element.eq_ignore_ascii_case("meta") && name == "property") {
        return generic();
    }

    if let Some(call) = typed_call(name, value) {
        return call;
    }

    if name == "async" {
        return if is_async_enabled(value) {
            AttributeCall::Typed {
                method: "attr_async".to_string(),
                argument: "true".to_string(),
            }
        } else {
            generic()
        };
    }

    match catalog::attribute_method(name) {
        Some(method) => AttributeCall::Named {
            method,
            value: value.to_string(),
        },
        None => generic(),
    }
}

fn is_async_enabled(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("async")
}

fn typed_call(name: &str, value: &str) -> Option<AttributeCall> {
    match name {
        "dir" => typed::<Dir>(value),
        "draggable" => typed::<Draggable>(value),
        "spellcheck" => typed::<Spellcheck>(value),
        "contenteditable" => typed::<ContentEditable>(value),
        "translate" => typed::<Translate>(value),
        "rel" => typed::<Rel>(value),
        "type" => typed::<TypeContent>(value),
        _ => None,
    }
}

fn typed<E: EnumAttribute>(value: &str) -> Option<AttributeCall> {
    let member = E::from_value(value);
    if member.is_none() {
        log::trace!(
            target: "html_flow::attributes",
            "`{}` is not a {} value, using the generic setter",
            value,
            E::TYPE_NAME
        );
    }
    member.map(|member| AttributeCall::Typed {
        method: format!("attr_{}", E::ATTRIBUTE),
        argument: member.constant_path(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(element: &str, name: &str, value: &str) -> String {
        resolve_attribute(element, name, value).to_source("")
    }

    #[test]
    fn test_hyphenated_names_are_generic() {
        assert_eq!(source("div", "data-id", "7"), ".attr(\"data-id\", \"7\")");
        assert_eq!(source("button", "aria-label", "Close"), ".attr(\"aria-label\", \"Close\")");
    }

    #[test]
    fn test_meta_property_is_generic() {
        assert_eq!(
            source("meta", "property", "og:title"),
            ".attr(\"property\", \"og:title\")"
        );
    }

    #[test]
    fn test_enumerated_values() {
        assert_eq!(source("html", "dir", "rtl"), ".attr_dir(Dir::Rtl)");
        assert_eq!(source("link", "rel", "stylesheet"), ".attr_rel(Rel::Stylesheet)");
        assert_eq!(source("link", "rel", "dns-prefetch"), ".attr_rel(Rel::DnsPrefetch)");
        assert_eq!(
            source("script", "type", "application/ld+json"),
            ".attr_type(TypeContent::ApplicationLdJson)"
        );
        assert_eq!(
            source("div", "contenteditable", "plaintext-only"),
            ".attr_contenteditable(ContentEditable::PlaintextOnly)"
        );
        assert_eq!(source("p", "translate", "no"), ".attr_translate(Translate::No)");
    }

    #[test]
    fn test_enumerated_miss_falls_back() {
        // matching is exact and case-sensitive
        assert_eq!(source("html", "dir", "RTL"), ".attr(\"dir\", \"RTL\")");
        assert_eq!(source("input", "type", "text"), ".attr(\"type\", \"text\")");
        assert_eq!(
            source("a", "rel", "noopener noreferrer"),
            ".attr(\"rel\", \"noopener noreferrer\")"
        );
    }

    #[test]
    fn test_async_checks_the_value() {
        assert_eq!(source("script", "async", ""), ".attr_async(true)");
        assert_eq!(source("script", "async", "TRUE"), ".attr_async(true)");
        assert_eq!(source("script", "async", "async"), ".attr_async(true)");
        assert_eq!(source("script", "async", "false"), ".attr(\"async\", \"false\")");
    }

    #[test]
    fn test_named_setters() {
        assert_eq!(source("nav", "class", "top"), ".attr_class(\"top\")");
        assert_eq!(source("label", "for", "email"), ".attr_for(\"email\")");
        assert!(matches!(
            resolve_attribute("img", "src", "a.png"),
            AttributeCall::Named { method: "attr_src", .. }
        ));
    }

    #[test]
    fn test_unknown_names_are_generic() {
        assert!(resolve_attribute("div", "foo", "bar").is_generic());
        assert!(resolve_attribute("svg", "viewBox", "0 0 1 1").is_generic());
    }

    #[test]
    fn test_values_are_escaped() {
        assert_eq!(
            source("div", "title", "say \"hi\"\\"),
            ".attr_title(\"say \\\"hi\\\"\\\\\")"
        );
        assert_eq!(
            resolve_attribute("div", "data-x", "a\nb").to_source("  "),
            ".attr(\"data-x\", concat!(\"a\\n\",\n  \"b\"))"
        );
    }
}
