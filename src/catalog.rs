//! HTML element and attribute catalog
//!
//! The catalog is the single source of truth for what the fluent surface can
//! express: which tag names get their own builder method, which elements are
//! void, which attributes get a named setter and which attributes have an
//! enumerated value domain. Builder methods are generated from these tables,
//! and the flowifier consults them to decide which calls it may emit.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Invoke `$callback!` with the catalog's tag names
///
/// Containers are elements with children and a closing tag; voids are
/// elements without either.
macro_rules! with_html_tags {
    ($callback:ident) => {
        $callback! {
            containers: [
                a, abbr, address, article, aside, audio, b, bdi, bdo, blockquote, body, button,
                canvas, caption, cite, code, colgroup, data, datalist, dd, del, details, dfn,
                dialog, div, dl, dt, em, fieldset, figcaption, figure, footer, form, h1, h2, h3,
                h4, h5, h6, head, header, hgroup, html, i, iframe, ins, kbd, label, legend, li,
                main, map, mark, menu, meter, nav, noscript, object, ol, optgroup, option, output,
                p, picture, pre, progress, q, rp, rt, ruby, s, samp, script, search, section,
                select, slot, small, span, strong, style, sub, summary, sup, table, tbody, td,
                template, textarea, tfoot, th, thead, time, title, tr, u, ul, var, video
            ],
            voids: [area, base, br, col, embed, hr, img, input, link, meta, source, track, wbr]
        }
    };
}
pub(crate) use with_html_tags;

/// Invoke `$callback!` with `method => "attribute"` pairs for plain string attributes
macro_rules! with_named_attributes {
    ($callback:ident) => {
        $callback! {
            attr_accept => "accept",
            attr_accesskey => "accesskey",
            attr_action => "action",
            attr_alt => "alt",
            attr_autocomplete => "autocomplete",
            attr_autofocus => "autofocus",
            attr_charset => "charset",
            attr_checked => "checked",
            attr_cite => "cite",
            attr_class => "class",
            attr_cols => "cols",
            attr_colspan => "colspan",
            attr_content => "content",
            attr_controls => "controls",
            attr_coords => "coords",
            attr_crossorigin => "crossorigin",
            attr_datetime => "datetime",
            attr_defer => "defer",
            attr_disabled => "disabled",
            attr_download => "download",
            attr_enctype => "enctype",
            attr_for => "for",
            attr_form => "form",
            attr_formaction => "formaction",
            attr_headers => "headers",
            attr_height => "height",
            attr_hidden => "hidden",
            attr_high => "high",
            attr_href => "href",
            attr_hreflang => "hreflang",
            attr_id => "id",
            attr_integrity => "integrity",
            attr_label => "label",
            attr_lang => "lang",
            attr_list => "list",
            attr_loop => "loop",
            attr_low => "low",
            attr_max => "max",
            attr_maxlength => "maxlength",
            attr_media => "media",
            attr_method => "method",
            attr_min => "min",
            attr_minlength => "minlength",
            attr_multiple => "multiple",
            attr_muted => "muted",
            attr_name => "name",
            attr_novalidate => "novalidate",
            attr_onclick => "onclick",
            attr_onload => "onload",
            attr_open => "open",
            attr_optimum => "optimum",
            attr_pattern => "pattern",
            attr_placeholder => "placeholder",
            attr_poster => "poster",
            attr_preload => "preload",
            attr_readonly => "readonly",
            attr_referrerpolicy => "referrerpolicy",
            attr_required => "required",
            attr_reversed => "reversed",
            attr_role => "role",
            attr_rows => "rows",
            attr_rowspan => "rowspan",
            attr_sandbox => "sandbox",
            attr_scope => "scope",
            attr_selected => "selected",
            attr_shape => "shape",
            attr_size => "size",
            attr_sizes => "sizes",
            attr_span => "span",
            attr_src => "src",
            attr_srcdoc => "srcdoc",
            attr_srclang => "srclang",
            attr_srcset => "srcset",
            attr_start => "start",
            attr_step => "step",
            attr_style => "style",
            attr_tabindex => "tabindex",
            attr_target => "target",
            attr_title => "title",
            attr_usemap => "usemap",
            attr_value => "value",
            attr_width => "width",
            attr_wrap => "wrap",
            attr_xmlns => "xmlns"
        }
    };
}
pub(crate) use with_named_attributes;

macro_rules! tag_tables {
    (containers: [$($container:ident),* $(,)?], voids: [$($void:ident),* $(,)?]) => {
        const CONTAINER_TAGS: &[&str] = &[$(stringify!($container)),*];
        const VOID_TAGS: &[&str] = &[$(stringify!($void)),*];
    };
}
with_html_tags!(tag_tables);

macro_rules! attribute_table {
    ($($method:ident => $name:literal),* $(,)?) => {
        const NAMED_ATTRIBUTES: &[(&str, &str)] = &[$(($name, stringify!($method))),*];
    };
}
with_named_attributes!(attribute_table);

/// Obsolete elements that browsers still treat as void
const LEGACY_VOID_TAGS: &[&str] = &[
    "basefont", "bgsound", "command", "frame", "image", "isindex", "keygen", "menuitem",
    "nextid", "param",
];

static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    VOID_TAGS
        .iter()
        .chain(LEGACY_VOID_TAGS.iter())
        .copied()
        .collect()
});

static TAG_METHODS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    CONTAINER_TAGS.iter().chain(VOID_TAGS.iter()).copied().collect()
});

static ATTRIBUTE_METHODS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| NAMED_ATTRIBUTES.iter().copied().collect());

/// Whether `name` is a void element (no children, no closing tag)
///
/// The comparison ignores ASCII case.
pub fn is_void_element(name: &str) -> bool {
    if VOID_ELEMENTS.contains(name) {
        return true;
    }
    VOID_ELEMENTS.contains(name.to_ascii_lowercase().as_str())
}

/// Whether the builder has a dedicated method named after `tag`
pub fn has_tag_method(tag: &str) -> bool {
    TAG_METHODS.contains(tag)
}

/// The builder method that sets the plain attribute `name`, if there is one
pub fn attribute_method(name: &str) -> Option<&'static str> {
    ATTRIBUTE_METHODS.get(name).copied()
}

/// Elements whose content the parser reads as unescaped text
///
/// `noscript` is included because parsing runs with scripting enabled.
const RAW_TEXT_TAGS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

/// Elements whose text content must be written without added whitespace
const PRESERVED_WHITESPACE_TAGS: &[&str] = &["listing", "plaintext", "pre", "textarea", "title"];

/// Whether text inside `tag` is raw data rather than markup-escaped text
pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_TAGS.iter().any(|raw| raw.eq_ignore_ascii_case(tag))
}

/// Whether pretty printing must leave the content of `tag` untouched
pub fn preserves_whitespace(tag: &str) -> bool {
    PRESERVED_WHITESPACE_TAGS
        .iter()
        .any(|preserved| preserved.eq_ignore_ascii_case(tag))
}

/// An attribute whose values come from a fixed domain
///
/// Each variant maps to the exact string written into the markup, and the
/// reverse lookup [`EnumAttribute::from_value`] is exact and case-sensitive.
pub trait EnumAttribute: Copy + fmt::Debug + 'static {
    /// The HTML attribute this domain belongs to
    const ATTRIBUTE: &'static str;
    /// The Rust type name, as it appears in generated source
    const TYPE_NAME: &'static str;
    /// Every member of the domain
    const VARIANTS: &'static [Self];

    /// The markup string for this value
    fn value(self) -> &'static str;

    /// The Rust variant name, as it appears in generated source
    fn variant_name(self) -> &'static str;

    /// Reverse lookup from a raw attribute value
    fn from_value(raw: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.value() == raw)
    }

    /// `TypeName::Variant`, the constant path used in generated source
    fn constant_path(self) -> String {
        format!("{}::{}", Self::TYPE_NAME, self.variant_name())
    }
}

macro_rules! attribute_enum {
    (
        $(#[$meta:meta])*
        $name:ident for $attribute:literal {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl EnumAttribute for $name {
            const ATTRIBUTE: &'static str = $attribute;
            const TYPE_NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            fn variant_name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }
    };
}

attribute_enum! {
    /// Values of the `dir` attribute
    Dir for "dir" {
        Ltr => "ltr",
        Rtl => "rtl",
        Auto => "auto",
    }
}

attribute_enum! {
    /// Values of the `draggable` attribute
    Draggable for "draggable" {
        True => "true",
        False => "false",
        Auto => "auto",
    }
}

attribute_enum! {
    /// Values of the `spellcheck` attribute
    Spellcheck for "spellcheck" {
        True => "true",
        False => "false",
    }
}

attribute_enum! {
    /// Values of the `contenteditable` attribute
    ContentEditable for "contenteditable" {
        True => "true",
        False => "false",
        PlaintextOnly => "plaintext-only",
    }
}

attribute_enum! {
    /// Values of the `translate` attribute
    Translate for "translate" {
        Yes => "yes",
        No => "no",
    }
}

attribute_enum! {
    /// Link types accepted by the `rel` attribute
    Rel for "rel" {
        Alternate => "alternate",
        Author => "author",
        Bookmark => "bookmark",
        Canonical => "canonical",
        DnsPrefetch => "dns-prefetch",
        External => "external",
        Help => "help",
        Icon => "icon",
        License => "license",
        Manifest => "manifest",
        Modulepreload => "modulepreload",
        Next => "next",
        Nofollow => "nofollow",
        Noopener => "noopener",
        Noreferrer => "noreferrer",
        Pingback => "pingback",
        Preconnect => "preconnect",
        Prefetch => "prefetch",
        Preload => "preload",
        Prerender => "prerender",
        Prev => "prev",
        Search => "search",
        Stylesheet => "stylesheet",
        Tag => "tag",
    }
}

attribute_enum! {
    /// Content types accepted by the `type` attribute of `script`, `style` and `link`
    TypeContent for "type" {
        TextCss => "text/css",
        TextJavascript => "text/javascript",
        TextHtml => "text/html",
        ApplicationJavascript => "application/javascript",
        ApplicationJson => "application/json",
        ApplicationLdJson => "application/ld+json",
        ApplicationRssXml => "application/rss+xml",
        ApplicationAtomXml => "application/atom+xml",
        ImagePng => "image/png",
        ImageSvgXml => "image/svg+xml",
        ImageXIcon => "image/x-icon",
        Module => "module",
    }
}
