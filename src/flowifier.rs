//! Markup to builder source
//!
//! The flowifier walks a parsed markup tree and writes Rust source for a
//! function that rebuilds the same tree with the fluent builder. The walk is
//! depth-first; [`FlowContext::entering`] runs before a node's children and
//! [`FlowContext::leaving`] after them.
//!
//! ```rust
//! use html_flow::Flowifier;
//!
//! let source = Flowifier::new().flowify_html(r#"<p class="note">Hi</p>"#);
//! assert!(source.contains(".p()"));
//! assert!(source.contains(".attr_class(\"note\")"));
//! assert!(source.contains(".text(\"Hi\")"));
//! assert!(source.contains(".close() // p"));
//! ```
//!
//! Output goes to any [`std::fmt::Write`] sink, one fragment per write. A
//! failing write is logged and counted in [`FlowStats`], and the walk goes on,
//! so the output of a flowify with failed writes is incomplete.

use std::fmt::{self, Write};

use crate::attributes::resolve_attribute;
use crate::catalog::{has_tag_method, is_void_element};
use crate::types::FlowifyConfig;
use crate::utils::{is_identifier, is_path, rust_string_literal};

const BASE_INDENT: &str = "        ";
const LEVEL_INDENT: &str = "    ";

/// What a markup node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    Document,
    Doctype,
    Element,
    Text,
    /// Text inside a raw-text element such as `script` or `noscript`, written verbatim
    Data,
    Comment,
    /// Anything else, such as processing instructions; skipped
    Other,
}

/// Read access to a parsed markup tree
///
/// Implemented for `dom_query` nodes; other parsers can plug in by
/// implementing it for their own node type.
pub trait MarkupNode: Sized {
    fn kind(&self) -> MarkupKind;

    /// Tag name of an element, `None` for other kinds
    fn tag_name(&self) -> Option<String>;

    /// Attributes in source order
    fn attributes(&self) -> Vec<(String, String)>;

    fn children(&self) -> Vec<Self>;

    /// Text of a text, data or comment node
    fn whole_text(&self) -> String;
}

/// Counters of one flowify run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowStats {
    /// Fragments handed to the sink
    pub fragments: usize,
    /// Fragments the sink rejected
    pub failed_writes: usize,
}

impl FlowStats {
    pub fn is_complete(&self) -> bool {
        self.failed_writes == 0
    }
}

/// Traversal state: the sink, the configuration and the counters
pub struct FlowContext<'a, W> {
    out: &'a mut W,
    function_name: &'a str,
    crate_name: &'a str,
    skip_blank_text: bool,
    stats: FlowStats,
}

impl<'a, W: Write> FlowContext<'a, W> {
    pub fn new(out: &'a mut W, config: &'a FlowifyConfig) -> Self {
        let function_name = if is_identifier(config.function_name()) {
            config.function_name()
        } else {
            log::warn!(
                target: "html_flow::flowifier",
                "`{}` is not a valid function name, using `flowified`",
                config.function_name()
            );
            "flowified"
        };
        let crate_name = if is_path(config.crate_name()) {
            config.crate_name()
        } else {
            log::warn!(
                target: "html_flow::flowifier",
                "`{}` is not a valid crate path, using `html_flow`",
                config.crate_name()
            );
            "html_flow"
        };

        Self {
            out,
            function_name,
            crate_name,
            skip_blank_text: config.skip_blank_text(),
            stats: FlowStats::default(),
        }
    }

    pub fn stats(&self) -> FlowStats {
        self.stats
    }

    /// Walk `node` and its descendants
    pub fn walk<N: MarkupNode>(&mut self, node: &N, depth: usize) {
        self.entering(node, depth);
        for child in node.children() {
            self.walk(&child, depth + 1);
        }
        self.leaving(node, depth);
    }

    /// Emit the calls that open `node`
    ///
    /// At depth 0 the function preamble is written first.
    pub fn entering<N: MarkupNode>(&mut self, node: &N, depth: usize) {
        if depth == 0 {
            self.preamble();
        }

        match node.kind() {
            MarkupKind::Element => {
                let Some(tag) = node.tag_name() else {
                    return;
                };
                if has_tag_method(&tag) {
                    self.line(depth, &format!(".{}()", tag));
                } else {
                    let literal = rust_string_literal(&tag, &indent(depth + 1));
                    self.line(depth, &format!(".element({})", literal));
                }
                let continuation = indent(depth + 2);
                for (name, value) in node.attributes() {
                    let call = resolve_attribute(&tag, &name, &value);
                    self.line(depth + 1, &call.to_source(&continuation));
                }
            }
            MarkupKind::Text => {
                let text = node.whole_text();
                if self.skip_blank_text && text.trim().is_empty() {
                    return;
                }
                self.leaf(depth, "text", &text);
            }
            MarkupKind::Data => self.leaf(depth, "raw", &node.whole_text()),
            MarkupKind::Comment => self.leaf(depth, "comment", &node.whole_text()),
            MarkupKind::Document | MarkupKind::Doctype | MarkupKind::Other => {}
        }
    }

    /// Emit the calls that close `node`
    ///
    /// Void elements with a dedicated method need no close call. At depth 0 the
    /// function epilogue is written last.
    pub fn leaving<N: MarkupNode>(&mut self, node: &N, depth: usize) {
        if node.kind() == MarkupKind::Element {
            if let Some(tag) = node.tag_name() {
                if !(is_void_element(&tag) && has_tag_method(&tag)) {
                    self.line(depth, &format!(".close() // {}", tag));
                }
            }
        }

        if depth == 0 {
            self.epilogue();
        }
    }

    fn preamble(&mut self) {
        let header = format!(
            "use {}::prelude::*;\n\npub fn {}() -> Document<()> {{\n",
            self.crate_name, self.function_name
        );
        self.emit(&header);
        self.emit("    let mut doc = Document::new();\n");
        self.emit("    doc.root()\n");
    }

    fn epilogue(&mut self) {
        self.emit(&format!("{};\n", BASE_INDENT));
        self.emit("    doc\n");
        self.emit("}\n");
    }

    fn leaf(&mut self, depth: usize, method: &str, text: &str) {
        let literal = rust_string_literal(text, &indent(depth + 1));
        self.line(depth, &format!(".{}({})", method, literal));
    }

    fn line(&mut self, depth: usize, code: &str) {
        self.emit(&format!("{}{}\n", indent(depth), code));
    }

    fn emit(&mut self, fragment: &str) {
        self.stats.fragments += 1;
        if let Err(err) = self.out.write_str(fragment) {
            self.stats.failed_writes += 1;
            log::warn!(
                target: "html_flow::flowifier",
                "failed to write generated source fragment ({} bytes): {}",
                fragment.len(),
                err
            );
        }
    }
}

fn indent(depth: usize) -> String {
    let mut result = String::with_capacity(BASE_INDENT.len() + depth * LEVEL_INDENT.len());
    result.push_str(BASE_INDENT);
    for _ in 0..depth {
        result.push_str(LEVEL_INDENT);
    }
    result
}

/// Generates builder source from markup trees
#[derive(Debug, Clone, Default)]
pub struct Flowifier {
    config: FlowifyConfig,
}

impl Flowifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FlowifyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FlowifyConfig {
        &self.config
    }

    /// Generate source for `root` into a new string
    pub fn flowify<N: MarkupNode>(&self, root: &N) -> String {
        let mut out = String::new();
        self.flowify_into(root, &mut out);
        out
    }

    /// Generate source for `root` into `out`
    pub fn flowify_into<N: MarkupNode, W: Write>(&self, root: &N, out: &mut W) -> FlowStats {
        let mut context = FlowContext::new(out, &self.config);
        context.walk(root, 0);
        let stats = context.stats();
        log::debug!(
            target: "html_flow::flowifier",
            "flowified into {} fragments, {} failed",
            stats.fragments,
            stats.failed_writes
        );
        stats
    }

    /// Parse `html` as a full document and generate source for it
    pub fn flowify_html(&self, html: &str) -> String {
        let document = dom_query::Document::from(html);
        self.flowify(&document.root())
    }
}

impl fmt::Display for FlowStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fragments, {} failed writes",
            self.fragments, self.failed_writes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Hand-built markup tree
    #[derive(Debug, Clone)]
    enum Fake {
        Element(&'static str, Vec<(&'static str, &'static str)>, Vec<Fake>),
        Text(&'static str),
        Data(&'static str),
        Comment(&'static str),
        Doctype,
    }

    impl MarkupNode for Fake {
        fn kind(&self) -> MarkupKind {
            match self {
                Fake::Element(..) => MarkupKind::Element,
                Fake::Text(_) => MarkupKind::Text,
                Fake::Data(_) => MarkupKind::Data,
                Fake::Comment(_) => MarkupKind::Comment,
                Fake::Doctype => MarkupKind::Doctype,
            }
        }

        fn tag_name(&self) -> Option<String> {
            match self {
                Fake::Element(name, ..) => Some(name.to_string()),
                _ => None,
            }
        }

        fn attributes(&self) -> Vec<(String, String)> {
            match self {
                Fake::Element(_, attrs, _) => attrs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                _ => Vec::new(),
            }
        }

        fn children(&self) -> Vec<Self> {
            match self {
                Fake::Element(_, _, children) => children.clone(),
                _ => Vec::new(),
            }
        }

        fn whole_text(&self) -> String {
            match self {
                Fake::Text(t) | Fake::Data(t) | Fake::Comment(t) => t.to_string(),
                _ => String::new(),
            }
        }
    }

    /// Sink that rejects every `n`th write
    struct FlakySink {
        every: usize,
        writes: usize,
        accepted: String,
    }

    impl Write for FlakySink {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.writes += 1;
            if self.writes % self.every == 0 {
                return Err(fmt::Error);
            }
            self.accepted.push_str(s);
            Ok(())
        }
    }

    fn div_with_data_id() -> Fake {
        Fake::Element("div", vec![("data-id", "7")], vec![Fake::Text("Hi")])
    }

    #[test]
    fn test_full_output() {
        let source = Flowifier::new().flowify(&div_with_data_id());
        let expected = "use html_flow::prelude::*;

pub fn flowified() -> Document<()> {
    let mut doc = Document::new();
    doc.root()
        .div()
            .attr(\"data-id\", \"7\")
            .text(\"Hi\")
        .close() // div
        ;
    doc
}
";
        assert_eq!(source, expected);
    }

    #[test]
    fn test_call_order() {
        let source = Flowifier::new().flowify(&div_with_data_id());
        let positions: Vec<usize> = [".div()", ".attr(\"data-id\", \"7\")", ".text(\"Hi\")", ".close() // div"]
            .iter()
            .map(|call| source.find(call).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_void_and_custom_elements() {
        let tree = Fake::Element(
            "body",
            vec![],
            vec![
                Fake::Element("img", vec![("src", "a.png")], vec![]),
                Fake::Element("my-widget", vec![], vec![]),
                Fake::Element("keygen", vec![], vec![]),
            ],
        );
        let source = Flowifier::new().flowify(&tree);

        assert!(source.contains(".img()\n"));
        assert!(source.contains(".attr_src(\"a.png\")\n"));
        assert!(!source.contains(".close() // img"));
        assert!(source.contains(".element(\"my-widget\")\n"));
        assert!(source.contains(".close() // my-widget"));
        // legacy voids have no method, so the generic element must be closed
        assert!(source.contains(".close() // keygen"));
    }

    #[test]
    fn test_leaf_kinds() {
        let tree = Fake::Element(
            "head",
            vec![],
            vec![
                Fake::Doctype,
                Fake::Comment(" meta "),
                Fake::Element("script", vec![], vec![Fake::Data("if (a < b) {}")]),
            ],
        );
        let source = Flowifier::new().flowify(&tree);

        assert!(source.contains(".comment(\" meta \")"));
        assert!(source.contains(".raw(\"if (a < b) {}\")"));
        assert!(!source.to_lowercase().contains("doctype"));
    }

    #[test]
    fn test_skip_blank_text() {
        let tree = Fake::Element("p", vec![], vec![Fake::Text("\n  "), Fake::Text("x")]);

        let kept = Flowifier::new().flowify(&tree);
        assert!(kept.contains(".text(\"\\n  \")"));

        let config = FlowifyConfig::default().with_skip_blank_text(true);
        let skipped = Flowifier::with_config(config).flowify(&tree);
        assert!(!skipped.contains("\\n  "));
        assert!(skipped.contains(".text(\"x\")"));
    }

    #[test]
    fn test_multiline_text_uses_concat() {
        let tree = Fake::Element("pre", vec![], vec![Fake::Text("a\nb")]);
        let source = Flowifier::new().flowify(&tree);
        assert!(source.contains(
            "            .text(concat!(\"a\\n\",\n                \"b\"))\n"
        ));
    }

    #[test]
    fn test_custom_names() {
        let config = FlowifyConfig::default()
            .with_function_name("landing")
            .with_crate_name("crate::html");
        let source = Flowifier::with_config(config).flowify(&div_with_data_id());
        assert!(source.starts_with("use crate::html::prelude::*;\n\npub fn landing()"));
    }

    #[test]
    fn test_invalid_function_name_falls_back() {
        let config = FlowifyConfig::default().with_function_name("my page");
        let source = Flowifier::with_config(config).flowify(&div_with_data_id());
        assert!(source.contains("pub fn flowified()"));
    }

    #[test]
    fn test_failed_writes_are_counted_and_walk_continues() {
        let mut sink = FlakySink {
            every: 3,
            writes: 0,
            accepted: String::new(),
        };
        let stats = Flowifier::new().flowify_into(&div_with_data_id(), &mut sink);

        assert_eq!(stats.fragments, sink.writes);
        assert_eq!(stats.failed_writes, sink.writes / 3);
        assert!(!stats.is_complete());
        // the epilogue still reached the sink after earlier failures
        assert!(sink.accepted.ends_with("}\n"));
    }

    #[test]
    fn test_epilogue_written_once() {
        let source = Flowifier::new().flowify(&div_with_data_id());
        assert_eq!(source.matches("    doc\n}").count(), 1);
        assert_eq!(source.matches("doc.root()").count(), 1);
    }
}
