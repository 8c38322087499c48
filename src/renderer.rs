//! Document rendering
//!
//! The renderer walks the arena in document order. Every element goes through
//! two hooks: [`Renderer::before_children`] writes the start tag and
//! [`Renderer::after_children`] writes the end tag (nothing for void elements).
//! Leaves are written in between. Inside `pre`, `textarea`, `title` and the
//! other whitespace-preserving elements nothing is indented and no line breaks
//! are added, so pretty output keeps their content byte for byte.
//!
//! Before any output is produced the render root is validated, so a failed
//! render never leaves half a document in the sink because of a missing data
//! object or an unfinished tree. Only a failing sink can interrupt output.

use std::borrow::Cow;
use std::fmt::Write;

use crate::builder::Document;
use crate::catalog::{is_void_element, preserves_whitespace};
use crate::error::{Error, Result};
use crate::node::{AttrValue, Content, Node, NodeId, NodeKind};
use crate::types::RenderConfig;
use crate::utils::{escape_html_attribute, escape_html_text};

/// Renders a [`Document`] against an optional data object
pub struct Renderer<'a, T> {
    doc: &'a Document<T>,
    config: &'a RenderConfig,
}

impl<'a, T> Renderer<'a, T> {
    /// Create a renderer using the document's own configuration
    pub fn new(doc: &'a Document<T>) -> Self {
        Self {
            doc,
            config: &doc.config,
        }
    }

    /// Render with a configuration other than the document's
    pub fn with_config(doc: &'a Document<T>, config: &'a RenderConfig) -> Self {
        Self { doc, config }
    }

    /// Write the preamble followed by the whole tree
    pub fn render_document<W: Write>(&self, out: &mut W, data: Option<&T>) -> Result<()> {
        if self.doc.root_element().is_none() {
            return Err(Error::invalid_state_static("the document has no root element"));
        }
        let root = self.doc.root_id();
        self.validate(root, data.is_some())?;

        if !self.config.preamble.is_empty() {
            out.write_str(&self.config.preamble)?;
            self.end_line(out)?;
        }
        self.render_node(out, root, Some(0), data)
    }

    /// Write the sub-tree rooted at `id`, without the preamble
    pub fn render_subtree<W: Write>(&self, out: &mut W, id: NodeId, data: Option<&T>) -> Result<()> {
        if self.doc.node(id).is_none() {
            return Err(Error::invalid_state_owned(format!(
                "node {} does not belong to this document",
                id.index()
            )));
        }
        self.validate(id, data.is_some())?;
        self.render_node(out, id, Some(0), data)
    }

    /// Check the sub-tree rooted at `id` before writing anything
    fn validate(&self, id: NodeId, has_data: bool) -> Result<()> {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self.doc.nodes[current.0];
            if let NodeKind::Element { name, .. } = &node.kind {
                if is_void_element(name) {
                    if !node.children.is_empty() {
                        return Err(Error::structure_owned(format!(
                            "<{}> is a void element and cannot have children",
                            name
                        )));
                    }
                } else if !node.closed {
                    return Err(Error::invalid_state_owned(format!(
                        "<{}> was never closed",
                        name
                    )));
                }
            }
            if !has_data && node.has_binding() {
                return Err(Error::missing_binding_owned(format!(
                    "{} holds a deferred value but no data object was supplied",
                    describe(node)
                )));
            }
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(())
    }

    /// Write the node at `id`
    ///
    /// `depth` is `None` inside whitespace-preserving elements, where nodes are
    /// written without indentation or line breaks.
    fn render_node<W: Write>(
        &self,
        out: &mut W,
        id: NodeId,
        depth: Option<usize>,
        data: Option<&T>,
    ) -> Result<()> {
        let node = &self.doc.nodes[id.0];
        match &node.kind {
            NodeKind::Document => {
                for child in &node.children {
                    self.render_node(out, *child, depth, data)?;
                }
            }
            NodeKind::Element { name, .. } => {
                self.start_line(out, depth)?;
                self.before_children(out, node, data)?;
                if drops_leading_newline(name) && self.starts_with_newline(node, data)? {
                    out.write_char('\n')?;
                }
                let nested =
                    depth.filter(|_| !node.children.is_empty() && !preserves_whitespace(name));
                match nested {
                    Some(level) => {
                        self.end_line(out)?;
                        for child in &node.children {
                            self.render_node(out, *child, Some(level + 1), data)?;
                        }
                        self.start_line(out, Some(level))?;
                    }
                    None => {
                        for child in &node.children {
                            self.render_node(out, *child, None, data)?;
                        }
                    }
                }
                self.after_children(out, node)?;
                if depth.is_some() {
                    self.end_line(out)?;
                }
            }
            NodeKind::Text(content) => {
                self.leaf(out, depth, &escape_html_text(&resolve(content, data)?))?;
            }
            NodeKind::Raw(content) => {
                self.leaf(out, depth, &resolve(content, data)?)?;
            }
            NodeKind::Comment(text) => {
                self.leaf(out, depth, &format!("<!--{}-->", text))?;
            }
        }
        Ok(())
    }

    /// Write the start tag with its attributes
    pub fn before_children<W: Write>(&self, out: &mut W, node: &Node<T>, data: Option<&T>) -> Result<()> {
        let NodeKind::Element { name, attributes } = &node.kind else {
            return Ok(());
        };

        write!(out, "<{}", name)?;
        for (key, value) in attributes {
            match value {
                AttrValue::Text(text) => write!(out, " {}=\"{}\"", key, escape_html_attribute(text))?,
                AttrValue::Flag => write!(out, " {}", key)?,
                AttrValue::Bound(binding) => {
                    let data = data.ok_or_else(|| {
                        Error::missing_binding_owned(format!("attribute `{}` of <{}>", key, name))
                    })?;
                    let resolved = binding.resolve(data);
                    write!(out, " {}=\"{}\"", key, escape_html_attribute(&resolved))?;
                }
            }
        }
        out.write_char('>')?;
        Ok(())
    }

    /// Write the end tag; void elements get none
    pub fn after_children<W: Write>(&self, out: &mut W, node: &Node<T>) -> Result<()> {
        match node.name() {
            Some(name) if !is_void_element(name) => {
                write!(out, "</{}>", name)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Whether the first child of `node` is text beginning with a line break
    fn starts_with_newline(&self, node: &Node<T>, data: Option<&T>) -> Result<bool> {
        let Some(first) = node.children.first() else {
            return Ok(false);
        };
        match &self.doc.nodes[first.0].kind {
            NodeKind::Text(content) | NodeKind::Raw(content) => {
                Ok(resolve(content, data)?.starts_with('\n'))
            }
            _ => Ok(false),
        }
    }

    fn leaf<W: Write>(&self, out: &mut W, depth: Option<usize>, text: &str) -> Result<()> {
        self.start_line(out, depth)?;
        out.write_str(text)?;
        if depth.is_some() {
            self.end_line(out)?;
        }
        Ok(())
    }

    fn start_line<W: Write>(&self, out: &mut W, depth: Option<usize>) -> Result<()> {
        if let (true, Some(depth)) = (self.config.line_breaks, depth) {
            for _ in 0..depth {
                out.write_str(&self.config.indent)?;
            }
        }
        Ok(())
    }

    fn end_line<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.config.line_breaks {
            out.write_char('\n')?;
        }
        Ok(())
    }
}

fn resolve<'n, T>(content: &'n Content<T>, data: Option<&T>) -> Result<Cow<'n, str>> {
    match content {
        Content::Literal(text) => Ok(Cow::Borrowed(text)),
        Content::Bound(binding) => {
            let data = data.ok_or_else(|| Error::missing_binding_static("deferred content"))?;
            Ok(Cow::Owned(binding.resolve(data)))
        }
    }
}

/// Parsers skip a line break right after these start tags
fn drops_leading_newline(name: &str) -> bool {
    ["pre", "textarea", "listing"]
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(name))
}

fn describe<T>(node: &Node<T>) -> String {
    match &node.kind {
        NodeKind::Element { name, .. } => format!("<{}>", name),
        NodeKind::Raw(_) => "a raw node".to_string(),
        _ => "a text node".to_string(),
    }
}
