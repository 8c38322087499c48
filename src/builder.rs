//! Fluent document construction
//!
//! A [`Document`] owns the node arena. Building happens through short-lived
//! handles that borrow the document mutably:
//!
//! - [`Element`] points at a container (an element or the document pseudo-root).
//!   Appending a container child moves the handle into the child; appending a
//!   leaf keeps it where it is; [`Element::close`] finalizes the element and
//!   moves back to its parent.
//! - [`Void`] points at a freshly appended void element (`br`, `img`, ...).
//!   Attribute calls apply to the void element; every other call applies to its
//!   parent, since a void element can have no children and has no closing tag.
//!
//! Misuse (appending to a closed element, appending under a void element, a
//! second root element) does not panic and does not break the chain. The first
//! such error is recorded on the document and returned by every later render.
//!
//! ```rust
//! use html_flow::{Dir, Document};
//!
//! let mut doc: Document<()> = Document::new();
//! doc.html()
//!     .attr_lang("en")
//!     .head()
//!         .title().text("Hello").close()
//!     .close()
//!     .body()
//!         .attr_dir(Dir::Ltr)
//!         .img().attr_src("logo.png").attr_alt("logo")
//!         .p().text("Welcome").close()
//!     .close()
//! .close();
//!
//! let html = doc.render().unwrap();
//! assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
//! assert!(html.contains("<img src=\"logo.png\" alt=\"logo\">"));
//! ```

use indexmap::IndexMap;

use crate::binding::IntoBinding;
use crate::catalog::{self, ContentEditable, Dir, Draggable, EnumAttribute, Rel, Spellcheck, Translate, TypeContent};
use crate::error::{Error, Result};
use crate::node::{AttrValue, Content, Node, NodeId, NodeKind};
use crate::renderer::Renderer;
use crate::types::RenderConfig;
use crate::utils::{is_attribute_name, is_comment_text, is_element_name};

const ROOT: NodeId = NodeId(0);

/// An HTML document tree, rendered against data objects of type `T`
///
/// The tree is built once and may be rendered any number of times, each time
/// with a different data object. Rendering only needs `&self`, so a finished
/// document can be shared between threads.
#[derive(Debug)]
pub struct Document<T = ()> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) config: RenderConfig,
    build_error: Option<Error>,
}

impl<T> Default for Document<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Document<T> {
    /// Create an empty document with the default render configuration
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create an empty document with a custom render configuration
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, None)],
            config,
            build_error: None,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replace the render configuration
    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    /// Handle positioned at the document pseudo-root
    pub fn root(&mut self) -> Element<'_, T> {
        Element { doc: self, id: ROOT }
    }

    /// Append the `<html>` root element and move into it
    pub fn html(&mut self) -> Element<'_, T> {
        self.root().html()
    }

    /// Handle positioned at an existing node
    ///
    /// Appending to a node that was already closed is a structural error.
    pub fn open(&mut self, id: NodeId) -> Element<'_, T> {
        if id.0 >= self.nodes.len() {
            self.record(Error::structure_owned(format!(
                "node {} does not belong to this document",
                id.0
            )));
            return self.root();
        }
        Element { doc: self, id }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Id of the document pseudo-root
    pub fn root_id(&self) -> NodeId {
        ROOT
    }

    /// Id of the root element, once one was appended
    pub fn root_element(&self) -> Option<NodeId> {
        self.nodes[ROOT.0]
            .children
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].is_element())
    }

    /// Number of nodes, the document pseudo-root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether any node carries a deferred value
    pub fn has_bindings(&self) -> bool {
        self.nodes.iter().any(Node::has_binding)
    }

    /// The first structural error recorded while building, if any
    pub fn check(&self) -> Result<()> {
        match &self.build_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Render the whole document without a data object
    ///
    /// Fails with [`Error::MissingBinding`] if the tree holds deferred values.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.render_to(&mut out, None)?;
        Ok(out)
    }

    /// Render the whole document, resolving deferred values against `data`
    pub fn render_with(&self, data: &T) -> Result<String> {
        let mut out = String::new();
        self.render_to(&mut out, Some(data))?;
        Ok(out)
    }

    /// Render the whole document into `out`
    pub fn render_to<W: std::fmt::Write>(&self, out: &mut W, data: Option<&T>) -> Result<()> {
        self.check()?;
        Renderer::new(self).render_document(out, data)
    }

    /// Render the sub-tree rooted at `id`, without the document preamble
    pub fn render_node(&self, id: NodeId, data: Option<&T>) -> Result<String> {
        self.check()?;
        let mut out = String::new();
        Renderer::new(self).render_subtree(&mut out, id, data)?;
        Ok(out)
    }

    /// Render the document once per data object
    pub fn render_batch(&self, items: &[&T]) -> Result<Vec<String>> {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            results.push(self.render_with(item)?);
        }
        Ok(results)
    }

    fn record(&mut self, err: Error) {
        log::warn!(target: "html_flow::builder", "{}", err);
        if self.build_error.is_none() {
            self.build_error = Some(err);
        }
    }

    fn describe(&self, id: NodeId) -> String {
        match &self.nodes[id.0].kind {
            NodeKind::Document => "the document".to_string(),
            NodeKind::Element { name, .. } => format!("<{}>", name),
            NodeKind::Text(_) => "a text node".to_string(),
            NodeKind::Raw(_) => "a raw node".to_string(),
            NodeKind::Comment(_) => "a comment".to_string(),
        }
    }

    fn check_append(&self, parent: NodeId, kind: &NodeKind<T>) -> Result<()> {
        match kind {
            NodeKind::Element { name, .. } if !is_element_name(name) => {
                return Err(Error::structure_owned(format!(
                    "`{}` is not a valid element name",
                    name.escape_debug()
                )));
            }
            NodeKind::Comment(text) if !is_comment_text(text) => {
                return Err(Error::structure_owned(format!(
                    "comment text `{}` would end the comment early",
                    text.escape_debug()
                )));
            }
            _ => {}
        }

        let node = &self.nodes[parent.0];
        match &node.kind {
            NodeKind::Document => match kind {
                NodeKind::Element { .. } if self.root_element().is_some() => Err(
                    Error::structure_static("the document already has a root element"),
                ),
                NodeKind::Text(_) | NodeKind::Raw(_) => Err(Error::structure_static(
                    "content must be placed inside the root element",
                )),
                _ => Ok(()),
            },
            NodeKind::Element { name, .. } => {
                if node.closed {
                    Err(Error::structure_owned(format!(
                        "<{}> is already closed and cannot take more children",
                        name
                    )))
                } else if catalog::is_void_element(name) {
                    Err(Error::structure_owned(format!(
                        "<{}> is a void element and cannot have children",
                        name
                    )))
                } else {
                    Ok(())
                }
            }
            _ => Err(Error::structure_owned(format!(
                "cannot append children to {}",
                self.describe(parent)
            ))),
        }
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind<T>) -> Option<NodeId> {
        if let Err(err) = self.check_append(parent, &kind) {
            self.record(err);
            return None;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, Some(parent)));
        self.nodes[parent.0].children.push(id);
        Some(id)
    }

    fn set_attribute(&mut self, target: NodeId, name: String, value: Option<AttrValue<T>>) {
        if !is_attribute_name(&name) {
            self.record(Error::structure_owned(format!(
                "`{}` is not a valid attribute name",
                name.escape_debug()
            )));
            return;
        }

        let node = &self.nodes[target.0];
        if !node.is_element() || node.closed {
            let err = Error::structure_owned(format!(
                "cannot set attribute `{}` on {}{}",
                name,
                self.describe(target),
                if node.closed { " after it was closed" } else { "" }
            ));
            self.record(err);
            return;
        }

        if let NodeKind::Element { attributes, .. } = &mut self.nodes[target.0].kind {
            match value {
                Some(value) => {
                    attributes.insert(name, value);
                }
                None => {
                    attributes.shift_remove(&name);
                }
            }
        }
    }

    /// Finalize `id` and return the node the caller moves back to
    fn finalize(&mut self, id: NodeId) -> NodeId {
        let node = &mut self.nodes[id.0];
        match node.parent {
            Some(parent) => {
                node.closed = true;
                parent
            }
            None => {
                log::debug!(target: "html_flow::builder", "close() on the document root is a no-op");
                id
            }
        }
    }
}

/// Fluent handle positioned at a container node
pub struct Element<'d, T> {
    doc: &'d mut Document<T>,
    id: NodeId,
}

impl<'d, T> Element<'d, T> {
    /// Id of the node this handle points at
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The document being built
    pub fn document(&self) -> &Document<T> {
        self.doc
    }

    /// Append an element named `name` and move into it
    ///
    /// Works for any tag, including custom elements such as `my-widget`.
    pub fn element<S: Into<String>>(self, name: S) -> Element<'d, T> {
        let kind = NodeKind::Element {
            name: name.into(),
            attributes: IndexMap::new(),
        };
        match self.doc.append(self.id, kind) {
            Some(id) => Element { doc: self.doc, id },
            None => self,
        }
    }

    pub(crate) fn void_element(self, name: &str) -> Void<'d, T> {
        let kind = NodeKind::Element {
            name: name.to_string(),
            attributes: IndexMap::new(),
        };
        let id = self.doc.append(self.id, kind);
        Void {
            doc: self.doc,
            id,
            parent: self.id,
        }
    }

    /// Set attribute `name` to a literal value; a second call overwrites
    pub fn attr<N: Into<String>, V: Into<String>>(self, name: N, value: V) -> Self {
        self.doc
            .set_attribute(self.id, name.into(), Some(AttrValue::Text(value.into())));
        self
    }

    /// Set attribute `name` to a value resolved at render time
    pub fn attr_with<N: Into<String>, B: IntoBinding<T>>(self, name: N, binding: B) -> Self {
        self.doc.set_attribute(
            self.id,
            name.into(),
            Some(AttrValue::Bound(binding.into_binding())),
        );
        self
    }

    /// Set or remove a bare boolean attribute such as `hidden`
    pub fn attr_flag<N: Into<String>>(self, name: N, enabled: bool) -> Self {
        let value = enabled.then_some(AttrValue::Flag);
        self.doc.set_attribute(self.id, name.into(), value);
        self
    }

    /// Set or remove the `async` attribute
    pub fn attr_async(self, enabled: bool) -> Self {
        self.attr_flag("async", enabled)
    }

    /// Append literal text, escaped when rendered
    pub fn text<S: Into<String>>(self, text: S) -> Self {
        self.leaf(NodeKind::Text(Content::Literal(text.into())))
    }

    /// Append text resolved at render time
    pub fn text_with<B: IntoBinding<T>>(self, binding: B) -> Self {
        self.leaf(NodeKind::Text(Content::Bound(binding.into_binding())))
    }

    /// Append markup that is written verbatim
    pub fn raw<S: Into<String>>(self, markup: S) -> Self {
        self.leaf(NodeKind::Raw(Content::Literal(markup.into())))
    }

    /// Append verbatim markup resolved at render time
    pub fn raw_with<B: IntoBinding<T>>(self, binding: B) -> Self {
        self.leaf(NodeKind::Raw(Content::Bound(binding.into_binding())))
    }

    /// Append an HTML comment
    pub fn comment<S: Into<String>>(self, text: S) -> Self {
        self.leaf(NodeKind::Comment(text.into()))
    }

    /// Append `<h{level}>text</h{level}>` and stay on the current element
    pub fn heading<S: Into<String>>(self, level: u8, text: S) -> Self {
        self.heading_node(level, Content::Literal(text.into()))
    }

    /// Append a heading whose text is resolved at render time
    pub fn heading_with<B: IntoBinding<T>>(self, level: u8, binding: B) -> Self {
        self.heading_node(level, Content::Bound(binding.into_binding()))
    }

    fn heading_node(self, level: u8, content: Content<T>) -> Self {
        if !(1..=6).contains(&level) {
            self.doc.record(Error::structure_owned(format!(
                "heading level {} is outside 1..=6",
                level
            )));
            return self;
        }
        let parent = self.id;
        let heading = self.element(format!("h{}", level));
        if heading.id == parent {
            return heading;
        }
        heading.leaf(NodeKind::Text(content)).close()
    }

    /// Finalize this element and move back to its parent
    ///
    /// On the document pseudo-root this is a no-op. Closing the root element
    /// finalizes the document and returns the pseudo-root handle.
    pub fn close(self) -> Element<'d, T> {
        let id = self.doc.finalize(self.id);
        Element { doc: self.doc, id }
    }

    fn leaf(self, kind: NodeKind<T>) -> Self {
        self.doc.append(self.id, kind);
        self
    }
}

/// Fluent handle positioned at a void element
///
/// Attribute calls apply to the void element. Everything else first moves back
/// to the parent, so a void element never needs an explicit close.
pub struct Void<'d, T> {
    doc: &'d mut Document<T>,
    id: Option<NodeId>,
    parent: NodeId,
}

impl<'d, T> Void<'d, T> {
    /// Id of the void element, `None` if appending it failed
    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    /// Finalize the void element and return its parent
    pub fn up(self) -> Element<'d, T> {
        if let Some(id) = self.id {
            self.doc.nodes[id.0].closed = true;
        }
        Element {
            doc: self.doc,
            id: self.parent,
        }
    }

    pub fn attr<N: Into<String>, V: Into<String>>(self, name: N, value: V) -> Self {
        self.set(name.into(), Some(AttrValue::Text(value.into())))
    }

    pub fn attr_with<N: Into<String>, B: IntoBinding<T>>(self, name: N, binding: B) -> Self {
        self.set(name.into(), Some(AttrValue::Bound(binding.into_binding())))
    }

    pub fn attr_flag<N: Into<String>>(self, name: N, enabled: bool) -> Self {
        self.set(name.into(), enabled.then_some(AttrValue::Flag))
    }

    pub fn attr_async(self, enabled: bool) -> Self {
        self.attr_flag("async", enabled)
    }

    pub fn element<S: Into<String>>(self, name: S) -> Element<'d, T> {
        self.up().element(name)
    }

    pub fn text<S: Into<String>>(self, text: S) -> Element<'d, T> {
        self.up().text(text)
    }

    pub fn text_with<B: IntoBinding<T>>(self, binding: B) -> Element<'d, T> {
        self.up().text_with(binding)
    }

    pub fn raw<S: Into<String>>(self, markup: S) -> Element<'d, T> {
        self.up().raw(markup)
    }

    pub fn raw_with<B: IntoBinding<T>>(self, binding: B) -> Element<'d, T> {
        self.up().raw_with(binding)
    }

    pub fn comment<S: Into<String>>(self, text: S) -> Element<'d, T> {
        self.up().comment(text)
    }

    pub fn heading<S: Into<String>>(self, level: u8, text: S) -> Element<'d, T> {
        self.up().heading(level, text)
    }

    pub fn heading_with<B: IntoBinding<T>>(self, level: u8, binding: B) -> Element<'d, T> {
        self.up().heading_with(level, binding)
    }

    /// Close the void element's parent
    pub fn close(self) -> Element<'d, T> {
        self.up().close()
    }

    fn set(self, name: String, value: Option<AttrValue<T>>) -> Self {
        if let Some(id) = self.id {
            self.doc.set_attribute(id, name, value);
        }
        self
    }
}

macro_rules! tag_methods {
    (containers: [$($container:ident),* $(,)?], voids: [$($void:ident),* $(,)?]) => {
        impl<'d, T> Element<'d, T> {
            $(
                #[doc = concat!("Append a `<", stringify!($container), ">` element and move into it")]
                pub fn $container(self) -> Element<'d, T> {
                    self.element(stringify!($container))
                }
            )*
            $(
                #[doc = concat!("Append a void `<", stringify!($void), ">` element")]
                pub fn $void(self) -> Void<'d, T> {
                    self.void_element(stringify!($void))
                }
            )*
        }

        impl<'d, T> Void<'d, T> {
            $(
                #[doc = concat!("Append a `<", stringify!($container), ">` sibling and move into it")]
                pub fn $container(self) -> Element<'d, T> {
                    self.up().$container()
                }
            )*
            $(
                #[doc = concat!("Append a void `<", stringify!($void), ">` sibling")]
                pub fn $void(self) -> Void<'d, T> {
                    self.up().$void()
                }
            )*
        }
    };
}
catalog::with_html_tags!(tag_methods);

macro_rules! named_attribute_methods {
    ($($method:ident => $name:literal),* $(,)?) => {
        impl<'d, T> Element<'d, T> {
            $(
                #[doc = concat!("Set the `", $name, "` attribute")]
                pub fn $method<V: Into<String>>(self, value: V) -> Self {
                    self.attr($name, value)
                }
            )*
        }

        impl<'d, T> Void<'d, T> {
            $(
                #[doc = concat!("Set the `", $name, "` attribute")]
                pub fn $method<V: Into<String>>(self, value: V) -> Self {
                    self.attr($name, value)
                }
            )*
        }
    };
}
catalog::with_named_attributes!(named_attribute_methods);

macro_rules! enum_attribute_methods {
    ($($method:ident($ty:ty)),* $(,)?) => {
        impl<'d, T> Element<'d, T> {
            $(
                #[doc = concat!("Set the `", stringify!($ty), "` typed attribute")]
                pub fn $method(self, value: $ty) -> Self {
                    self.attr(<$ty as EnumAttribute>::ATTRIBUTE, value.value())
                }
            )*
        }

        impl<'d, T> Void<'d, T> {
            $(
                #[doc = concat!("Set the `", stringify!($ty), "` typed attribute")]
                pub fn $method(self, value: $ty) -> Self {
                    self.attr(<$ty as EnumAttribute>::ATTRIBUTE, value.value())
                }
            )*
        }
    };
}
enum_attribute_methods!(
    attr_dir(Dir),
    attr_draggable(Draggable),
    attr_spellcheck(Spellcheck),
    attr_contenteditable(ContentEditable),
    attr_translate(Translate),
    attr_rel(Rel),
    attr_type(TypeContent),
);
