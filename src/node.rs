//! Document tree nodes
//!
//! Nodes live in an arena owned by [`Document`](crate::Document) and refer to
//! each other through [`NodeId`] indices. The parent link is an index as well,
//! so ownership of the tree stays with the arena and no reference cycles exist.

use indexmap::IndexMap;

use crate::binding::Binding;

/// Index of a node inside its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the document arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Attribute value: literal, bare boolean flag, or deferred
#[derive(Debug)]
pub enum AttrValue<T> {
    Text(String),
    Flag,
    Bound(Binding<T>),
}

impl<T> AttrValue<T> {
    pub fn is_bound(&self) -> bool {
        matches!(self, AttrValue::Bound(_))
    }
}

/// Leaf content: literal or deferred
#[derive(Debug)]
pub enum Content<T> {
    Literal(String),
    Bound(Binding<T>),
}

impl<T> Content<T> {
    pub fn is_bound(&self) -> bool {
        matches!(self, Content::Bound(_))
    }
}

#[derive(Debug)]
pub enum NodeKind<T> {
    /// Pseudo-root holding the document's root element
    Document,
    Element {
        name: String,
        attributes: IndexMap<String, AttrValue<T>>,
    },
    /// Text, escaped when rendered
    Text(Content<T>),
    /// Markup written verbatim
    Raw(Content<T>),
    Comment(String),
}

/// One entry of the document tree
#[derive(Debug)]
pub struct Node<T> {
    pub(crate) kind: NodeKind<T>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) closed: bool,
}

impl<T> Node<T> {
    pub(crate) fn new(kind: NodeKind<T>, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            closed: false,
        }
    }

    pub fn kind(&self) -> &NodeKind<T> {
        &self.kind
    }

    /// Tag name for elements, `None` for every other kind
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Attributes in insertion order; empty for non-elements
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttrValue<T>)> {
        let attributes = match &self.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        };
        attributes
            .into_iter()
            .flat_map(|map| map.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Literal value of attribute `name`, if set to a literal
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attributes, .. } => match attributes.get(name)? {
                AttrValue::Text(value) => Some(value),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether the element was finalized by the caller
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// Whether this node can hold children at all
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Document | NodeKind::Element { .. })
    }

    /// Whether this node itself carries a deferred value
    pub fn has_binding(&self) -> bool {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes.values().any(AttrValue::is_bound),
            NodeKind::Text(content) | NodeKind::Raw(content) => content.is_bound(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str) -> Node<()> {
        Node::new(
            NodeKind::Element {
                name: name.to_string(),
                attributes: IndexMap::new(),
            },
            None,
        )
    }

    #[test]
    fn test_element_accessors() {
        let mut node = element("div");
        if let NodeKind::Element { attributes, .. } = &mut node.kind {
            attributes.insert("id".to_string(), AttrValue::Text("main".to_string()));
            attributes.insert("hidden".to_string(), AttrValue::Flag);
        }

        assert_eq!(node.name(), Some("div"));
        assert_eq!(node.attribute("id"), Some("main"));
        assert_eq!(node.attribute("hidden"), None);
        let names: Vec<&str> = node.attributes().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["id", "hidden"]);
        assert!(node.is_container());
        assert!(!node.has_binding());
    }

    #[test]
    fn test_leaf_accessors() {
        let text: Node<()> = Node::new(NodeKind::Text(Content::Literal("hi".into())), None);
        assert_eq!(text.name(), None);
        assert_eq!(text.attributes().count(), 0);
        assert!(!text.is_container());

        let bound: Node<u32> = Node::new(
            NodeKind::Raw(Content::Bound(Binding::new(|n: &u32| *n))),
            Some(NodeId(0)),
        );
        assert!(bound.has_binding());
        assert_eq!(bound.parent(), Some(NodeId(0)));
    }

    #[test]
    fn test_bound_attribute_detected() {
        let mut node: Node<String> = Node::new(
            NodeKind::Element {
                name: "a".to_string(),
                attributes: IndexMap::new(),
            },
            None,
        );
        if let NodeKind::Element { attributes, .. } = &mut node.kind {
            attributes.insert(
                "href".to_string(),
                AttrValue::Bound(Binding::new(|s: &String| s.clone())),
            );
        }
        assert!(node.has_binding());
    }
}
