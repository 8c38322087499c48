use dom_query::{Node, NodeData};

use crate::catalog::is_raw_text_element;
use crate::flowifier::{MarkupKind, MarkupNode};

/// `dom_query` nodes as flowifier input
impl<'a> MarkupNode for Node<'a> {
    fn kind(&self) -> MarkupKind {
        let kind = self.query(|node| match &node.data {
            NodeData::Document | NodeData::Fragment => MarkupKind::Document,
            NodeData::Doctype { .. } => MarkupKind::Doctype,
            NodeData::Element(_) => MarkupKind::Element,
            NodeData::Text { .. } => MarkupKind::Text,
            NodeData::Comment { .. } => MarkupKind::Comment,
            _ => MarkupKind::Other,
        });

        match kind {
            Some(MarkupKind::Text) if inside_raw_text_element(self) => MarkupKind::Data,
            Some(kind) => kind,
            None => MarkupKind::Other,
        }
    }

    fn tag_name(&self) -> Option<String> {
        self.query(|node| {
            node.as_element()
                .map(|element| element.name.local.to_string())
        })
        .flatten()
    }

    fn attributes(&self) -> Vec<(String, String)> {
        self.query(|node| {
            node.as_element()
                .map(|element| {
                    element
                        .attrs
                        .iter()
                        .map(|attr| {
                            let name = match &attr.name.prefix {
                                Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                                None => attr.name.local.to_string(),
                            };
                            (name, attr.value.to_string())
                        })
                        .collect()
                })
                .unwrap_or_default()
        })
        .unwrap_or_default()
    }

    /// Child nodes; for `<template>` these are the nodes of its content fragment
    fn children(&self) -> Vec<Self> {
        let contents = self
            .query(|node| node.as_element().and_then(|element| element.template_contents))
            .flatten();
        match contents {
            Some(id) => Node::new(id, self.tree).children(),
            None => Node::children(self),
        }
    }

    fn whole_text(&self) -> String {
        self.query(|node| match &node.data {
            NodeData::Text { contents } => contents.to_string(),
            NodeData::Comment { contents } => contents.to_string(),
            _ => String::new(),
        })
        .unwrap_or_default()
    }
}

fn inside_raw_text_element(node: &Node<'_>) -> bool {
    node.parent()
        .and_then(|parent| parent.tag_name())
        .map_or(false, |tag| is_raw_text_element(&tag))
}
