//! Fluent HTML document builder and markup-to-builder source generator
//!
//! Documents are built with chained calls, one method per tag, and rendered to
//! HTML text. Content and attribute values can be deferred: they are resolved
//! against a data object at render time, so one document renders many times
//! for different data.
//!
//! The [`Flowifier`] goes the other way: it walks parsed markup and writes the
//! Rust source of a function that builds the same document.
//!
//! # Examples
//!
//! ```rust
//! use html_flow::prelude::*;
//!
//! struct Article {
//!     title: String,
//! }
//!
//! let mut doc: Document<Article> = Document::new();
//! doc.html()
//!     .attr_lang("en")
//!     .body()
//!         .h1().text_with(|a: &Article| a.title.clone()).close()
//!     .close()
//! .close();
//!
//! let html = doc.render_with(&Article { title: "Fish & Chips".into() }).unwrap();
//! assert!(html.contains("Fish &amp; Chips"));
//! ```
//!
//! ```rust
//! use html_flow::Flowifier;
//!
//! let source = Flowifier::new().flowify_html("<ul><li>one</li></ul>");
//! assert!(source.contains(".ul()"));
//! assert!(source.contains(".li()"));
//! ```

pub mod attributes;
pub mod binding;
pub mod builder;
pub mod catalog;
pub mod error;
pub mod flowifier;
pub mod node;
pub mod node_ext;
pub mod renderer;
pub mod types;
pub mod utils;
pub mod value;

pub mod test_utils;

// Re-export commonly used types
pub use attributes::{resolve_attribute, AttributeCall};
pub use binding::{Binding, IntoBinding};
pub use builder::{Document, Element, Void};
pub use catalog::{ContentEditable, Dir, Draggable, EnumAttribute, Rel, Spellcheck, Translate, TypeContent};
pub use error::{Error, Result};
pub use flowifier::{FlowContext, FlowStats, Flowifier, MarkupKind, MarkupNode};
pub use node::{NodeId, NodeKind};
pub use renderer::Renderer;
pub use types::{FlowifyConfig, RenderConfig, DEFAULT_PREAMBLE};
pub use value::{RenderValue, SerializedValue};

/// Everything generated builder source needs
pub mod prelude {
    pub use crate::binding::Binding;
    pub use crate::builder::{Document, Element, Void};
    pub use crate::catalog::{
        ContentEditable, Dir, Draggable, EnumAttribute, Rel, Spellcheck, Translate, TypeContent,
    };
    pub use crate::value::RenderValue;
}

#[cfg(feature = "derive")]
pub use html_flow_macros::Renderable;
