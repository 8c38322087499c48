//! Error handling for html-flow
//!
//! All fallible operations in this crate return [`Result<T>`], whose error type
//! is the [`Error`] enum below.
//!
//! # Error Types
//!
//! - [`Error::StructureError`] - tree shape violations recorded while building
//! - [`Error::MissingBinding`] - a deferred value was found but no data object was given
//! - [`Error::InvalidState`] - rendering a tree that was never finished
//! - [`Error::FormatError`] - the output sink refused a write during rendering
//!
//! Attribute values outside an enumerated domain and write failures inside the
//! flowifier are not errors; both are recovered from locally.
//!
//! # Usage
//!
//! ```rust
//! use html_flow::{Document, Error};
//!
//! let mut doc: Document<()> = Document::new();
//! doc.html().text("never closed");
//!
//! match doc.render() {
//!     Err(Error::InvalidState(msg)) => println!("not finished: {}", msg),
//!     Err(err) => println!("other error: {}", err),
//!     Ok(html) => println!("{}", html),
//! }
//! ```
//!
//! Messages use `Cow<'static, str>` so static messages cost no allocation.

use std::borrow::Cow;
use thiserror::Error;

/// Error type for building and rendering documents
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Tree shape violations
    ///
    /// Appending to a finalized element, appending under a void element, adding
    /// a second root element, or rendering a void element that has children.
    #[error("Structure error: {0}")]
    StructureError(Cow<'static, str>),

    /// A deferred value exists in the rendered tree but no data object was supplied
    #[error("Missing binding: {0}")]
    MissingBinding(Cow<'static, str>),

    /// The tree is not in a renderable state yet
    ///
    /// Raised when the document has no root element or when an element in the
    /// rendered tree was never closed.
    #[error("Invalid state: {0}")]
    InvalidState(Cow<'static, str>),

    /// The output sink failed while rendering
    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl Error {
    /// Create a structure error with a static string
    pub fn structure_static(msg: &'static str) -> Self {
        Error::StructureError(Cow::Borrowed(msg))
    }

    /// Create a structure error with an owned string
    ///
    /// # Examples
    ///
    /// ```rust
    /// use html_flow::Error;
    ///
    /// let err = Error::structure_owned(format!("<{}> cannot have children", "br"));
    /// assert_eq!(err.to_string(), "Structure error: <br> cannot have children");
    /// ```
    pub fn structure_owned(msg: String) -> Self {
        Error::StructureError(Cow::Owned(msg))
    }

    /// Create a missing-binding error with a static string
    pub fn missing_binding_static(msg: &'static str) -> Self {
        Error::MissingBinding(Cow::Borrowed(msg))
    }

    /// Create a missing-binding error with an owned string
    pub fn missing_binding_owned(msg: String) -> Self {
        Error::MissingBinding(Cow::Owned(msg))
    }

    /// Create an invalid-state error with a static string
    pub fn invalid_state_static(msg: &'static str) -> Self {
        Error::InvalidState(Cow::Borrowed(msg))
    }

    /// Create an invalid-state error with an owned string
    pub fn invalid_state_owned(msg: String) -> Self {
        Error::InvalidState(Cow::Owned(msg))
    }

    /// Whether this error describes a tree-shape violation
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::StructureError(_))
    }
}

/// Result type alias for html-flow operations
pub type Result<T> = std::result::Result<T, Error>;
