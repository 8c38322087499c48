//! Configuration types
//!
//! - [`RenderConfig`] - layout of rendered HTML and the document preamble
//! - [`FlowifyConfig`] - shape of the source code produced by the flowifier
//!
//! Both follow the same pattern: start from `default()` or a named preset and
//! adjust with `with_*` methods.
//!
//! ```rust
//! use html_flow::{FlowifyConfig, RenderConfig};
//!
//! let render = RenderConfig::pretty().with_indent("    ");
//! let flowify = FlowifyConfig::default()
//!     .with_function_name("landing_page")
//!     .with_skip_blank_text(true);
//! # let _ = (render, flowify);
//! ```

use std::borrow::Cow;

/// The preamble line written before a whole-document render
pub const DEFAULT_PREAMBLE: &str = "<!DOCTYPE html>";

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub(crate) preamble: Cow<'static, str>,
    pub(crate) indent: Cow<'static, str>,
    pub(crate) line_breaks: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::pretty()
    }
}

impl RenderConfig {
    /// Create a new render configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// One node per line, indented with two spaces per level
    pub fn pretty() -> Self {
        Self {
            preamble: Cow::Borrowed(DEFAULT_PREAMBLE),
            indent: Cow::Borrowed("  "),
            line_breaks: true,
        }
    }

    /// No indentation and no line breaks
    ///
    /// The preamble is still written, directly followed by the root element.
    pub fn minified() -> Self {
        Self {
            preamble: Cow::Borrowed(DEFAULT_PREAMBLE),
            indent: Cow::Borrowed(""),
            line_breaks: false,
        }
    }

    /// Set the whitespace added per depth level
    pub fn with_indent<S: Into<Cow<'static, str>>>(mut self, indent: S) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the line written before the root element of a whole-document render
    pub fn with_preamble<S: Into<Cow<'static, str>>>(mut self, preamble: S) -> Self {
        self.preamble = preamble.into();
        self
    }

    /// Enable or disable one-node-per-line output
    pub fn with_line_breaks(mut self, enabled: bool) -> Self {
        self.line_breaks = enabled;
        self
    }

    // Accessors
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn line_breaks(&self) -> bool {
        self.line_breaks
    }
}

/// Options for generated builder source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowifyConfig {
    pub(crate) function_name: Cow<'static, str>,
    pub(crate) crate_name: Cow<'static, str>,
    pub(crate) skip_blank_text: bool,
}

impl Default for FlowifyConfig {
    fn default() -> Self {
        Self {
            function_name: Cow::Borrowed("flowified"),
            crate_name: Cow::Borrowed("html_flow"),
            skip_blank_text: false,
        }
    }
}

impl FlowifyConfig {
    /// Create a new flowify configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the generated function
    pub fn with_function_name<S: Into<Cow<'static, str>>>(mut self, name: S) -> Self {
        self.function_name = name.into();
        self
    }

    /// Crate path used by the generated `use` line
    pub fn with_crate_name<S: Into<Cow<'static, str>>>(mut self, name: S) -> Self {
        self.crate_name = name.into();
        self
    }

    /// Skip text nodes that hold only whitespace
    pub fn with_skip_blank_text(mut self, enabled: bool) -> Self {
        self.skip_blank_text = enabled;
        self
    }

    // Accessors
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn crate_name(&self) -> &str {
        &self.crate_name
    }

    pub fn skip_blank_text(&self) -> bool {
        self.skip_blank_text
    }
}
