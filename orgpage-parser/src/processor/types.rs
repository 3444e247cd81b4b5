//! Type definitions for the document processor.
//!
//! # Examples
//!
//! ```
//! use orgpage_parser::{OrgOptions, OrgProcessor};
//!
//! let options = OrgOptions {
//!   generate_toc: false,
//!   ..Default::default()
//! };
//!
//! let processor = OrgProcessor::new(options);
//! assert!(processor.render("* Heading").toc_html.is_empty());
//! ```
use crate::toc::DEFAULT_TOC_TITLE;

/// Options for configuring the document processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgOptions {
  /// Render a table of contents from the document headings.
  pub generate_toc: bool,

  /// Heading shown above the table of contents.
  pub toc_title: String,
}

impl Default for OrgOptions {
  fn default() -> Self {
    Self {
      generate_toc: true,
      toc_title:    DEFAULT_TOC_TITLE.to_string(),
    }
  }
}

/// Document processor.
///
/// Holds no per-document state, so one instance can be shared across
/// threads and reused for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct OrgProcessor {
  pub(crate) options: OrgOptions,
}

/// Builder for constructing `OrgOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct OrgOptionsBuilder {
  options: OrgOptions,
}

impl OrgOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable or disable the table of contents.
  #[must_use]
  pub const fn generate_toc(mut self, enabled: bool) -> Self {
    self.options.generate_toc = enabled;
    self
  }

  /// Set the heading shown above the table of contents.
  #[must_use]
  pub fn toc_title<S: Into<String>>(mut self, title: S) -> Self {
    self.options.toc_title = title.into();
    self
  }

  /// Build the final `OrgOptions`.
  #[must_use]
  pub fn build(self) -> OrgOptions {
    self.options
  }
}
