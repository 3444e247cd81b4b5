//! # orgpage-parser
//!
//! Converts outline-markup documents (`* Headings`, lists, pipe tables,
//! source and quote blocks, `*inline* /markup/`) into HTML fragments, and
//! extracts `#+KEY: value` header directives into a metadata record.
//!
//! ## Quick Start
//!
//! ```rust
//! use orgpage_parser::{OrgOptions, OrgProcessor};
//!
//! let processor = OrgProcessor::new(OrgOptions::default());
//! let result = processor.render(
//!   "#+TITLE: Hello\n#+DATE: <2024-01-15 Mon>\n\n* Intro\nThis is *bold* text.",
//! );
//!
//! assert_eq!(result.metadata.title, "Hello");
//! assert!(result.content_html.contains("<strong>bold</strong>"));
//! assert!(result.toc_html.contains(r##"href="#intro""##));
//! ```
//!
//! ## Pipeline
//!
//! 1. [`metadata`] reads the directives and strips them from the body.
//! 2. [`block`] walks the body line by line, calling [`inline`] for text
//!    spans and [`table`] for pipe tables, and records every heading.
//! 3. [`toc`] renders the recorded headings as a nested outline.
//!
//! Parsing never fails. Malformed directives, bad dates and unterminated
//! blocks degrade into defaults or open containers; only reading a file from
//! disk can return an error.

pub mod block;
pub mod error;
pub mod inline;
pub mod metadata;
pub mod processor;
pub mod table;
pub mod toc;
pub mod types;
pub mod utils;

pub use crate::{
  error::ParseError,
  processor::{
    OrgOptions,
    OrgOptionsBuilder,
    OrgProcessor,
    collect_org_files,
    process_org_file,
    process_with_recovery,
  },
  types::{DocumentDate, DocumentMetadata, HeadingEntry, ParseResult},
};
