//! Core processor implementation.
use std::path::{Path, PathBuf};

use log::trace;
use walkdir::WalkDir;

use super::types::{OrgOptions, OrgProcessor};
use crate::{
  block::parse_blocks,
  metadata::{extract_metadata, strip_directives},
  toc::render_toc,
  types::ParseResult,
};

/// Extension of the documents picked up by [`collect_org_files`].
pub const ORG_EXTENSION: &str = "org";

impl OrgProcessor {
  /// Create a new processor with the given options.
  #[must_use]
  pub const fn new(options: OrgOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &OrgOptions {
    &self.options
  }

  /// Convert a document into metadata, body HTML and table of contents.
  ///
  /// Metadata is read from the full text; the body is parsed after every
  /// directive line has been removed.
  #[must_use]
  pub fn render(&self, content: &str) -> ParseResult {
    let metadata = extract_metadata(content);
    let body = strip_directives(content);
    let blocks = parse_blocks(&body);

    let toc_html = if self.options.generate_toc {
      render_toc(&blocks.headings, &self.options.toc_title)
    } else {
      String::new()
    };

    trace!(
      "Rendered document '{}' with {} headings",
      metadata.title,
      blocks.headings.len()
    );

    ParseResult {
      metadata,
      content_html: blocks.html,
      toc_html,
      headings: blocks.headings,
    }
  }
}

/// Return true if the path has a component starting with a dot.
fn is_hidden(path: &Path) -> bool {
  path.components().any(|component| {
    component
      .as_os_str()
      .to_str()
      .is_some_and(|name| name.starts_with('.') && name.len() > 1 && name != "..")
  })
}

/// Collect every `.org` file under `input_dir`, sorted by path.
///
/// Hidden files and anything inside hidden directories are skipped.
#[must_use]
pub fn collect_org_files(input_dir: &Path) -> Vec<PathBuf> {
  let mut files = Vec::with_capacity(100);

  for entry in WalkDir::new(input_dir)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
  {
    let path = entry.path();
    let relative = path.strip_prefix(input_dir).unwrap_or(path);
    if path.is_file()
      && path.extension().is_some_and(|ext| ext == ORG_EXTENSION)
      && !is_hidden(relative)
    {
      files.push(path.to_owned());
    }
  }

  files.sort();
  trace!("Found {} org files to process", files.len());
  files
}
