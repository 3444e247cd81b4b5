//! Where rendered documents go and how they are linked.
use std::path::{Component, Path, PathBuf};

use orgpage_parser::DocumentMetadata;

/// Whether a document is rendered as a dated post or a standalone page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
  Post,
  Page,
}

impl DocumentKind {
  /// Name of the template used to render this kind of document.
  #[must_use]
  pub const fn template_name(self) -> &'static str {
    match self {
      Self::Post => "post.html",
      Self::Page => "page.html",
    }
  }

  #[must_use]
  pub const fn is_post(self) -> bool {
    matches!(self, Self::Post)
  }
}

/// Decide whether the document at `rel_path` is a post.
///
/// A path mentioning `blog` or `post` in any case makes a post, as does a
/// `#+DATE:` directive. Everything else is a page.
#[must_use]
pub fn classify(rel_path: &Path, metadata: &DocumentMetadata) -> DocumentKind {
  let lowered = rel_path.to_string_lossy().to_lowercase();
  if lowered.contains("blog")
    || lowered.contains("post")
    || metadata.date.is_some()
  {
    DocumentKind::Post
  } else {
    DocumentKind::Page
  }
}

/// Compute the file a document is written to.
///
/// A non-empty `uri` is placed under `output_dir` with its leading slashes
/// removed, and gets `index.html` appended when it has no extension.
/// Without a URI the source path loses its extension and becomes a
/// directory holding `index.html`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use orgpage_utils::output_path;
///
/// let out = Path::new("public");
/// assert_eq!(
///   output_path(out, Path::new("blog/first.org"), ""),
///   Path::new("public/blog/first/index.html")
/// );
/// assert_eq!(
///   output_path(out, Path::new("about.org"), "/about"),
///   Path::new("public/about/index.html")
/// );
/// assert_eq!(
///   output_path(out, Path::new("x.org"), "/feed/page.html"),
///   Path::new("public/feed/page.html")
/// );
/// ```
#[must_use]
pub fn output_path(output_dir: &Path, rel_path: &Path, uri: &str) -> PathBuf {
  if uri.is_empty() {
    return output_dir
      .join(rel_path.with_extension(""))
      .join("index.html");
  }

  let target = output_dir.join(uri.trim_start_matches('/'));
  if target.extension().is_none() {
    target.join("index.html")
  } else {
    target
  }
}

/// Site-absolute URI of a written file, always `/`-separated.
///
/// Falls back to the full path when `path` is not inside `output_dir`.
#[must_use]
pub fn public_uri(output_dir: &Path, path: &Path) -> String {
  let relative = path.strip_prefix(output_dir).unwrap_or(path);
  let parts: Vec<String> = relative
    .components()
    .filter_map(|component| {
      match component {
        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
        _ => None,
      }
    })
    .collect();
  format!("/{}", parts.join("/"))
}
