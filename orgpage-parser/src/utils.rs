//! Shared helpers for the outline-markup core.
use std::sync::LazyLock;

use regex::Regex;

/// Characters that are dropped from a heading title before it becomes an
/// anchor.
static SLUG_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[^\w\s-]").unwrap_or_else(|e| {
    log::error!("Failed to compile SLUG_STRIP_RE regex: {e}");
    never_matching_regex()
  })
});

/// Runs of hyphens and whitespace, collapsed into a single hyphen.
static SLUG_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[-\s]+").unwrap_or_else(|e| {
    log::error!("Failed to compile SLUG_SEPARATOR_RE regex: {e}");
    never_matching_regex()
  })
});

/// Slugify a heading title for use as an anchor ID.
///
/// Drops every character that is not a word character, whitespace or a
/// hyphen, trims, lowercases and finally collapses runs of hyphens and
/// whitespace into a single hyphen. Two titles may produce the same slug;
/// callers do not deduplicate.
///
/// # Examples
///
/// ```
/// use orgpage_parser::utils::slugify;
///
/// assert_eq!(slugify("Getting Started!"), "getting-started");
/// assert_eq!(slugify("  What's  new -- 2024 "), "whats-new-2024");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
  let stripped = SLUG_STRIP_RE.replace_all(text, "");
  let lowered = stripped.trim().to_lowercase();
  SLUG_SEPARATOR_RE.replace_all(&lowered, "-").into_owned()
}

/// Escape text for inclusion in HTML element content.
#[must_use]
pub fn escape_html(text: &str) -> String {
  html_escape::encode_text(text).into_owned()
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile, so that a
/// broken pattern degrades into "no match" instead of a panic.
#[must_use]
pub fn never_matching_regex() -> Regex {
  #[allow(
    clippy::expect_used,
    reason = "This pattern is guaranteed to be valid"
  )]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}
