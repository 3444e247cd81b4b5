//! Inline markup rewriting for a single line of text.
//!
//! Each rule is an independent regex pass, applied in a fixed order. Later
//! passes see the HTML produced by earlier ones, so delimiters that end up
//! inside a generated tag (a `/` in a URL, for instance) are rewritten too.
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::never_matching_regex;

/// Pattern and replacement for every inline rule, in application order.
const INLINE_PATTERNS: &[(&str, &str, &str)] = &[
  ("bold", r"\*([^*]+)\*", "<strong>${1}</strong>"),
  ("italic", r"/([^/]+)/", "<em>${1}</em>"),
  ("underline", r"_([^_]+)_", "<u>${1}</u>"),
  ("strikethrough", r"\+([^+]+)\+", "<del>${1}</del>"),
  ("verbatim", r"=([^=]+)=", "<code>${1}</code>"),
  ("code", r"~([^~]+)~", "<code>${1}</code>"),
  (
    "labelled link",
    r"\[\[([^\]]+)\]\[([^\]]+)\]\]",
    r#"<a href="${1}">${2}</a>"#,
  ),
  ("bare link", r"\[\[([^\]]+)\]\]", r#"<a href="${1}">${1}</a>"#),
];

/// Compiled inline rules.
static INLINE_RULES: LazyLock<Vec<(Regex, &'static str)>> =
  LazyLock::new(|| {
    INLINE_PATTERNS
      .iter()
      .map(|&(name, pattern, replacement)| {
        let re = Regex::new(pattern).unwrap_or_else(|e| {
          log::error!("Failed to compile {name} inline regex: {e}");
          never_matching_regex()
        });
        (re, replacement)
      })
      .collect()
  });

/// Rewrite inline markup in `text` into HTML spans.
///
/// The text is not HTML-escaped; only the markup is replaced.
///
/// # Examples
///
/// ```
/// use orgpage_parser::inline::process_inline_markup;
///
/// assert_eq!(
///   process_inline_markup("*bold* and =code="),
///   "<strong>bold</strong> and <code>code</code>"
/// );
/// assert_eq!(
///   process_inline_markup("see [[https://example.com][the site]]"),
///   r#"see <a href="https://example.com">the site</a>"#
/// );
/// ```
#[must_use]
pub fn process_inline_markup(text: &str) -> String {
  let mut result = text.to_string();
  for (re, replacement) in INLINE_RULES.iter() {
    if re.is_match(&result) {
      result = re.replace_all(&result, *replacement).into_owned();
    }
  }
  result
}
