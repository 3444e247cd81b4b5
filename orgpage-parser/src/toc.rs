//! Table of contents rendering.
use crate::{types::HeadingEntry, utils::escape_html};

/// Heading shown above the outline unless configured otherwise.
pub const DEFAULT_TOC_TITLE: &str = "Table of Contents";

/// Render a nested outline of `entries` under a `<h2>` with `title`.
///
/// One `<ul>` is opened per level of depth, so a document whose first
/// heading is at level 2 starts with two nested lists. Returns an empty
/// string when there are no entries.
///
/// # Examples
///
/// ```
/// use orgpage_parser::{toc::render_toc, types::HeadingEntry};
///
/// let toc = render_toc(&[HeadingEntry::new(1, "Intro")], "Contents");
/// assert!(toc.contains(r##"<li><a href="#intro">Intro</a></li>"##));
/// assert!(render_toc(&[], "Contents").is_empty());
/// ```
#[must_use]
pub fn render_toc(entries: &[HeadingEntry], title: &str) -> String {
  if entries.is_empty() {
    return String::new();
  }

  let mut html = vec![
    r#"<div id="table-of-contents">"#.to_string(),
    format!("<h2>{}</h2>", escape_html(title)),
    r#"<div id="text-table-of-contents">"#.to_string(),
  ];

  let mut depth = 0;
  for entry in entries {
    while depth < entry.level {
      html.push("<ul>".to_string());
      depth += 1;
    }
    while depth > entry.level {
      html.push("</ul>".to_string());
      depth -= 1;
    }
    html.push(format!(
      r##"<li><a href="#{}">{}</a></li>"##,
      entry.anchor,
      escape_html(&entry.title)
    ));
  }

  html.extend(std::iter::repeat_n("</ul>".to_string(), depth));
  html.push("</div>".to_string());
  html.push("</div>".to_string());

  html.join("\n")
}
