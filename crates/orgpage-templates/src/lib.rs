//! Default theme shipped inside the binary.
//!
//! A theme directory may override any of these files; missing ones fall back
//! to the embedded copies below.
use std::collections::HashMap;

pub const POST_TEMPLATE: &str = include_str!("../templates/post.html");
pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
pub const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
pub const TAG_TEMPLATE: &str = include_str!("../templates/tag.html");
pub const CATEGORY_TEMPLATE: &str = include_str!("../templates/category.html");
pub const RSS_TEMPLATE: &str = include_str!("../templates/rss.xml");

pub const DEFAULT_CSS: &str = include_str!("../templates/style.css");

/// Location of the stylesheet inside a theme directory.
pub const STYLESHEET_PATH: &str = "static/css/style.css";

/// Theme file names and their embedded content.
pub const TEMPLATE_FILES: &[(&str, &str)] = &[
  ("post.html", POST_TEMPLATE),
  ("page.html", PAGE_TEMPLATE),
  ("index.html", INDEX_TEMPLATE),
  ("tag.html", TAG_TEMPLATE),
  ("category.html", CATEGORY_TEMPLATE),
  ("rss.xml", RSS_TEMPLATE),
];

/// Every file of the default theme, keyed by its path inside the theme
/// directory.
#[must_use]
pub fn all_templates() -> HashMap<&'static str, &'static str> {
  let mut templates: HashMap<_, _> = TEMPLATE_FILES.iter().copied().collect();
  templates.insert(STYLESHEET_PATH, DEFAULT_CSS);
  templates
}

/// Embedded content for a template file name, if there is one.
#[must_use]
pub fn embedded_template(name: &str) -> Option<&'static str> {
  TEMPLATE_FILES
    .iter()
    .find(|(file, _)| *file == name)
    .map(|(_, content)| *content)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_all_templates_lists_theme_files() {
    let templates = all_templates();
    assert_eq!(templates.len(), TEMPLATE_FILES.len() + 1);
    assert!(templates.contains_key("rss.xml"));
    assert!(templates.contains_key(STYLESHEET_PATH));
  }

  #[test]
  fn test_embedded_template() {
    assert_eq!(embedded_template("post.html"), Some(POST_TEMPLATE));
    assert!(embedded_template("missing.html").is_none());
  }

  #[test]
  fn test_templates_reference_content_slots() {
    assert!(POST_TEMPLATE.contains("{{ body }}"));
    assert!(POST_TEMPLATE.contains("{{ tags_html }}"));
    assert!(PAGE_TEMPLATE.contains("{{ toc }}"));
    assert!(INDEX_TEMPLATE.contains("{{ posts_html }}"));
    assert!(RSS_TEMPLATE.contains("{{ items_xml }}"));
  }
}
