//! Default configuration file contents for `orgpage init`.
use std::fmt;

/// Error returned when a configuration template is requested in a format that
/// has none.
#[derive(Debug, PartialEq, Eq)]
pub enum TemplateError {
  /// Holds the rejected format name.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format} (expected toml or json)")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default site configuration in TOML, with a comment for every field.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# orgpage site configuration

# Directory containing the .org sources
input_dir = "content"

# Directory the generated site is written to
output_dir = "public"

# Site identity
title = "My Site"
subtitle = ""
author = ""
email = ""
description = ""
keywords = []

# Base URL used for absolute links in the RSS feed
domain = "https://example.com"

# Theme lookup: <input_dir>/<theme_dir>/<theme>/
# Templates missing from the theme fall back to the built-in ones.
theme = "default"
theme_dir = "themes"

# Copied verbatim to <output_dir>/<static_dir>
static_dir = "static"

# Number of threads used to parse documents (defaults to the number of CPUs)
# jobs = 4

# Posts shown on the index page and in the feed
index_limit = 10
rss_limit = 20

# Render a table of contents for every document
generate_toc = true

# Write rss.xml
generate_rss = true
"#;

/// Default site configuration in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "input_dir": "content",
  "output_dir": "public",
  "title": "My Site",
  "subtitle": "",
  "author": "",
  "email": "",
  "description": "",
  "keywords": [],
  "domain": "https://example.com",
  "theme": "default",
  "theme_dir": "themes",
  "static_dir": "static",
  "index_limit": 10,
  "rss_limit": 20,
  "generate_toc": true,
  "generate_rss": true
}
"#;

/// Get the configuration template for `format` (`toml` or `json`, any case).
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;
  use crate::SiteConfig;

  #[test]
  fn test_get_template_formats() {
    assert_eq!(get_template("toml").unwrap(), DEFAULT_TOML_TEMPLATE);
    assert_eq!(get_template("JSON").unwrap(), DEFAULT_JSON_TEMPLATE);
    assert_eq!(
      get_template("yaml"),
      Err(TemplateError::UnsupportedFormat("yaml".to_string()))
    );
  }

  #[test]
  fn test_templates_parse_into_config() {
    let from_toml: SiteConfig = toml::from_str(DEFAULT_TOML_TEMPLATE).unwrap();
    let from_json: SiteConfig =
      serde_json::from_str(DEFAULT_JSON_TEMPLATE).unwrap();

    assert_eq!(from_toml.title, "My Site");
    assert_eq!(from_toml.index_limit, 10);
    assert_eq!(from_toml, from_json);
  }
}
