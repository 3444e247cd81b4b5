//! Values handed to the theme templates.
use std::path::Path;

use orgpage_config::SiteConfig;
use orgpage_parser::{DocumentDate, DocumentMetadata, ParseResult};
use serde::Serialize;

/// Site-wide fields shared by every template.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
  pub site_title:         String,
  pub site_subtitle:      String,
  pub site_subtitle_html: String,
  pub site_author:        String,
  pub site_domain:        String,
  pub site_description:   String,
  pub year:               i16,
}

impl SiteContext {
  #[must_use]
  pub fn new(config: &SiteConfig, year: i16) -> Self {
    let site_subtitle_html = if config.subtitle.is_empty() {
      String::new()
    } else {
      format!("<p>{}</p>", config.subtitle)
    };

    Self {
      site_title: config.title.clone(),
      site_subtitle: config.subtitle.clone(),
      site_subtitle_html,
      site_author: config.author.clone(),
      site_domain: config.domain.clone(),
      site_description: config.description.clone(),
      year,
    }
  }
}

/// Everything the post and page templates can refer to.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentContext {
  #[serde(flatten)]
  pub site:            SiteContext,
  pub title:           String,
  pub body:            String,
  pub toc:             String,
  pub author:          String,
  pub description:     String,
  pub keywords:        String,
  pub uri:             String,
  pub date_meta:       String,
  pub date_html:       String,
  pub date_formatted:  String,
  pub date_rss:        String,
  pub tags_html:       String,
  pub categories_html: String,
}

impl DocumentContext {
  /// Combine a parsed document with the site settings.
  ///
  /// The title falls back to the file stem of `rel_path`, the author to the
  /// site author. Site keywords follow the document's own.
  #[must_use]
  pub fn new(
    site: SiteContext,
    config: &SiteConfig,
    result: &ParseResult,
    rel_path: &Path,
    uri: String,
  ) -> Self {
    let metadata = &result.metadata;

    let title = if metadata.title.is_empty() {
      rel_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
    } else {
      metadata.title.clone()
    };

    let author = if metadata.author.is_empty() {
      config.author.clone()
    } else {
      metadata.author.clone()
    };

    let keywords = metadata
      .keywords
      .iter()
      .chain(&config.keywords)
      .map(String::as_str)
      .collect::<Vec<_>>()
      .join(", ");

    let dates = DateFields::from(metadata.date.as_ref());

    Self {
      site,
      title,
      body: result.content_html.clone(),
      toc: result.toc_html.clone(),
      author,
      description: metadata.description.clone(),
      keywords,
      uri,
      date_meta: dates.meta,
      date_html: dates.html,
      date_formatted: dates.formatted,
      date_rss: dates.rss,
      tags_html: tags_html(metadata),
      categories_html: categories_html(metadata),
    }
  }
}

/// The four renderings of a document date, all empty without one.
#[derive(Debug, Default)]
struct DateFields {
  meta:      String,
  html:      String,
  formatted: String,
  rss:       String,
}

impl From<Option<&DocumentDate>> for DateFields {
  fn from(date: Option<&DocumentDate>) -> Self {
    let Some(date) = date else {
      return Self::default();
    };

    let iso = date.to_iso8601();
    let formatted = date.to_long_date();
    Self {
      meta: format!(r#"<meta name="date" content="{iso}">"#),
      html: format!(r#"<time datetime="{iso}">{formatted}</time>"#),
      formatted,
      rss: date.to_rfc2822(),
    }
  }
}

/// Link list of the document's tags, empty when it has none.
#[must_use]
pub fn tags_html(metadata: &DocumentMetadata) -> String {
  link_list("tags", "Tags", "tag", "/tags", &metadata.tags)
}

/// Link list of the document's categories, empty when it has none.
#[must_use]
pub fn categories_html(metadata: &DocumentMetadata) -> String {
  link_list(
    "categories",
    "Categories",
    "category",
    "/categories",
    &metadata.categories,
  )
}

fn link_list(
  wrapper_class: &str,
  label: &str,
  item_class: &str,
  base: &str,
  names: &[String],
) -> String {
  if names.is_empty() {
    return String::new();
  }

  let links = names
    .iter()
    .map(|name| {
      format!(
        r#"<span class="{item_class}"><a href="{base}/{name}.html">{name}</a></span>"#
      )
    })
    .collect::<Vec<_>>()
    .join(" ");

  format!(r#"<div class="{wrapper_class}">{label}: {links}</div>"#)
}
