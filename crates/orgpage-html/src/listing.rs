//! Index, tag and category pages.
use color_eyre::eyre::Result;
use indexmap::IndexMap;
use orgpage_config::SiteConfig;
use orgpage_parser::DocumentDate;
use serde::Serialize;

use crate::{
  context::{DocumentContext, SiteContext},
  template::render_template,
};

/// What listings and the feed need to know about a rendered post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
  pub title:       String,
  pub uri:         String,
  pub description: String,
  pub date_html:   String,
  pub date_rss:    String,
  pub date:        Option<DocumentDate>,
}

impl PostSummary {
  #[must_use]
  pub fn new(context: &DocumentContext, date: Option<DocumentDate>) -> Self {
    Self {
      title: context.title.clone(),
      uri: context.uri.clone(),
      description: context.description.clone(),
      date_html: context.date_html.clone(),
      date_rss: context.date_rss.clone(),
      date,
    }
  }

  /// Preview block used on listing pages.
  #[must_use]
  pub fn preview_html(&self) -> String {
    let mut lines = vec![
      r#"<article class="post-preview">"#.to_string(),
      format!(r#"    <h2><a href="{}">{}</a></h2>"#, self.uri, self.title),
    ];
    if !self.date_html.is_empty() {
      lines.push(format!("    {}", self.date_html));
    }
    if !self.description.is_empty() {
      lines.push(format!("    <p>{}</p>", self.description));
    }
    lines.push("</article>".to_string());
    lines.join("\n")
  }
}

/// Dated posts only, newest first.
///
/// Posts sharing a timestamp keep their relative order.
#[must_use]
pub fn newest_first(posts: &[PostSummary]) -> Vec<&PostSummary> {
  let mut dated: Vec<&PostSummary> =
    posts.iter().filter(|post| post.date.is_some()).collect();
  dated.sort_by(|a, b| {
    let a = a.date.map(|d| d.datetime());
    let b = b.date.map(|d| d.datetime());
    b.cmp(&a)
  });
  dated
}

/// Posts grouped by tag or category name, names kept in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
  entries: IndexMap<String, Vec<PostSummary>>,
}

impl Taxonomy {
  /// File the post under every name in `names`.
  pub fn insert_all(&mut self, names: &[String], post: &PostSummary) {
    for name in names {
      self
        .entries
        .entry(name.clone())
        .or_default()
        .push(post.clone());
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[PostSummary])> {
    self
      .entries
      .iter()
      .map(|(name, posts)| (name.as_str(), posts.as_slice()))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

fn previews<'a>(posts: impl IntoIterator<Item = &'a PostSummary>) -> String {
  posts
    .into_iter()
    .map(PostSummary::preview_html)
    .collect::<Vec<_>>()
    .join("\n")
}

#[derive(Serialize)]
struct IndexData<'a> {
  #[serde(flatten)]
  site:       &'a SiteContext,
  title:      &'a str,
  posts_html: String,
}

#[derive(Serialize)]
struct TaxonomyData<'a> {
  #[serde(flatten)]
  site:       &'a SiteContext,
  title:      String,
  tag:        &'a str,
  category:   &'a str,
  posts_html: String,
}

/// Render the front page with the `index_limit` most recent dated posts.
///
/// # Errors
///
/// Returns an error if the `index.html` template fails to load or render.
pub fn render_index(
  config: &SiteConfig,
  site: &SiteContext,
  posts: &[PostSummary],
) -> Result<String> {
  let recent = newest_first(posts).into_iter().take(config.index_limit);
  render_template(config, "index.html", &IndexData {
    site,
    title: &config.title,
    posts_html: previews(recent),
  })
}

/// Render the listing of every post carrying `tag`.
///
/// # Errors
///
/// Returns an error if the `tag.html` template fails to load or render.
pub fn render_tag_page(
  config: &SiteConfig,
  site: &SiteContext,
  tag: &str,
  posts: &[PostSummary],
) -> Result<String> {
  render_template(config, "tag.html", &TaxonomyData {
    site,
    title: format!(r#"Posts tagged "{tag}""#),
    tag,
    category: "",
    posts_html: previews(posts),
  })
}

/// Render the listing of every post filed under `category`.
///
/// # Errors
///
/// Returns an error if the `category.html` template fails to load or render.
pub fn render_category_page(
  config: &SiteConfig,
  site: &SiteContext,
  category: &str,
  posts: &[PostSummary],
) -> Result<String> {
  render_template(config, "category.html", &TaxonomyData {
    site,
    title: format!(r#"Posts in category "{category}""#),
    tag: "",
    category,
    posts_html: previews(posts),
  })
}
