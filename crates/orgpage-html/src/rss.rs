//! RSS 2.0 feed.
use color_eyre::eyre::Result;
use html_escape::encode_text;
use jiff::Timestamp;
use orgpage_config::SiteConfig;
use serde::Serialize;

use crate::{
  listing::{PostSummary, newest_first},
  template::render_template,
};

/// Description used for items without one.
pub const MISSING_DESCRIPTION: &str = "No description available";

#[derive(Serialize)]
struct FeedData<'a> {
  site_title:       String,
  site_description: String,
  site_domain:      &'a str,
  last_build_date:  String,
  items_xml:        String,
}

/// Serialize one post as an `<item>` element.
#[must_use]
pub fn item_xml(domain: &str, post: &PostSummary) -> String {
  let description = if post.description.is_empty() {
    MISSING_DESCRIPTION
  } else {
    post.description.as_str()
  };
  let link = format!("{domain}{}", post.uri);

  [
    "<item>".to_string(),
    format!("    <title>{}</title>", encode_text(&post.title)),
    format!("    <link>{link}</link>"),
    format!("    <description>{}</description>", encode_text(description)),
    format!("    <pubDate>{}</pubDate>", post.date_rss),
    format!("    <guid>{link}</guid>"),
    "</item>".to_string(),
  ]
  .join("\n")
}

/// Render the feed with the `rss_limit` most recent dated posts.
///
/// `built` becomes the channel's `lastBuildDate`.
///
/// # Errors
///
/// Returns an error if the `rss.xml` template fails to load or render.
pub fn render_rss(
  config: &SiteConfig,
  posts: &[PostSummary],
  built: Timestamp,
) -> Result<String> {
  let items_xml = newest_first(posts)
    .into_iter()
    .take(config.rss_limit)
    .map(|post| item_xml(&config.domain, post))
    .collect::<Vec<_>>()
    .join("\n");

  render_template(config, "rss.xml", &FeedData {
    site_title: encode_text(&config.title).into_owned(),
    site_description: encode_text(&config.description).into_owned(),
    site_domain: &config.domain,
    last_build_date: built.strftime("%a, %d %b %Y %H:%M:%S +0000").to_string(),
    items_xml,
  })
}
