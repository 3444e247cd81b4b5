//! Rendering of parsed documents, listings and the feed through the theme
//! templates.
pub mod context;
pub mod document;
pub mod listing;
pub mod rss;
pub mod template;

pub use context::{DocumentContext, SiteContext};
pub use document::{RenderedDocument, render_document};
pub use listing::{
  PostSummary,
  Taxonomy,
  render_category_page,
  render_index,
  render_tag_page,
};
pub use rss::render_rss;
