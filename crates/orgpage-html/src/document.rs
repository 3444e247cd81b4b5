use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;
use orgpage_config::SiteConfig;
use orgpage_parser::ParseResult;
use orgpage_utils::{DocumentKind, classify, output_path, public_uri};

use crate::{
  context::{DocumentContext, SiteContext},
  listing::PostSummary,
  template::render_template,
};

/// A document rendered through its theme template, not yet written.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
  pub kind:        DocumentKind,
  pub output_path: PathBuf,
  pub html:        String,
  pub summary:     PostSummary,
  pub tags:        Vec<String>,
  pub categories:  Vec<String>,
}

/// Render a parsed document with the post or page template.
///
/// # Errors
///
/// Returns an error if the template cannot be loaded or rendered.
pub fn render_document(
  config: &SiteConfig,
  site: &SiteContext,
  rel_path: &Path,
  result: &ParseResult,
) -> Result<RenderedDocument> {
  let metadata = &result.metadata;
  let kind = classify(rel_path, metadata);
  let output_path = output_path(&config.output_dir, rel_path, &metadata.uri);
  let uri = public_uri(&config.output_dir, &output_path);

  let context =
    DocumentContext::new(site.clone(), config, result, rel_path, uri);
  let html = render_template(config, kind.template_name(), &context)?;

  Ok(RenderedDocument {
    kind,
    output_path,
    html,
    summary: PostSummary::new(&context, metadata.date),
    tags: metadata.tags.clone(),
    categories: metadata.categories.clone(),
  })
}
