//! Site build: parse every document, render it, then write listings, the
//! feed and static assets.
use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use log::{debug, error, info, warn};
use orgpage_config::SiteConfig;
use orgpage_html::{
  PostSummary,
  RenderedDocument,
  SiteContext,
  Taxonomy,
  render_category_page,
  render_document,
  render_index,
  render_rss,
  render_tag_page,
};
use orgpage_parser::{
  OrgOptionsBuilder,
  OrgProcessor,
  ParseError,
  ParseResult,
  collect_org_files,
  process_org_file,
};
use orgpage_utils::copy_assets;
use rayon::prelude::*;

/// Counts reported at the end of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
  pub posts:   usize,
  pub pages:   usize,
  pub skipped: usize,
}

/// Everything gathered while writing individual documents.
#[derive(Debug, Default)]
struct Collected {
  posts:      Vec<PostSummary>,
  pages:      usize,
  skipped:    usize,
  tags:       Taxonomy,
  categories: Taxonomy,
}

impl Collected {
  fn add(&mut self, doc: RenderedDocument) {
    if doc.kind.is_post() {
      self.tags.insert_all(&doc.tags, &doc.summary);
      self.categories.insert_all(&doc.categories, &doc.summary);
      self.posts.push(doc.summary);
    } else {
      self.pages += 1;
    }
  }
}

/// Build the whole site described by `config`.
///
/// Documents are parsed in parallel; rendering and writing happen in sorted
/// input order. A document that cannot be read or rendered is logged and
/// skipped.
///
/// # Errors
///
/// Returns an error if the input directory is invalid, the thread pool cannot
/// be created, or a listing page, the feed or an asset cannot be written.
pub fn build_site(config: &SiteConfig) -> Result<BuildSummary> {
  config
    .validate_paths()
    .wrap_err("Invalid site configuration")?;
  let Some(input_dir) = config.input_dir.as_deref() else {
    bail!("An input directory must be provided");
  };

  info!("Building site from {}", input_dir.display());
  fs::create_dir_all(&config.output_dir).wrap_err_with(|| {
    format!(
      "Failed to create output directory {}",
      config.output_dir.display()
    )
  })?;

  let files = collect_org_files(input_dir);
  debug!("Found {} org files", files.len());

  let processor = OrgProcessor::new(
    OrgOptionsBuilder::new()
      .generate_toc(config.generate_toc)
      .build(),
  );
  let parsed = parse_all(&processor, &files, config.jobs)?;

  let site = SiteContext::new(config, jiff::Zoned::now().year());
  let mut collected = Collected::default();

  for (path, result) in parsed {
    let result = match result {
      Ok(result) => result,
      Err(e) => {
        error!("Error processing {}: {e}", path.display());
        collected.skipped += 1;
        continue;
      },
    };

    let rel_path = path.strip_prefix(input_dir).unwrap_or(&path);
    match write_document(config, &site, rel_path, &result) {
      Ok(doc) => collected.add(doc),
      Err(e) => {
        error!("Error processing {}: {e:#}", path.display());
        collected.skipped += 1;
      },
    }
  }

  write_listings(config, &site, &collected)?;

  if config.generate_rss {
    let rss = render_rss(config, &collected.posts, jiff::Timestamp::now())?;
    write_output(&config.output_dir.join("rss.xml"), &rss)?;
  }

  copy_assets(config).wrap_err("Failed to copy static files")?;

  let summary = BuildSummary {
    posts:   collected.posts.len(),
    pages:   collected.pages,
    skipped: collected.skipped,
  };
  info!(
    "Converted {} posts and {} pages",
    summary.posts, summary.pages
  );
  Ok(summary)
}

/// Parse every file on a dedicated pool of `jobs` threads, keeping the input
/// order.
fn parse_all(
  processor: &OrgProcessor,
  files: &[PathBuf],
  jobs: Option<usize>,
) -> Result<Vec<(PathBuf, Result<ParseResult, ParseError>)>> {
  let thread_count = jobs.unwrap_or_else(num_cpus::get);
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build()
    .wrap_err("Failed to create thread pool")?;

  Ok(pool.install(|| {
    files
      .par_iter()
      .map(|path| (path.clone(), process_org_file(processor, path)))
      .collect()
  }))
}

fn write_document(
  config: &SiteConfig,
  site: &SiteContext,
  rel_path: &Path,
  result: &ParseResult,
) -> Result<RenderedDocument> {
  let doc = render_document(config, site, rel_path, result)?;
  write_output(&doc.output_path, &doc.html)?;
  debug!("Wrote {}", doc.output_path.display());
  Ok(doc)
}

fn write_listings(
  config: &SiteConfig,
  site: &SiteContext,
  collected: &Collected,
) -> Result<()> {
  let index = render_index(config, site, &collected.posts)?;
  write_output(&config.output_dir.join("index.html"), &index)?;

  let tags_dir = config.output_dir.join("tags");
  for (tag, posts) in collected.tags.iter() {
    if !is_file_name_safe(tag) {
      warn!("Skipping tag page for unsafe tag name '{tag}'");
      continue;
    }
    let html = render_tag_page(config, site, tag, posts)?;
    write_output(&tags_dir.join(format!("{tag}.html")), &html)?;
  }

  let categories_dir = config.output_dir.join("categories");
  for (category, posts) in collected.categories.iter() {
    if !is_file_name_safe(category) {
      warn!("Skipping category page for unsafe category name '{category}'");
      continue;
    }
    let html = render_category_page(config, site, category, posts)?;
    write_output(&categories_dir.join(format!("{category}.html")), &html)?;
  }

  debug!(
    "Wrote {} tag pages and {} category pages",
    collected.tags.len(),
    collected.categories.len()
  );
  Ok(())
}

/// Return true if `name` can be used as a file stem inside a listing
/// directory without escaping it.
fn is_file_name_safe(name: &str) -> bool {
  !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

/// Write `content` to `path`, creating parent directories as needed.
fn write_output(path: &Path, content: &str) -> Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory {}", parent.display())
    })?;
  }
  fs::write(path, content)
    .wrap_err_with(|| format!("Failed to write {}", path.display()))
}
