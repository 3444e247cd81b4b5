use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result};
use log::debug;
use orgpage_config::SiteConfig;
use orgpage_templates as templates;
use walkdir::WalkDir;

/// Output location of the stylesheet linked by the default templates.
pub const STYLESHEET_OUTPUT: &str = "css/style.css";

/// Copies the site's static files and the active theme's assets into the
/// output directory.
///
/// This includes:
/// - `<input_dir>/<static_dir>`, replacing any previous copy in the output
/// - every file under `<theme>/static`, placed relative to the output root
/// - the embedded stylesheet, when the theme did not provide one
///
/// # Errors
///
/// Returns an error if any directory cannot be created or any file cannot be
/// copied or written.
pub fn copy_assets(config: &SiteConfig) -> Result<()> {
  fs::create_dir_all(&config.output_dir).wrap_err_with(|| {
    format!(
      "Failed to create output directory {}",
      config.output_dir.display()
    )
  })?;

  if let Some(input_dir) = &config.input_dir {
    copy_static_dir(
      &input_dir.join(&config.static_dir),
      &config.output_dir.join(&config.static_dir),
    )?;
  }

  if let Some(theme_path) = config.theme_path() {
    copy_theme_static(&theme_path.join("static"), &config.output_dir)?;
  }

  write_default_stylesheet(&config.output_dir)
}

/// Copy `source` to `dest`, removing an existing `dest` first.
///
/// A missing `source` is not an error.
///
/// # Errors
///
/// Returns an error if the old copy cannot be removed or the copy fails.
pub fn copy_static_dir(source: &Path, dest: &Path) -> Result<()> {
  if !source.is_dir() {
    return Ok(());
  }

  if dest.exists() {
    fs::remove_dir_all(dest).wrap_err_with(|| {
      format!("Failed to remove old static directory {}", dest.display())
    })?;
  }

  debug!("Copying static files from {}", source.display());

  let options = fs_extra::dir::CopyOptions::new().copy_inside(true);
  fs_extra::dir::copy(source, dest, &options).wrap_err_with(|| {
    format!(
      "Failed to copy static files from {} to {}",
      source.display(),
      dest.display()
    )
  })?;

  Ok(())
}

/// Copy every regular file below `theme_static` into `output_dir`, keeping
/// paths relative to `theme_static`.
///
/// Hidden entries are skipped and existing files are overwritten.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or a file cannot be
/// copied.
pub fn copy_theme_static(theme_static: &Path, output_dir: &Path) -> Result<()> {
  if !theme_static.is_dir() {
    return Ok(());
  }

  debug!("Copying theme assets from {}", theme_static.display());

  let walker = WalkDir::new(theme_static)
    .into_iter()
    .filter_entry(|e| {
      e.depth() == 0
        || e.file_name().to_str().is_none_or(|s| !s.starts_with('.'))
    });

  for entry in walker.filter_map(std::result::Result::ok) {
    #[allow(
      clippy::filetype_is_file,
      reason = "Explicitly checking for regular files to skip symlinks and \
                special files"
    )]
    if !entry.file_type().is_file() {
      continue;
    }

    let path = entry.path();
    let rel_path = path
      .strip_prefix(theme_static)
      .wrap_err("Failed to compute relative path")?;
    let dest_path = output_dir.join(rel_path);

    if let Some(parent) = dest_path.parent() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory {}", parent.display())
      })?;
    }

    fs::copy(path, &dest_path).wrap_err_with(|| {
      format!(
        "Failed to copy asset from {} to {}",
        path.display(),
        dest_path.display()
      )
    })?;
  }

  Ok(())
}

/// Write the embedded stylesheet unless one is already in place.
///
/// # Errors
///
/// Returns an error if the stylesheet cannot be written.
pub fn write_default_stylesheet(output_dir: &Path) -> Result<()> {
  let css_path = output_dir.join(STYLESHEET_OUTPUT);
  if css_path.exists() {
    return Ok(());
  }

  if let Some(parent) = css_path.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory {}", parent.display())
    })?;
  }

  fs::write(&css_path, templates::DEFAULT_CSS)
    .wrap_err("Failed to write CSS file")
}
