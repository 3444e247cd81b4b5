use std::{
  collections::HashMap,
  fs,
  path::Path,
  sync::{LazyLock, PoisonError, RwLock},
};

use color_eyre::eyre::{Context, Result, bail};
use orgpage_config::SiteConfig;
use orgpage_templates as templates;
use serde::Serialize;
use tera::Tera;

static TEMPLATE_CACHE: LazyLock<RwLock<HashMap<String, String>>> =
  LazyLock::new(|| RwLock::new(HashMap::new()));

/// Render the theme file `template_name` with the fields of `data`.
///
/// # Errors
///
/// Returns an error if the template cannot be loaded, does not parse or
/// refers to a variable `data` does not provide.
pub fn render_template<T: Serialize>(
  config: &SiteConfig,
  template_name: &str,
  data: &T,
) -> Result<String> {
  let content = get_template_content(config, template_name)?;

  // Registered without the file suffix so Tera does not autoescape the
  // pre-rendered HTML fragments we pass in.
  let key = template_key(template_name);
  let mut tera = Tera::default();
  tera
    .add_raw_template(key, &content)
    .wrap_err_with(|| format!("Failed to parse template {template_name}"))?;

  let context = tera::Context::from_serialize(data).wrap_err_with(|| {
    format!("Failed to build context for template {template_name}")
  })?;

  tera
    .render(key, &context)
    .wrap_err_with(|| format!("Failed to render template {template_name}"))
}

/// Template name with its extension removed, e.g. `post` for `post.html`.
fn template_key(template_name: &str) -> &str {
  Path::new(template_name)
    .file_stem()
    .and_then(|s| s.to_str())
    .unwrap_or(template_name)
}

/// Get template content, loading it once per theme directory.
///
/// # Errors
///
/// Returns an error if a theme file exists but cannot be read, or if the name
/// is not one of the theme files and the theme does not provide it.
pub fn get_template_content(
  config: &SiteConfig,
  template_name: &str,
) -> Result<String> {
  // Create cache key that includes the theme path to handle different configs
  let theme_key = config
    .theme_path()
    .map_or_else(|| "default".to_string(), |p| p.display().to_string());
  let cache_key = format!("{theme_key}:{template_name}");

  {
    let cache = TEMPLATE_CACHE
      .read()
      .unwrap_or_else(PoisonError::into_inner);
    if let Some(cached) = cache.get(&cache_key) {
      return Ok(cached.clone());
    }
  }

  let content = load_template_content(config, template_name)?;

  {
    let mut cache = TEMPLATE_CACHE
      .write()
      .unwrap_or_else(PoisonError::into_inner);
    cache.entry(cache_key).or_insert_with(|| content.clone());
  }

  Ok(content)
}

/// Read the template from the theme directory, or fall back to the embedded
/// default theme.
fn load_template_content(
  config: &SiteConfig,
  template_name: &str,
) -> Result<String> {
  if let Some(theme_dir) = config.theme_path() {
    let template_path = theme_dir.join(template_name);
    if template_path.is_file() {
      log::debug!("Using theme template {}", template_path.display());
      return fs::read_to_string(&template_path).wrap_err_with(|| {
        format!("Failed to read template file: {}", template_path.display())
      });
    }
  }

  match templates::embedded_template(template_name) {
    Some(content) => Ok(content.to_string()),
    None => bail!("No template named {template_name} in theme or defaults"),
  }
}
