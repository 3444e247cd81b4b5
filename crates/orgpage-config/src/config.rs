use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Config file names looked up in the current directory, in order.
pub const CONFIG_FILENAMES: &[&str] =
  &["orgpage.toml", "orgpage.json", ".orgpage.toml", ".orgpage.json"];

/// Configuration for a generated site.
///
/// Fields are typically loaded from a TOML or JSON file, adjusted with
/// `--config KEY=VALUE` overrides and finally with the flags of the `build`
/// subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct SiteConfig {
  /// Directory containing the `.org` sources.
  pub input_dir: Option<PathBuf>,

  /// Directory the site is written to.
  pub output_dir: PathBuf,

  /// Base URL, used for absolute links in the feed.
  pub domain: String,

  /// Site title.
  pub title: String,

  /// Site subtitle, shown under the title when non-empty.
  pub subtitle: String,

  /// Default author for documents without `#+AUTHOR:`.
  pub author: String,

  /// Contact address.
  pub email: String,

  /// Site description, used by the index page and the feed.
  pub description: String,

  /// Keywords appended to every document's own keywords.
  pub keywords: Vec<String>,

  /// Theme name, looked up under `theme_dir`.
  pub theme: String,

  /// Directory holding themes, relative to the input directory.
  pub theme_dir: PathBuf,

  /// Directory of static files, relative to the input directory.
  pub static_dir: PathBuf,

  /// Number of threads used to parse documents.
  pub jobs: Option<usize>,

  /// Number of posts on the index page.
  pub index_limit: usize,

  /// Number of posts in the feed.
  pub rss_limit: usize,

  /// Whether documents get a table of contents.
  pub generate_toc: bool,

  /// Whether `rss.xml` is written.
  pub generate_rss: bool,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      input_dir:    None,
      output_dir:   PathBuf::from("public"),
      domain:       "https://example.com".to_string(),
      title:        "My Site".to_string(),
      subtitle:     String::new(),
      author:       String::new(),
      email:        String::new(),
      description:  String::new(),
      keywords:     Vec::new(),
      theme:        "default".to_string(),
      theme_dir:    PathBuf::from("themes"),
      static_dir:   PathBuf::from("static"),
      jobs:         None,
      index_limit:  10,
      rss_limit:    20,
      generate_toc: true,
      generate_rss: true,
    }
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::InvalidBoolean {
        key:   key.to_string(),
        value: value.to_string(),
      })
    },
  }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
  value.parse().map_err(|_| {
    ConfigError::InvalidValue {
      key:      key.to_string(),
      value:    value.to_string(),
      expected: "a positive integer",
    }
  })
}

/// Empty means unset.
fn parse_optional_path(value: &str) -> Option<PathBuf> {
  (!value.is_empty()).then(|| PathBuf::from(value))
}

fn parse_list(value: &str) -> Vec<String> {
  value
    .split(',')
    .map(str::trim)
    .filter(|item| !item.is_empty())
    .map(str::to_string)
    .collect()
}

/// Keys whose list values accumulate across config files.
const APPENDED_KEYS: &[&str] = &["keywords"];

/// Read a config file into a table of the keys it sets.
fn read_table(path: &Path) -> Result<Map<String, Value>, ConfigError> {
  let content = fs::read_to_string(path).map_err(|e| {
    ConfigError::Config(format!(
      "Failed to read config file: {}: {e}",
      path.display()
    ))
  })?;

  let extension = path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(str::to_lowercase);

  let value: Value = match extension.as_deref() {
    Some("json") => {
      serde_json::from_str(&content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to parse JSON config from {}: {e}",
          path.display()
        ))
      })?
    },
    Some("toml") => {
      toml::from_str(&content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to parse TOML config from {}: {e}",
          path.display()
        ))
      })?
    },
    Some(_) => {
      return Err(ConfigError::Config(format!(
        "Unsupported config file format: {}",
        path.display()
      )));
    },
    None => {
      return Err(ConfigError::Config(format!(
        "Config file has no extension: {}",
        path.display()
      )));
    },
  };

  match value {
    Value::Object(table) => Ok(table),
    _ => {
      Err(ConfigError::Config(format!(
        "Config file must contain a table of settings: {}",
        path.display()
      )))
    },
  }
}

/// Merge the keys of `layer` into `base`.
///
/// A key set in `layer` replaces the one in `base`; keys `layer` leaves out
/// keep their value. Lists under [`APPENDED_KEYS`] are concatenated.
fn merge_tables(base: &mut Map<String, Value>, layer: Map<String, Value>) {
  for (key, value) in layer {
    if APPENDED_KEYS.contains(&key.as_str())
      && let (Some(Value::Array(existing)), Value::Array(items)) =
        (base.get_mut(&key), &value)
    {
      existing.extend(items.iter().cloned());
      continue;
    }
    base.insert(key, value);
  }
}

impl SiteConfig {
  /// Load configuration from a file (TOML or JSON, chosen by extension).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    Self::from_table(read_table(path)?, path)
  }

  /// Build a config from the keys set across one or more files.
  fn from_table(
    table: Map<String, Value>,
    path: &Path,
  ) -> Result<Self, ConfigError> {
    serde_json::from_value(Value::Object(table)).map_err(|e| {
      ConfigError::Config(format!(
        "Invalid configuration in {}: {e}",
        path.display()
      ))
    })
  }

  /// Load configuration from the given files (merged in order) or from a
  /// discovered file, then apply `KEY=VALUE` overrides.
  ///
  /// With no files given and none discovered, the defaults are used.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded or an override is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged = read_table(first)?;
      for path in rest {
        merge_tables(&mut merged, read_table(path)?);
      }

      if !rest.is_empty() {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
      let last = rest.last().unwrap_or(first);
      Self::from_table(merged, last)?
    } else if let Some(discovered) = Self::find_config_file() {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      log::debug!("No config file found, using defaults");
      Self::default()
    };

    config.apply_overrides(config_overrides)?;
    Ok(config)
  }

  /// Apply `KEY=VALUE` overrides in order.
  ///
  /// # Errors
  ///
  /// Returns an error if an entry has no `=`, the key is unknown or the value
  /// cannot be parsed as the field's type.
  ///
  /// # Example
  ///
  /// ```
  /// use orgpage_config::SiteConfig;
  ///
  /// let mut config = SiteConfig::default();
  /// config
  ///   .apply_overrides(&["title=Notes".to_string(), "rss_limit=5".to_string()])
  ///   .unwrap();
  /// assert_eq!(config.title, "Notes");
  /// assert_eq!(config.rss_limit, 5);
  /// ```
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride(override_str.clone()))?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Set a single field from its string form.
  ///
  /// `input_dir` and `jobs` are cleared by an empty value; `keywords` takes a
  /// comma separated list.
  ///
  /// # Errors
  ///
  /// Returns an error if the key is unknown or the value does not parse.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "input_dir" => self.input_dir = parse_optional_path(value),
      "output_dir" => self.output_dir = PathBuf::from(value),
      "domain" => self.domain = value.to_string(),
      "title" => self.title = value.to_string(),
      "subtitle" => self.subtitle = value.to_string(),
      "author" => self.author = value.to_string(),
      "email" => self.email = value.to_string(),
      "description" => self.description = value.to_string(),
      "keywords" => self.keywords = parse_list(value),
      "theme" => self.theme = value.to_string(),
      "theme_dir" => self.theme_dir = PathBuf::from(value),
      "static_dir" => self.static_dir = PathBuf::from(value),
      "jobs" => {
        self.jobs = if value.is_empty() {
          None
        } else {
          Some(parse_usize(key, value)?)
        };
      },
      "index_limit" => self.index_limit = parse_usize(key, value)?,
      "rss_limit" => self.rss_limit = parse_usize(key, value)?,
      "generate_toc" => self.generate_toc = parse_bool(key, value)?,
      "generate_rss" => self.generate_rss = parse_bool(key, value)?,
      _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }

    log::debug!("Applied config override {key}={value}");
    Ok(())
  }

  /// Search the current directory for a config file.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    Self::find_config_file_in(&current_dir)
  }

  /// Search `dir` for the first of [`CONFIG_FILENAMES`] that exists.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Directory of the active theme: `<input_dir>/<theme_dir>/<theme>`.
  ///
  /// Returns [`None`] when no input directory is configured.
  #[must_use]
  pub fn theme_path(&self) -> Option<PathBuf> {
    self
      .input_dir
      .as_ref()
      .map(|input| input.join(&self.theme_dir).join(&self.theme))
  }

  /// Validate the paths in the configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if the input directory is missing, does not exist or is
  /// not a directory.
  pub fn validate_paths(&self) -> Result<(), ConfigError> {
    let Some(ref input_dir) = self.input_dir else {
      return Err(ConfigError::Config(
        "An input directory must be provided".to_string(),
      ));
    };

    if !input_dir.exists() {
      return Err(ConfigError::Config(format!(
        "Input directory does not exist: {}",
        input_dir.display()
      )));
    }
    if !input_dir.is_dir() {
      return Err(ConfigError::Config(format!(
        "Input path is not a directory: {}",
        input_dir.display()
      )));
    }

    Ok(())
  }

  /// Write a commented default configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)
      .map_err(|e| ConfigError::Template(e.to_string()))?;

    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent)?;
    }

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {e}",
        path.display()
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Write the embedded default theme into `theme_root`.
  ///
  /// Templates land at the top level, the stylesheet under `static/css/`.
  /// Existing files are kept unless `force` is set.
  ///
  /// # Errors
  ///
  /// Returns an error if a directory cannot be created or a file cannot be
  /// written.
  pub fn export_theme(theme_root: &Path, force: bool) -> Result<(), ConfigError> {
    for (relative, content) in orgpage_templates::all_templates() {
      let file_path = theme_root.join(relative);

      if file_path.exists() && !force {
        log::warn!(
          "File {} already exists. Use --force to overwrite.",
          file_path.display()
        );
        continue;
      }

      if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to create theme directory: {}: {e}",
            parent.display()
          ))
        })?;
      }

      fs::write(&file_path, content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to write theme file: {}: {e}",
          file_path.display()
        ))
      })?;
      log::info!("Exported theme file: {}", file_path.display());
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_defaults() {
    let config = SiteConfig::default();
    assert_eq!(config.output_dir, PathBuf::from("public"));
    assert_eq!(config.domain, "https://example.com");
    assert_eq!(config.title, "My Site");
    assert_eq!(config.theme, "default");
    assert_eq!(config.index_limit, 10);
    assert_eq!(config.rss_limit, 20);
    assert!(config.generate_toc);
    assert!(config.generate_rss);
    assert!(config.input_dir.is_none());
  }

  #[test]
  fn test_from_file_toml_partial() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orgpage.toml");
    fs::write(&path, "title = \"Blog\"\nrss_limit = 3\n").unwrap();

    let config = SiteConfig::from_file(&path).unwrap();
    assert_eq!(config.title, "Blog");
    assert_eq!(config.rss_limit, 3);
    assert_eq!(config.index_limit, 10);
  }

  #[test]
  fn test_from_file_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("site.JSON");
    fs::write(&path, r#"{"author": "Ann", "keywords": ["a", "b"]}"#).unwrap();

    let config = SiteConfig::from_file(&path).unwrap();
    assert_eq!(config.author, "Ann");
    assert_eq!(config.keywords, vec!["a", "b"]);
  }

  #[test]
  fn test_from_file_errors() {
    let dir = TempDir::new().unwrap();

    let yaml = dir.path().join("site.yaml");
    fs::write(&yaml, "title: x").unwrap();
    let err = SiteConfig::from_file(&yaml).unwrap_err();
    assert!(err.to_string().contains("Unsupported config file format"));

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "title = ").unwrap();
    let err = SiteConfig::from_file(&bad).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));

    let missing = dir.path().join("missing.toml");
    assert!(SiteConfig::from_file(&missing).is_err());
  }

  #[test]
  fn test_load_merges_in_order() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("a.toml");
    let second = dir.path().join("b.json");
    fs::write(
      &first,
      "input_dir = \"content\"\ntitle = \"First\"\nkeywords = [\"one\"]\n",
    )
    .unwrap();
    fs::write(&second, r#"{"title": "Second", "keywords": ["two"]}"#).unwrap();

    let config = SiteConfig::load(&[first, second], &[]).unwrap();
    assert_eq!(config.title, "Second");
    assert_eq!(config.input_dir, Some(PathBuf::from("content")));
    assert_eq!(config.keywords, vec!["one", "two"]);
  }

  #[test]
  fn test_load_applies_overrides_last() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.toml");
    fs::write(&file, "title = \"From file\"\n").unwrap();

    let config =
      SiteConfig::load(&[file], &["title=From flag".to_string()]).unwrap();
    assert_eq!(config.title, "From flag");
  }

  #[test]
  fn test_load_keeps_keys_later_files_leave_out() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("base.toml");
    let local = dir.path().join("local.toml");
    fs::write(
      &base,
      "input_dir = \"content\"\ntitle = \"Notes\"\nauthor = \"Ann\"\n\
       rss_limit = 5\ngenerate_rss = false\n",
    )
    .unwrap();
    fs::write(&local, "domain = \"http://localhost:8080\"\njobs = 4\n")
      .unwrap();

    let config = SiteConfig::load(&[base, local], &[]).unwrap();
    assert_eq!(config.domain, "http://localhost:8080");
    assert_eq!(config.jobs, Some(4));
    assert_eq!(config.input_dir, Some(PathBuf::from("content")));
    assert_eq!(config.title, "Notes");
    assert_eq!(config.author, "Ann");
    assert_eq!(config.rss_limit, 5);
    assert!(!config.generate_rss);
    assert_eq!(config.index_limit, 10);
  }

  #[test]
  fn test_load_rejects_non_table_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("list.json");
    fs::write(&path, "[1, 2]").unwrap();

    let err = SiteConfig::load(&[path], &[]).unwrap_err();
    assert!(err.to_string().contains("table of settings"));
  }

  #[test]
  fn test_apply_overrides_types() {
    let mut config = SiteConfig::default();
    config
      .apply_overrides(&[
        "input_dir=/tmp/in".to_string(),
        "output_dir = /tmp/out".to_string(),
        "jobs=8".to_string(),
        "generate_rss=no".to_string(),
        "generate_toc=1".to_string(),
        "keywords=rust, org ,,web".to_string(),
        "description=a=b".to_string(),
      ])
      .unwrap();

    assert_eq!(config.input_dir, Some(PathBuf::from("/tmp/in")));
    assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    assert_eq!(config.jobs, Some(8));
    assert!(!config.generate_rss);
    assert!(config.generate_toc);
    assert_eq!(config.keywords, vec!["rust", "org", "web"]);
    assert_eq!(config.description, "a=b");
  }

  #[test]
  fn test_apply_override_empty_clears_optional() {
    let mut config = SiteConfig::default();
    config.input_dir = Some(PathBuf::from("/existing"));
    config.jobs = Some(2);

    config.apply_override("input_dir", "").unwrap();
    config.apply_override("jobs", "").unwrap();
    assert!(config.input_dir.is_none());
    assert!(config.jobs.is_none());
  }

  #[test]
  fn test_apply_overrides_invalid_format() {
    let mut config = SiteConfig::default();
    let err = config
      .apply_overrides(&["no_equals_sign".to_string()])
      .unwrap_err();
    assert!(err.to_string().contains("Expected KEY=VALUE"));
  }

  #[test]
  fn test_apply_overrides_unknown_key() {
    let mut config = SiteConfig::default();
    let err = config
      .apply_overrides(&["colour=blue".to_string()])
      .unwrap_err();
    assert!(err.to_string().contains("Unknown configuration key"));
  }

  #[test]
  fn test_apply_overrides_invalid_boolean() {
    let mut config = SiteConfig::default();
    let err = config
      .apply_overrides(&["generate_rss=maybe".to_string()])
      .unwrap_err();
    assert!(err.to_string().contains("Invalid boolean"));
  }

  #[test]
  fn test_apply_overrides_invalid_numeric() {
    let mut config = SiteConfig::default();
    let err = config
      .apply_overrides(&["index_limit=-3".to_string()])
      .unwrap_err();
    assert!(err.to_string().contains("Invalid value"));
  }

  #[test]
  fn test_find_config_file_in_order() {
    let dir = TempDir::new().unwrap();
    assert!(SiteConfig::find_config_file_in(dir.path()).is_none());

    fs::write(dir.path().join(".orgpage.json"), "{}").unwrap();
    fs::write(dir.path().join("orgpage.json"), "{}").unwrap();
    assert_eq!(
      SiteConfig::find_config_file_in(dir.path()),
      Some(dir.path().join("orgpage.json"))
    );

    fs::write(dir.path().join("orgpage.toml"), "").unwrap();
    assert_eq!(
      SiteConfig::find_config_file_in(dir.path()),
      Some(dir.path().join("orgpage.toml"))
    );
  }

  #[test]
  fn test_validate_paths() {
    let dir = TempDir::new().unwrap();
    let mut config = SiteConfig::default();
    assert!(config.validate_paths().is_err());

    config.input_dir = Some(dir.path().join("nope"));
    let err = config.validate_paths().unwrap_err();
    assert!(err.to_string().contains("does not exist"));

    let file = dir.path().join("file.org");
    fs::write(&file, "").unwrap();
    config.input_dir = Some(file);
    let err = config.validate_paths().unwrap_err();
    assert!(err.to_string().contains("not a directory"));

    config.input_dir = Some(dir.path().to_path_buf());
    assert!(config.validate_paths().is_ok());
  }

  #[test]
  fn test_theme_path() {
    let mut config = SiteConfig::default();
    assert!(config.theme_path().is_none());

    config.input_dir = Some(PathBuf::from("site"));
    config.theme = "dark".to_string();
    assert_eq!(config.theme_path(), Some(PathBuf::from("site/themes/dark")));
  }

  #[test]
  fn test_generate_default_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/orgpage.toml");

    SiteConfig::generate_default_config("toml", &path).unwrap();
    let config = SiteConfig::from_file(&path).unwrap();
    assert_eq!(config.input_dir, Some(PathBuf::from("content")));

    let err =
      SiteConfig::generate_default_config("ini", &dir.path().join("x.ini"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Template(_)));
  }

  #[test]
  fn test_export_theme_respects_force() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("themes/default");

    SiteConfig::export_theme(&root, false).unwrap();
    let post = root.join("post.html");
    assert!(post.is_file());
    assert!(root.join("static/css/style.css").is_file());

    fs::write(&post, "custom").unwrap();
    SiteConfig::export_theme(&root, false).unwrap();
    assert_eq!(fs::read_to_string(&post).unwrap(), "custom");

    SiteConfig::export_theme(&root, true).unwrap();
    assert_ne!(fs::read_to_string(&post).unwrap(), "custom");
  }
}
