#![allow(clippy::unwrap_used, reason = "Fine in tests")]
use std::fs;

use orgpage_config::SiteConfig;
use orgpage_utils::{
  assets::{STYLESHEET_OUTPUT, copy_static_dir, copy_theme_static},
  copy_assets,
};
use tempfile::TempDir;

fn site(input: &TempDir, output: &TempDir) -> SiteConfig {
  SiteConfig {
    input_dir: Some(input.path().to_path_buf()),
    output_dir: output.path().join("public"),
    ..Default::default()
  }
}

#[test]
fn static_dir_is_copied_without_nesting() {
  let input = TempDir::new().unwrap();
  let output = TempDir::new().unwrap();
  let img_dir = input.path().join("static").join("img");
  fs::create_dir_all(&img_dir).unwrap();
  fs::write(img_dir.join("logo.svg"), "<svg/>").unwrap();

  copy_assets(&site(&input, &output)).unwrap();

  let copied = output.path().join("public/static/img/logo.svg");
  assert!(copied.exists(), "missing {}", copied.display());
  assert!(!output.path().join("public/static/static").exists());
}

#[test]
fn static_dir_replaces_previous_copy() {
  let input = TempDir::new().unwrap();
  let output = TempDir::new().unwrap();
  let source = input.path().join("static");
  let dest = output.path().join("static");
  fs::create_dir_all(&source).unwrap();
  fs::create_dir_all(&dest).unwrap();
  fs::write(source.join("new.txt"), "new").unwrap();
  fs::write(dest.join("stale.txt"), "old").unwrap();

  copy_static_dir(&source, &dest).unwrap();

  assert!(dest.join("new.txt").exists());
  assert!(!dest.join("stale.txt").exists());
}

#[test]
fn missing_sources_are_ignored() {
  let scratch = TempDir::new().unwrap();
  copy_static_dir(&scratch.path().join("nope"), &scratch.path().join("out"))
    .unwrap();
  copy_theme_static(&scratch.path().join("nope"), scratch.path()).unwrap();
  assert!(!scratch.path().join("out").exists());
}

#[test]
fn theme_static_lands_at_output_root() {
  let input = TempDir::new().unwrap();
  let output = TempDir::new().unwrap();
  let theme_static = input.path().join("themes/default/static");
  fs::create_dir_all(theme_static.join("css")).unwrap();
  fs::create_dir_all(theme_static.join("js")).unwrap();
  fs::write(theme_static.join("css/style.css"), "body{}").unwrap();
  fs::write(theme_static.join("js/site.js"), "// js").unwrap();
  fs::write(theme_static.join(".hidden"), "x").unwrap();

  let config = site(&input, &output);
  copy_assets(&config).unwrap();

  let css = fs::read_to_string(config.output_dir.join(STYLESHEET_OUTPUT)).unwrap();
  assert_eq!(css, "body{}", "theme stylesheet must not be replaced");
  assert!(config.output_dir.join("js/site.js").exists());
  assert!(!config.output_dir.join(".hidden").exists());
}

#[test]
fn embedded_stylesheet_written_when_theme_has_none() {
  let input = TempDir::new().unwrap();
  let output = TempDir::new().unwrap();
  let config = site(&input, &output);

  copy_assets(&config).unwrap();

  let css = fs::read_to_string(config.output_dir.join(STYLESHEET_OUTPUT)).unwrap();
  assert_eq!(css, orgpage_templates::DEFAULT_CSS);
}
