use std::path::PathBuf;

use clap::{Parser, Subcommand};
use orgpage_config::SiteConfig;

/// Command line interface for orgpage
#[derive(Parser, Debug)]
#[command(author, version, about = "Convert org-mode files to a static HTML site")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the orgpage CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Convert a directory of org files into a site.
  Build {
    /// Directory containing the org files.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory the site is written to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Site title.
    #[arg(short = 'T', long)]
    title: Option<String>,

    /// Base URL used for feed links.
    #[arg(long)]
    domain: Option<String>,

    /// Default author.
    #[arg(long)]
    author: Option<String>,

    /// Theme name, looked up under the theme directory.
    #[arg(long)]
    theme: Option<String>,

    /// Number of threads to use for parsing.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,
  },

  /// Initialize a new orgpage configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "orgpage.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Export the default theme for customization.
  Theme {
    /// Site directory; the theme lands in its theme directory as `default`.
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

impl Commands {
  /// Apply the flags of the `build` subcommand on top of `config`.
  ///
  /// Other subcommands leave the configuration untouched.
  pub fn apply_to(&self, config: &mut SiteConfig) {
    let Self::Build {
      input_dir,
      output_dir,
      title,
      domain,
      author,
      theme,
      jobs,
    } = self
    else {
      return;
    };

    if let Some(input_dir) = input_dir {
      config.input_dir = Some(input_dir.clone());
    }
    if let Some(output_dir) = output_dir {
      config.output_dir.clone_from(output_dir);
    }
    if let Some(title) = title {
      config.title.clone_from(title);
    }
    if let Some(domain) = domain {
      config.domain.clone_from(domain);
    }
    if let Some(author) = author {
      config.author.clone_from(author);
    }
    if let Some(theme) = theme {
      config.theme.clone_from(theme);
    }
    if jobs.is_some() {
      config.jobs = *jobs;
    }
  }
}
