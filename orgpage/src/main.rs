use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use orgpage::{
  cli::{Cli, Commands},
  site,
};
use orgpage_config::SiteConfig;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // Create configuration from config files and overrides
  let mut config = SiteConfig::load(&cli.config_files, &cli.config_overrides)
    .wrap_err("Failed to load configuration")?;

  match &cli.command {
    Some(Commands::Init {
      output,
      format,
      force,
    }) => {
      // Check if file already exists and that we're not forcing overwrite
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      SiteConfig::generate_default_config(format, output).wrap_err_with(
        || {
          format!(
            "Failed to generate configuration file: {}",
            output.display()
          )
        },
      )?;

      info!(
        "Configuration file created successfully. Edit it to customize your \
         site."
      );
      Ok(())
    },

    Some(Commands::Theme { dir, force }) => {
      let theme_root = dir.join(&config.theme_dir).join("default");
      SiteConfig::export_theme(&theme_root, *force).wrap_err_with(|| {
        format!("Failed to export theme to {}", theme_root.display())
      })?;
      Ok(())
    },

    Some(command @ Commands::Build { .. }) => {
      command.apply_to(&mut config);
      site::build_site(&config)?;
      Ok(())
    },

    None => {
      site::build_site(&config)?;
      Ok(())
    },
  }
}
