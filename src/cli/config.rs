//! Inspect or create the configuration file.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::RenderConfig;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommands {
    /// Show the effective configuration (default)
    Show,

    /// Print the configuration file location
    Path,

    /// Write a commented example configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        match self.command {
            Some(ConfigSubcommands::Show) | None => Self::show(config_path).await,
            Some(ConfigSubcommands::Path) => Self::show_path(config_path),
            Some(ConfigSubcommands::Init {
                force,
            }) => Self::init(force, config_path).await,
        }
    }

    fn resolve(config_path: Option<PathBuf>) -> Result<PathBuf> {
        match config_path {
            Some(path) => Ok(path),
            None => RenderConfig::resolve_path(),
        }
    }

    async fn show(config_path: Option<PathBuf>) -> Result<()> {
        let path = Self::resolve(config_path)?;
        let config = RenderConfig::load_with_optional(Some(path.clone())).await?;

        println!("{}", "Render Configuration".bold());
        if path.exists() {
            println!("Location: {}\n", path.display());
        } else {
            println!("Location: {} {}\n", path.display(), "(not found, using defaults)".dimmed());
        }
        println!("{}", toml::to_string_pretty(&config)?);
        Ok(())
    }

    fn show_path(config_path: Option<PathBuf>) -> Result<()> {
        println!("{}", Self::resolve(config_path)?.display());
        Ok(())
    }

    async fn init(force: bool, config_path: Option<PathBuf>) -> Result<()> {
        let path = Self::resolve(config_path)?;

        if path.exists() && !force {
            anyhow::bail!(
                "Config already exists at {}. Use --force to overwrite",
                path.display()
            );
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, RenderConfig::init_example()).await?;

        println!("{} Created config at: {}", "✓".green(), path.display());
        Ok(())
    }
}
