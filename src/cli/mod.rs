//! Command-line interface for `uxr`.
//!
//! # Commands
//!
//! - `render` - render a template against JSON, YAML or TOML data
//! - `check` - parse a template and report its structure and problems
//! - `escape` - escape a CSS ID selector
//! - `config` - inspect or create the configuration file
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//! - `--config` / `-c` - configuration file to use instead of the default
//!
//! `RUST_LOG`, when set, takes precedence over both logging flags.
//!
//! # Examples
//!
//! ```bash
//! # Render a template with one data file
//! uxr render card.html --data card.json
//!
//! # Later data files override earlier ones for blocks
//! uxr render page.html -d defaults.yaml -d page.toml -o page.out.html
//!
//! # Read the template from stdin
//! echo 'Hi {{name}}' | uxr render - -d user.json
//!
//! # Check a template for unbalanced tags
//! uxr check card.html
//! ```

mod check;
mod config;
mod data;
mod escape;
mod render;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use data::{DataFormat, load_context};

/// Settings derived from the global flags, applied before a command runs.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,

    /// Configuration file given with `--config`
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_level: "warn".to_string(),
            config_path: None,
        }
    }

    /// Install the global tracing subscriber on stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser)]
#[command(
    name = "uxr",
    about = "Render UXRocket templates from the command line",
    version,
    long_about = "uxr renders mustache-style UXRocket templates ({{var}}, {{#each}}, {{#if}}) against JSON, YAML or TOML data."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template against data files
    Render(render::RenderCommand),

    /// Parse a template and report its structure
    Check(check::CheckCommand),

    /// Escape a CSS ID selector for querySelector
    Escape(escape::EscapeCommand),

    /// Inspect or create the configuration file
    Config(config::ConfigCommand),
}

impl Cli {
    /// Run the parsed command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; `main` turns it into a user-facing report.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    /// Run the command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the command's error.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Render(cmd) => cmd.execute(config.config_path).await,
            Commands::Check(cmd) => cmd.execute(config.config_path).await,
            Commands::Escape(cmd) => cmd.execute(),
            Commands::Config(cmd) => cmd.execute(config.config_path).await,
        }
    }
}
