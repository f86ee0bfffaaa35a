//! Render a template against data files.

use anyhow::{Context as _, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::data::{load_context, read_input};
use crate::config::RenderConfig;
use crate::constants::STDIO_PATH;
use crate::core::UxrError;

/// Render a template and write the result to stdout or a file.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template file, or `-` for stdin
    template: PathBuf,

    /// Data file (JSON, YAML or TOML); repeat to build a context list
    #[arg(short, long = "data", value_name = "FILE")]
    data: Vec<PathBuf>,

    /// Output file; stdout when omitted or `-`
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl RenderCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = RenderConfig::load_with_optional(config_path).await?;
        let renderer = config.renderer();

        if self.template == Path::new(STDIO_PATH)
            && self.data.iter().any(|path| path == Path::new(STDIO_PATH))
        {
            anyhow::bail!("Only one of the template and the data files can be read from stdin");
        }

        let template = read_input(&self.template).await?;
        let context = load_context(self.data.as_slice()).await?;

        let rendered = renderer.render_template(&template, &context).map_err(UxrError::from)?;

        match self.output.as_deref() {
            Some(path) if path != Path::new(STDIO_PATH) => {
                tokio::fs::write(path, &rendered)
                    .await
                    .with_context(|| format!("Failed to write output to {}", path.display()))?;
                tracing::info!("Wrote {} bytes to {}", rendered.len(), path.display());
            }
            _ => print!("{rendered}"),
        }

        Ok(())
    }
}
