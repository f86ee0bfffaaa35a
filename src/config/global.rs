//! Global rendering configuration.
//!
//! The configuration lives in `~/.uxr/config.toml` and controls how
//! [`TemplateRenderer`] behaves. Every field has a default, so an empty or
//! missing file yields [`RenderConfig::default`].
//!
//! # File Format
//!
//! ```toml
//! # false: templates are returned unchanged
//! enabled = true
//!
//! # Largest template accepted, in bytes; 0 disables the limit
//! max_template_size = 1048576
//!
//! # Loop blocks whose key is absent: "preserve" or "remove"
//! missing_blocks = "preserve"
//! ```
//!
//! # Location
//!
//! The file is looked up in order:
//!
//! 1. an explicit path (the `--config` flag)
//! 2. the `UXR_CONFIG` environment variable
//! 3. `~/.uxr/config.toml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_MAX_TEMPLATE_SIZE,
};
use crate::templating::{MissingBlocks, RenderOptions, TemplateRenderer};

/// Settings applied to every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Whether templates are rendered at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Largest accepted template in bytes. `0` disables the limit.
    #[serde(default = "default_max_template_size")]
    pub max_template_size: usize,

    /// What to do with a loop block whose key is absent from the data.
    #[serde(default)]
    pub missing_blocks: MissingBlocks,
}

const fn default_enabled() -> bool {
    true
}

const fn default_max_template_size() -> usize {
    DEFAULT_MAX_TEMPLATE_SIZE
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_template_size: default_max_template_size(),
            missing_blocks: MissingBlocks::default(),
        }
    }
}

impl RenderConfig {
    /// Load the configuration from its default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, otherwise from `$UXR_CONFIG` or the default
    /// location. A file that does not exist yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::resolve_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load the configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this structure.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// The path used when no explicit path is given: `$UXR_CONFIG` if set,
    /// otherwise [`RenderConfig::default_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn resolve_path() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Self::default_path(),
        }
    }

    /// `~/.uxr/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
            .join(CONFIG_DIR_NAME);
        Ok(dir.join(CONFIG_FILE_NAME))
    }

    /// Renderer options for this configuration.
    #[must_use]
    pub fn to_options(&self) -> RenderOptions {
        RenderOptions {
            enabled: self.enabled,
            max_template_size: (self.max_template_size > 0).then_some(self.max_template_size),
            missing_blocks: self.missing_blocks,
        }
    }

    /// A renderer configured with these settings.
    #[must_use]
    pub fn renderer(&self) -> TemplateRenderer {
        TemplateRenderer::new(self.to_options())
    }

    /// Commented example file written by `uxr config init`.
    #[must_use]
    pub fn init_example() -> String {
        format!(
            r#"# uxr rendering configuration

# false: templates are returned unchanged
enabled = true

# Largest template accepted, in bytes; 0 disables the limit
max_template_size = {DEFAULT_MAX_TEMPLATE_SIZE}

# Loop blocks whose key is absent from the data:
#   "preserve" keeps the block text (placeholders are still stripped)
#   "remove" deletes the whole block
missing_blocks = "preserve"
"#
        )
    }
}
