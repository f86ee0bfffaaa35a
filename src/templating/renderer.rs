//! Template rendering pipeline.
//!
//! Rendering is a fixed sequence of passes over the working text:
//!
//! 1. scalar substitution, once per context entry, last entry first
//! 2. loop expansion
//! 3. conditional resolution
//! 4. removal of unresolved placeholders
//!
//! [`render`] is the pure pipeline. [`TemplateRenderer`] wraps it with the
//! settings from [`RenderConfig`](crate::config::RenderConfig).

use super::conditionals::expand_conditionals;
use super::context::Context;
use super::error::TemplateError;
use super::loops::{MissingBlocks, expand_loops};
use super::parser::{TemplateOutline, parse};
use super::strip::strip_unmatched;
use super::substitute::substitute;

/// Render `template` against `context` with default options.
///
/// Never fails: missing keys render as nothing and malformed block tags pass
/// through as literal text.
pub fn render(template: &str, context: &Context) -> String {
    render_with(template, context, MissingBlocks::default())
}

fn render_with(template: &str, context: &Context, missing: MissingBlocks) -> String {
    tracing::debug!(
        "Rendering template ({} bytes) against {} context entr{}",
        template.len(),
        context.entries().len(),
        if context.entries().len() == 1 {
            "y"
        } else {
            "ies"
        }
    );

    // Last entry first: it claims the first occurrence of a shared key, so
    // scalars agree with the merged view the block passes read.
    let mut text = template.to_string();
    for entry in context.entries().iter().rev() {
        text = substitute(&text, entry, None);
    }

    let data = context.merged();
    let text = expand_loops(&text, &data, missing);
    let text = expand_conditionals(&text, &data);
    strip_unmatched(&text)
}

/// Rendering options, usually taken from the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// When false, templates are returned unchanged.
    pub enabled: bool,
    /// Maximum template size in bytes; `None` disables the limit.
    pub max_template_size: Option<usize>,
    /// Handling of loop blocks whose key is absent.
    pub missing_blocks: MissingBlocks,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            max_template_size: Some(crate::constants::DEFAULT_MAX_TEMPLATE_SIZE),
            missing_blocks: MissingBlocks::default(),
        }
    }
}

/// Configured template renderer.
///
/// Holds no state besides its options, so one instance can be shared freely
/// between threads and calls.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    options: RenderOptions,
}

impl TemplateRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `template` against `context`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::TemplateTooLarge`] when the template exceeds
    /// the configured size limit. The passes themselves do not fail.
    pub fn render_template(&self, template: &str, context: &Context) -> Result<String, TemplateError> {
        tracing::debug!("render_template called, enabled={}", self.options.enabled);

        if !self.options.enabled {
            tracing::debug!("Templating disabled, returning content as-is");
            return Ok(template.to_string());
        }

        self.check_size(template)?;
        Ok(render_with(template, context, self.options.missing_blocks))
    }

    /// Parse `template` and summarize its structure.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Syntax`] for unbalanced block tags and
    /// [`TemplateError::TemplateTooLarge`] when the size limit is exceeded.
    pub fn validate(&self, template: &str) -> Result<TemplateOutline, TemplateError> {
        self.check_size(template)?;
        let nodes = parse(template)?;
        let outline = TemplateOutline::from_nodes(&nodes);
        for warning in &outline.warnings {
            tracing::warn!("{}", warning.message);
        }
        Ok(outline)
    }

    fn check_size(&self, template: &str) -> Result<(), TemplateError> {
        match self.options.max_template_size {
            Some(limit) if template.len() > limit => Err(TemplateError::TemplateTooLarge {
                size: template.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}
