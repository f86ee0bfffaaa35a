//! Error handling for the `uxr` command line.
//!
//! The library modules raise narrow errors ([`TemplateError`],
//! [`PluginError`]); the CLI works in [`anyhow::Result`] and converts whatever
//! reaches `main` into an [`ErrorContext`] through [`user_friendly_error`].
//! The context pairs the error with optional details and a suggestion and
//! prints them in color:
//!
//! ```text
//! error: Failed to parse data file 'data.json' as JSON
//! details: expected value at line 1 column 1
//! suggestion: Check the file contents or pass a file with a .json, .yaml or .toml extension
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::plugin::PluginError;
use crate::templating::TemplateError;

/// Application-level errors raised by the CLI layer.
#[derive(Error, Debug)]
pub enum UxrError {
    /// Template parsing or rendering failed
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A plugin helper rejected its input
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// A data file could not be parsed in its format
    #[error("Failed to parse data file '{path}' as {format}")]
    DataParse {
        path: String,
        format: String,
        reason: String,
    },

    /// A data file extension names no supported format
    #[error("Unsupported data format '{extension}' for '{path}'")]
    UnsupportedDataFormat {
        path: String,
        extension: String,
    },

    /// The configuration file is invalid
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// An error paired with optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    pub error: anyhow::Error,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl ErrorContext {
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable step for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add an explanation of what went wrong.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: the error in red, details in yellow and the
    /// suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error reaching the CLI into an [`ErrorContext`].
///
/// Known error types get tailored details and suggestions; anything else is
/// wrapped with its cause chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(uxr_error) = error.downcast_ref::<UxrError>() {
        let (details, suggestion) = describe_uxr_error(uxr_error);
        return attach(ErrorContext::new(error), details, suggestion);
    }

    if let Some(template_error) = error.downcast_ref::<TemplateError>() {
        let (details, suggestion) = describe_template_error(template_error);
        return attach(ErrorContext::new(error), details, suggestion);
    }

    if let Some(plugin_error) = error.downcast_ref::<PluginError>() {
        let (details, suggestion) = describe_plugin_error(plugin_error);
        return attach(ErrorContext::new(error), details, suggestion);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let suggestion = match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                Some("Check that the file or directory exists and the path is correct")
            }
            std::io::ErrorKind::PermissionDenied => {
                Some("Check the file permissions or run from a directory you own")
            }
            _ => None,
        };
        let details = chain_details(&error);
        return attach(ErrorContext::new(error), details, suggestion.map(str::to_string));
    }

    if error.downcast_ref::<toml::de::Error>().is_some() {
        let details = chain_details(&error);
        return ErrorContext::new(error)
            .with_details(details.unwrap_or_default())
            .with_suggestion(
                "Check the TOML syntax. Verify quotes, brackets, and that keys are not repeated",
            );
    }

    let details = chain_details(&error);
    attach(ErrorContext::new(error), details, None)
}

fn attach(
    mut context: ErrorContext,
    details: Option<String>,
    suggestion: Option<String>,
) -> ErrorContext {
    context.details = details;
    context.suggestion = suggestion;
    context
}

/// The causes below the top-level message, one per line.
fn chain_details(error: &anyhow::Error) -> Option<String> {
    let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if causes.is_empty() {
        None
    } else {
        Some(causes.join("\n  caused by: "))
    }
}

fn describe_uxr_error(error: &UxrError) -> (Option<String>, Option<String>) {
    match error {
        UxrError::Template(inner) => describe_template_error(inner),
        UxrError::Plugin(inner) => describe_plugin_error(inner),
        UxrError::DataParse {
            reason,
            ..
        } => (
            Some(reason.clone()),
            Some(
                "Check the file contents or pass a file with a .json, .yaml or .toml extension"
                    .to_string(),
            ),
        ),
        UxrError::UnsupportedDataFormat {
            ..
        } => (
            Some("Data files are read as JSON, YAML or TOML based on their extension".to_string()),
            Some("Rename the file to use a .json, .yaml, .yml or .toml extension".to_string()),
        ),
        UxrError::ConfigError {
            ..
        } => (None, Some("Run 'uxr config show' to inspect the effective configuration".to_string())),
        UxrError::IoError(_) | UxrError::TomlError(_) | UxrError::JsonError(_) => (None, None),
    }
}

fn describe_template_error(error: &TemplateError) -> (Option<String>, Option<String>) {
    match error {
        TemplateError::Syntax {
            ..
        } => (
            Some(error.format_with_context()),
            Some("Run 'uxr check <TEMPLATE>' to see the template outline".to_string()),
        ),
        TemplateError::TemplateTooLarge {
            ..
        } => (
            None,
            Some("Raise max_template_size in the configuration, or set it to 0 to disable the limit"
                .to_string()),
        ),
    }
}

fn describe_plugin_error(error: &PluginError) -> (Option<String>, Option<String>) {
    match error {
        PluginError::UnknownCallback {
            suggestions,
            ..
        } if !suggestions.is_empty() => {
            (None, Some(format!("Did you mean: {}?", suggestions.join(", "))))
        }
        PluginError::UnknownCallback {
            ..
        } => (None, Some("Register the callback before invoking it".to_string())),
        PluginError::UnknownClass {
            which,
        } => (None, Some(format!("Add a '{which}' entry to the namespace classes"))),
    }
}
