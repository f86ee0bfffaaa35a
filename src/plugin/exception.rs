//! The named exception plugins raise to their callers.

use thiserror::Error;

/// Name carried by every exception raised from this library.
pub const EXCEPTION_NAME: &str = "UXRocket";

/// Slug used when a plugin does not supply a more specific one.
pub const DEFAULT_SLUG: &str = "Generic";

/// Exception value displayed as `"<name> (<slug>): <message>"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} ({slug}): {message}")]
pub struct UxrException {
    pub name: String,
    pub slug: String,
    pub message: String,
}

impl UxrException {
    /// Create an exception with the default slug.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: EXCEPTION_NAME.to_string(),
            slug: DEFAULT_SLUG.to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }
}
