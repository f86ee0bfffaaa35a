//! Helpers shared by UXRocket plugins.
//!
//! These are the collaborators that sit around the templating engine:
//! - [`CallbackRegistry`] dispatches callbacks given as handlers or by name
//! - [`Namespace`] composes plugin class names
//! - [`get_string_variable`] resolves dotted paths in a data tree
//! - [`escape_selector`] escapes ID selectors
//! - [`position`] and [`apply_position`] place an element under an anchor
//! - [`UxrException`] is the named error value plugins raise

mod callback;
mod exception;
mod namespace;
mod position;
mod selector;

pub use callback::{Callback, CallbackRegistry, Handler};
pub use exception::{DEFAULT_SLUG, EXCEPTION_NAME, UxrException};
pub use namespace::{Namespace, get_string_variable};
pub use position::{BoundingRect, Position, StyleTarget, apply_position, position};
pub use selector::escape_selector;

use thiserror::Error;

/// Errors from the plugin helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    /// A callback name was not found in the registry.
    #[error("Callback '{name}' is not registered")]
    UnknownCallback {
        name: String,
        /// Registered names close to `name`
        suggestions: Vec<String>,
    },

    /// A namespace has no class for the requested role.
    #[error("No class registered for '{which}'")]
    UnknownClass {
        which: String,
    },
}
