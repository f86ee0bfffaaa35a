//! Callback dispatch through an explicit registry.
//!
//! Plugins accept callbacks either as handlers or by name (for example from a
//! `data-` attribute). Names are resolved by lookup in a [`CallbackRegistry`];
//! a string is never evaluated as code.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use strsim::levenshtein;

use super::PluginError;

/// Maximum edit distance for "did you mean" suggestions on unknown names.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// A shareable callback handle.
pub type Handler = Arc<dyn Fn() + Send + Sync>;

/// A callback option as a plugin receives it.
#[derive(Clone, Default)]
pub enum Callback {
    /// Invoke this handler directly.
    Handler(Handler),
    /// Resolve the handler by name through the registry.
    Named(String),
    /// Callback explicitly turned off.
    #[default]
    Disabled,
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Callback::Handler(..)"),
            Self::Named(name) => write!(f, "Callback::Named({name:?})"),
            Self::Disabled => f.write_str("Callback::Disabled"),
        }
    }
}

impl From<&str> for Callback {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

/// Registry mapping callback names to pre-registered handlers.
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    handlers: HashMap<String, Handler>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous handler.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!("Registering callback '{}'", name);
        self.handlers.insert(name, Arc::new(handler));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Invoke `callback`.
    ///
    /// Handlers run directly, names are looked up, and a disabled callback
    /// does nothing. Returns whether a handler ran.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::UnknownCallback`] when a name is not registered.
    pub fn invoke(&self, callback: &Callback) -> Result<bool, PluginError> {
        match callback {
            Callback::Handler(handler) => {
                handler();
                Ok(true)
            }
            Callback::Named(name) => {
                let handler = self.handlers.get(name).ok_or_else(|| {
                    PluginError::UnknownCallback {
                        name: name.clone(),
                        suggestions: self.suggest(name),
                    }
                })?;
                tracing::debug!("Invoking callback '{}'", name);
                handler();
                Ok(true)
            }
            Callback::Disabled => Ok(false),
        }
    }

    fn suggest(&self, name: &str) -> Vec<String> {
        let mut scored: Vec<_> = self
            .handlers
            .keys()
            .map(|known| (levenshtein(name, known), known.clone()))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .collect();
        scored.sort();
        scored.into_iter().take(3).map(|(_, known)| known).collect()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("CallbackRegistry").field("handlers", &names).finish()
    }
}
