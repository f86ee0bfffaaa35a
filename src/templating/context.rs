//! Data context normalization.
//!
//! A template can be rendered against a single mapping or an ordered list of
//! mappings. Both shapes normalize to a list: the substitution pass runs once
//! per entry, while the loop and conditional passes read a merged view where
//! later entries override earlier ones.

use std::borrow::Cow;

use super::value::{Mapping, Value};

/// The data a template is rendered against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: Vec<Mapping>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a single mapping.
    pub fn single(mapping: Mapping) -> Self {
        Self {
            entries: vec![mapping],
        }
    }

    /// Create a context from an ordered list of mappings.
    pub fn list(entries: Vec<Mapping>) -> Self {
        Self {
            entries,
        }
    }

    /// Append a mapping. It overrides earlier entries on overlapping keys.
    pub fn push(&mut self, mapping: Mapping) {
        self.entries.push(mapping);
    }

    /// Insert a key into the last mapping, creating one if the context is empty.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if self.entries.is_empty() {
            self.entries.push(Mapping::new());
        }
        if let Some(last) = self.entries.last_mut() {
            last.insert(key.into(), value.into());
        }
    }

    /// The normalized list of mappings, in substitution order.
    pub fn entries(&self) -> &[Mapping] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Mapping::is_empty)
    }

    /// Merged view of all entries, later keys winning.
    ///
    /// Borrows when the context holds exactly one mapping.
    pub fn merged(&self) -> Cow<'_, Mapping> {
        match self.entries.as_slice() {
            [] => Cow::Owned(Mapping::new()),
            [only] => Cow::Borrowed(only),
            many => {
                let mut merged = Mapping::new();
                for entry in many {
                    merged.extend(entry.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                Cow::Owned(merged)
            }
        }
    }
}

impl From<Mapping> for Context {
    fn from(mapping: Mapping) -> Self {
        Self::single(mapping)
    }
}

/// Normalize an arbitrary value into a context.
///
/// A mapping becomes a one-entry context and a sequence contributes each of
/// its mapping elements. Scalars carry no keys and yield an empty context.
impl From<Value> for Context {
    fn from(value: Value) -> Self {
        match value {
            Value::Mapping(mapping) => Self::single(mapping),
            Value::Sequence(items) => {
                let mut entries = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    match item {
                        Value::Mapping(mapping) => entries.push(mapping),
                        other => tracing::debug!(
                            "Skipping context entry {} of kind {} (not a mapping)",
                            index,
                            other.kind()
                        ),
                    }
                }
                Self::list(entries)
            }
            other => {
                tracing::debug!("Context value of kind {} has no keys", other.kind());
                Self::new()
            }
        }
    }
}

impl From<serde_json::Value> for Context {
    fn from(value: serde_json::Value) -> Self {
        Self::from(Value::from(value))
    }
}
