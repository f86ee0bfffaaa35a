//! Plugin namespaces: class name composition and string-variable lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::PluginError;
use crate::templating::Value;

/// Naming information a plugin uses to build its CSS class names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Shared prefix, e.g. `uxr-`
    pub prefix: String,
    /// Plugin name, e.g. `tooltip`
    pub name: String,
    /// Class suffixes by role, e.g. `wrap -> wrapper`
    #[serde(default)]
    pub classes: HashMap<String, String>,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
            classes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_class(mut self, which: impl Into<String>, class: impl Into<String>) -> Self {
        self.classes.insert(which.into(), class.into());
        self
    }

    /// Compose `prefix + name + "-" + classes[which]`.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::UnknownClass`] when `which` has no class entry.
    pub fn classname(&self, which: &str) -> Result<String, PluginError> {
        let class = self.classes.get(which).ok_or_else(|| PluginError::UnknownClass {
            which: which.to_string(),
        })?;
        Ok(format!("{}{}-{}", self.prefix, self.name, class))
    }
}

/// Resolve a dot-separated `path` against `root`.
///
/// Every segment but the last must name a mapping. Returns `None` as soon as
/// a segment is missing.
pub fn get_string_variable<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(root, |current, segment| current.as_mapping()?.get(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classname() {
        let ns = Namespace::new("uxr-", "tooltip").with_class("wrap", "wrapper");
        assert_eq!(ns.classname("wrap").unwrap(), "uxr-tooltip-wrapper");
    }

    #[test]
    fn test_classname_unknown_role() {
        let ns = Namespace::new("uxr-", "tooltip");
        assert_eq!(
            ns.classname("ready").unwrap_err(),
            PluginError::UnknownClass {
                which: "ready".to_string()
            }
        );
    }

    #[test]
    fn test_namespace_deserializes() {
        let ns: Namespace = serde_json::from_value(json!({
            "prefix": "uxr-",
            "name": "modal",
            "classes": {"ready": "ready"}
        }))
        .unwrap();
        assert_eq!(ns.classname("ready").unwrap(), "uxr-modal-ready");
    }

    #[test]
    fn test_get_string_variable() {
        let root = Value::from(json!({
            "app": {"settings": {"theme": "dark"}},
            "onReady": "init"
        }));
        assert_eq!(get_string_variable(&root, "onReady"), Some(&Value::from("init")));
        assert_eq!(
            get_string_variable(&root, "app.settings.theme"),
            Some(&Value::from("dark"))
        );
        assert!(matches!(get_string_variable(&root, "app.settings"), Some(Value::Mapping(_))));
        assert_eq!(get_string_variable(&root, "app.missing.theme"), None);
        assert_eq!(get_string_variable(&root, "onReady.deeper"), None);
    }
}
