//! Data values that templates are rendered against.
//!
//! Templates only ever substitute *scalar* values. Sequences and mappings are
//! kept around so that `{{#each}}` blocks can iterate over them, but a
//! placeholder bound to one of them is never replaced by the substitution
//! pass.

use std::collections::BTreeMap;
use std::fmt;

/// A flat, key-ordered mapping from field name to value.
pub type Mapping = BTreeMap<String, Value>;

/// A data value as seen by the template engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value (`null` in JSON). Renders as the empty string.
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Returns `true` for values that the substitution pass will render.
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_))
    }

    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Numeric view of the value, used by ordered comparisons.
    ///
    /// Strings are parsed after trimming; booleans and containers have no
    /// numeric view.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Coerce the value into loop rows.
    ///
    /// Sequences pass through unchanged; anything else becomes a single row.
    pub fn rows(&self) -> Vec<&Value> {
        match self {
            Self::Sequence(items) => items.iter().collect(),
            other => vec![other],
        }
    }

    /// Name of the variant, for log and error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

/// String form used when a value is substituted into a template.
///
/// Integral numbers print without a fractional part so that `10` stays `10`.
/// Containers have no meaningful string form; they print as their kind.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::String(s) => f.write_str(s),
            Self::Sequence(items) => write!(f, "[{} items]", items.len()),
            Self::Mapping(map) => write!(f, "{{{} keys}}", map.len()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}
