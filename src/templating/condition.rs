//! Evaluation of `{{#if}}` conditions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::value::{Mapping, Value};

/// Comparison operator of a conditional block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(Self::Eq),
            "!=" => Ok(Self::Ne),
            ">" => Ok(Self::Gt),
            "<" => Ok(Self::Lt),
            other => Err(format!("unknown operator '{other}'")),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
        })
    }
}

/// A single comparison between a data field and a literal operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub key: String,
    pub operator: Option<Operator>,
    pub operand: Option<String>,
}

impl Condition {
    /// A plain truthiness check on `key`.
    pub fn truthy(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: None,
            operand: None,
        }
    }

    pub fn compare(key: impl Into<String>, operator: Operator, operand: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: Some(operator),
            operand: Some(operand.into()),
        }
    }

    /// Evaluate the condition against `data`.
    ///
    /// Absent data behaves like an empty mapping. A key missing from the data
    /// makes every form of the condition false, `!=` included.
    pub fn evaluate(&self, data: Option<&Mapping>) -> bool {
        let Some(value) = data.and_then(|d| d.get(&self.key)) else {
            return false;
        };

        let Some(operator) = self.operator else {
            return *value != Value::Bool(false);
        };

        let operand = self.operand.as_deref().unwrap_or_default();
        match operator {
            Operator::Eq => value.to_string() == operand,
            Operator::Ne => value.to_string() != operand,
            Operator::Gt => compare(value, operand) == Some(Ordering::Greater),
            Operator::Lt => compare(value, operand) == Some(Ordering::Less),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        if let Some(op) = self.operator {
            write!(f, " {op} \"{}\"", self.operand.as_deref().unwrap_or_default())?;
        }
        Ok(())
    }
}

/// Numeric ordering when both sides are numbers, lexical ordering otherwise.
fn compare(value: &Value, operand: &str) -> Option<Ordering> {
    match (value.as_number(), operand.trim().parse::<f64>()) {
        (Some(lhs), Ok(rhs)) => lhs.partial_cmp(&rhs),
        _ => Some(value.to_string().as_str().cmp(operand)),
    }
}
