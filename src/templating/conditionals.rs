//! Resolution of `{{#if ...}}...{{#else}}...{{/if}}` blocks.

use std::borrow::Cow;

use super::condition::{Condition, Operator};
use super::matcher::{ELSE_MARKER, MatchRecord, Pattern, replace_matches};
use super::value::Mapping;

/// Resolve every conditional block in `text` against the top-level `data`.
///
/// The body is split on the first `{{#else}}`. The block is replaced by the
/// true branch when the condition holds, otherwise by the false branch, or by
/// nothing when there is no false branch. Conditions never see loop rows.
pub fn expand_conditionals(text: &str, data: &Mapping) -> String {
    let mut resolved = 0usize;
    let out = replace_matches(text, Pattern::Conditional, |record| {
        let condition = condition_from(record);
        let body = record.group(4).unwrap_or_default();
        let (when_true, when_false) = match body.split_once(ELSE_MARKER) {
            Some((t, f)) => (t, Some(f)),
            None => (body, None),
        };

        let holds = condition.evaluate(Some(data));
        tracing::debug!("Condition '{}' evaluated to {}", condition, holds);
        resolved += 1;

        Cow::Borrowed(if holds {
            when_true
        } else {
            when_false.unwrap_or_default()
        })
    });

    tracing::debug!("Conditional pass resolved {} block(s)", resolved);
    out.into_owned()
}

/// Build a [`Condition`] from the groups of a conditional match.
fn condition_from(record: &MatchRecord<'_>) -> Condition {
    let key = record.group(1).unwrap_or_default();
    // The pattern only admits valid operators; a parse failure means none.
    let operator = record.group(2).and_then(|op| op.parse::<Operator>().ok());
    Condition {
        key: key.to_string(),
        operator,
        operand: operator.map(|_| record.group(3).unwrap_or_default().to_string()),
    }
}
