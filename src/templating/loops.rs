//! Expansion of `{{#each KEY}}...{{/each}}` blocks.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::matcher::{Pattern, replace_matches};
use super::substitute::{placeholder, substitute};
use super::value::{Mapping, Value};

/// What to do with a loop block whose key is absent from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingBlocks {
    /// Leave the block in the text. Its tags and literal text survive; inner
    /// variable placeholders are removed by the stripping pass.
    #[default]
    Preserve,
    /// Remove the whole block, tags included.
    Remove,
}

/// Expand every loop block in `text` against `data`.
///
/// Each row of `data[KEY]` renders the body once with `KEY` as the
/// placeholder prefix, and the block is replaced by the concatenated rows.
/// A sequence yields one row per element; any other value is a single row.
pub fn expand_loops(text: &str, data: &Mapping, missing: MissingBlocks) -> String {
    let mut expanded = 0usize;
    let out = replace_matches(text, Pattern::Loop, |record| {
        let key = record.group(1).unwrap_or_default();
        let body = record.group(2).unwrap_or_default();

        let Some(source) = data.get(key) else {
            return match missing {
                MissingBlocks::Preserve => {
                    tracing::debug!("Loop key '{}' not found, leaving block in place", key);
                    Cow::Borrowed(record.as_str())
                }
                MissingBlocks::Remove => {
                    tracing::debug!("Loop key '{}' not found, removing block", key);
                    Cow::Borrowed("")
                }
            };
        };

        let rows = source.rows();
        tracing::debug!("Expanding loop '{}' over {} row(s)", key, rows.len());
        expanded += 1;

        let rendered: String = rows.into_iter().map(|row| render_row(body, key, row)).collect();
        Cow::Owned(rendered)
    });

    tracing::debug!("Loop pass expanded {} block(s)", expanded);
    out.into_owned()
}

/// Render one loop row.
///
/// Mapping rows bind `{{KEY.field}}`; a scalar row binds the bare `{{KEY}}`.
fn render_row(body: &str, key: &str, row: &Value) -> String {
    match row {
        Value::Mapping(fields) => substitute(body, fields, Some(key)),
        scalar if scalar.is_scalar() => {
            body.replacen(&placeholder(None, key), &scalar.to_string(), 1)
        }
        other => {
            tracing::trace!("Loop '{}' row of kind {} binds nothing", key, other.kind());
            body.to_string()
        }
    }
}
