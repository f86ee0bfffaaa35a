//! Final cleanup pass.

use std::borrow::Cow;

use super::matcher::{Pattern, replace_matches};

/// Remove every `{{identifier(.identifier)*}}` placeholder still in `text`.
///
/// Block tags such as `{{#each x}}` or `{{/if}}` are not placeholders and
/// are left alone. Running the pass twice is a no-op the second time.
pub fn strip_unmatched(text: &str) -> String {
    let mut stripped = 0usize;
    let out = replace_matches(text, Pattern::Placeholder, |record| {
        tracing::trace!("Stripping unresolved placeholder {}", record.as_str());
        stripped += 1;
        Cow::Borrowed("")
    });
    if stripped > 0 {
        tracing::debug!("Stripped {} unresolved placeholder(s)", stripped);
    }
    out.into_owned()
}
