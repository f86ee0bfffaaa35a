//! CSS selector escaping.

use std::borrow::Cow;

/// Characters with a special meaning in CSS selectors.
const SPECIAL: &str = " !\"#$%&'()*+,./:;<=>?@[\\]^`{|}~";

/// Escape an ID selector so it can be used with `querySelector`.
///
/// When `selector` starts with `#`, every special character after the `#` is
/// prefixed with a backslash. Any other selector is returned unchanged.
pub fn escape_selector(selector: &str) -> Cow<'_, str> {
    let Some(id) = selector.strip_prefix('#') else {
        return Cow::Borrowed(selector);
    };
    if !id.chars().any(|c| SPECIAL.contains(c)) {
        return Cow::Borrowed(selector);
    }

    let mut escaped = String::with_capacity(selector.len() + 8);
    escaped.push('#');
    for c in id.chars() {
        if SPECIAL.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
