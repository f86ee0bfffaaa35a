//! Scalar variable substitution.

use super::value::Mapping;

/// Replace `{{key}}` (or `{{prefix.key}}`) placeholders with scalar values from `record`.
///
/// Only the **first** occurrence of each placeholder is replaced per call.
/// Callers run this once per context entry or loop row, and anything still
/// unresolved afterwards is removed by the stripping pass. Keys whose value
/// is a sequence or mapping are skipped.
pub fn substitute(text: &str, record: &Mapping, prefix: Option<&str>) -> String {
    let mut out = text.to_string();
    for (key, value) in record {
        if !value.is_scalar() {
            continue;
        }
        let token = placeholder(prefix, key);
        if out.contains(&token) {
            tracing::trace!("Substituting {} ({})", token, value.kind());
            out = out.replacen(&token, &value.to_string(), 1);
        }
    }
    out
}

/// Build the placeholder token for `key`, e.g. `{{items.val}}`.
pub(crate) fn placeholder(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{{{{{prefix}.{key}}}}}"),
        None => format!("{{{{{key}}}}}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templating::value::Value;

    fn record(pairs: &[(&str, Value)]) -> Mapping {
        pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
    }

    #[test]
    fn test_placeholder_tokens() {
        assert_eq!(placeholder(None, "name"), "{{name}}");
        assert_eq!(placeholder(Some("items"), "val"), "{{items.val}}");
    }

    #[test]
    fn test_substitutes_scalars() {
        let data = record(&[
            ("name", Value::from("World")),
            ("count", Value::Number(3.0)),
            ("ok", Value::Bool(true)),
        ]);
        assert_eq!(
            substitute("Hello {{name}}! {{count}} {{ok}}", &data, None),
            "Hello World! 3 true"
        );
    }

    #[test]
    fn test_only_first_occurrence_per_call() {
        let data = record(&[("x", Value::from("1"))]);
        assert_eq!(substitute("{{x}}{{x}}", &data, None), "1{{x}}");
    }

    #[test]
    fn test_prefix_only_matches_prefixed_tokens() {
        let data = record(&[("val", Value::from("v"))]);
        assert_eq!(substitute("{{val}} {{items.val}}", &data, Some("items")), "{{val}} v");
    }

    #[test]
    fn test_skips_containers_and_missing_keys() {
        let data = record(&[
            ("list", Value::Sequence(vec![Value::from("a")])),
            ("map", Value::Mapping(Mapping::new())),
        ]);
        assert_eq!(
            substitute("{{list}} {{map}} {{missing}}", &data, None),
            "{{list}} {{map}} {{missing}}"
        );
    }

    #[test]
    fn test_null_renders_empty() {
        let data = record(&[("gone", Value::Null)]);
        assert_eq!(substitute("[{{gone}}]", &data, None), "[]");
    }
}
