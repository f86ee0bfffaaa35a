//! Pattern matching over template text.
//!
//! Every pass of the renderer locates its constructs through [`find_all`].
//! The compiled patterns are immutable statics and each call performs its
//! own scan, so there is no match cursor shared between calls or threads.
//! The `regex` crate matches in linear time, including the lazy block bodies.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Literal marker separating the true and false branches of a conditional.
pub const ELSE_MARKER: &str = "{{#else}}";

/// A loop key or conditional key.
const KEY: &str = r"[A-Za-z0-9_-]+";

/// A dotted placeholder path.
const PATH: &str = r"[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*";

/// Wrap a tag interior in `{{` and `}}`.
pub(crate) fn tag(inner: &str) -> String {
    format!(r"\{{\{{{inner}\}}\}}")
}

/// Interior of an opening loop tag. Named group: `each_key`.
pub(crate) fn each_open() -> String {
    format!(r"#each\s+(?P<each_key>{KEY})")
}

/// Interior of an opening conditional tag. Named groups: `if_key`, `if_op`,
/// `if_operand`.
pub(crate) fn if_open() -> String {
    format!(
        r#"#if\s+(?P<if_key>{KEY})\s*(?:(?P<if_op>==|!=|>|<)\s*"?(?P<if_operand>[^"}}]*?)"?\s*)?"#
    )
}

/// Interior of a variable placeholder. Named group: `path`.
pub(crate) fn placeholder_path() -> String {
    format!("(?P<path>{PATH})")
}

static LOOP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?s){}(?P<each_body>.*?){}", tag(&each_open()), tag("/each")))
        .expect("loop pattern is valid")
});

static CONDITIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?s){}(?P<if_body>.*?){}", tag(&if_open()), tag("/if")))
        .expect("conditional pattern is valid")
});

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&tag(&placeholder_path())).expect("placeholder pattern is valid")
});

/// The constructs the matcher knows how to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `{{#each KEY}}BODY{{/each}}`. Groups: 1 = KEY, 2 = BODY.
    Loop,
    /// `{{#if KEY [OP ["]VALUE["]]}}BODY{{/if}}`.
    /// Groups: 1 = KEY, 2 = OP, 3 = VALUE, 4 = BODY.
    Conditional,
    /// `{{path}}`. Group 1 = path.
    Placeholder,
}

impl Pattern {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Loop => &LOOP_RE,
            Self::Conditional => &CONDITIONAL_RE,
            Self::Placeholder => &PLACEHOLDER_RE,
        }
    }
}

/// One occurrence of a [`Pattern`] in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord<'t> {
    /// Captured groups in pattern order; `None` for groups that did not participate.
    pub groups: Vec<Option<&'t str>>,
    /// Byte offset of the match start in `source`.
    pub start: usize,
    /// Byte offset one past the match end in `source`.
    pub end: usize,
    /// The text that was scanned.
    pub source: &'t str,
}

impl<'t> MatchRecord<'t> {
    /// Captured group by 1-based index, as in the pattern documentation.
    pub fn group(&self, index: usize) -> Option<&'t str> {
        index.checked_sub(1).and_then(|i| self.groups.get(i).copied().flatten())
    }

    /// The full matched text.
    pub fn as_str(&self) -> &'t str {
        &self.source[self.range()]
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Find every non-overlapping match of `pattern` in `text`.
///
/// Returns an empty vector when nothing matches.
pub fn find_all(text: &str, pattern: Pattern) -> Vec<MatchRecord<'_>> {
    pattern
        .regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(MatchRecord {
                groups: caps.iter().skip(1).map(|g| g.map(|m| m.as_str())).collect(),
                start: whole.start(),
                end: whole.end(),
                source: text,
            })
        })
        .collect()
}

/// Rebuild `text` with every match of `pattern` replaced by `replace`'s output.
///
/// Text between matches is copied verbatim. Returns the input unchanged (and
/// borrowed) when there is no match.
pub fn replace_matches<'t, F>(text: &'t str, pattern: Pattern, mut replace: F) -> Cow<'t, str>
where
    F: FnMut(&MatchRecord<'t>) -> Cow<'t, str>,
{
    let matches = find_all(text, pattern);
    if matches.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for record in &matches {
        out.push_str(&text[cursor..record.start]);
        out.push_str(&replace(record));
        cursor = record.end;
    }
    out.push_str(&text[cursor..]);
    Cow::Owned(out)
}
