//! Tokenizer for the template mini-grammar.
//!
//! Splits a template into literal text and recognized tags, each carrying its
//! byte span. Braced sequences that are not valid tags (`{{ spaced }}`,
//! `{{#unknown}}`) are literal text, exactly as the rendering passes treat
//! them.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::condition::{Condition, Operator};
use super::matcher::{each_open, if_open, placeholder_path, tag};

/// Any recognized tag, built from the same interiors the rendering passes
/// match so both agree on what is a tag.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = format!(
        "(?:(?P<each_close>/each)|(?P<else>#else)|(?P<if_close>/if)|{}|{}|{})",
        each_open(),
        if_open(),
        placeholder_path()
    );
    Regex::new(&tag(&alternatives)).expect("tag pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'t> {
    Text(&'t str),
    Variable(&'t str),
    EachOpen(&'t str),
    EachClose,
    IfOpen(Condition),
    Else,
    IfClose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'t> {
    pub kind: TokenKind<'t>,
    pub span: Range<usize>,
}

/// Split `text` into tokens. Adjacent literal text is merged into one token.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;

    for caps in TAG_RE.captures_iter(text) {
        let (Some(whole), Some(kind)) = (caps.get(0), classify(&caps)) else {
            continue;
        };
        if text_start < whole.start() {
            tokens.push(Token {
                kind: TokenKind::Text(&text[text_start..whole.start()]),
                span: text_start..whole.start(),
            });
        }
        tokens.push(Token {
            kind,
            span: whole.range(),
        });
        text_start = whole.end();
    }

    if text_start < text.len() {
        tokens.push(Token {
            kind: TokenKind::Text(&text[text_start..]),
            span: text_start..text.len(),
        });
    }

    tokens
}

fn classify<'t>(caps: &Captures<'t>) -> Option<TokenKind<'t>> {
    if caps.name("each_close").is_some() {
        return Some(TokenKind::EachClose);
    }
    if caps.name("else").is_some() {
        return Some(TokenKind::Else);
    }
    if caps.name("if_close").is_some() {
        return Some(TokenKind::IfClose);
    }
    if let Some(key) = caps.name("each_key") {
        return Some(TokenKind::EachOpen(key.as_str()));
    }
    if let Some(key) = caps.name("if_key") {
        let operator = caps.name("if_op").and_then(|op| op.as_str().parse::<Operator>().ok());
        let operand =
            operator.map(|_| caps.name("if_operand").map_or("", |m| m.as_str()).to_string());
        return Some(TokenKind::IfOpen(Condition {
            key: key.as_str().to_string(),
            operator,
            operand,
        }));
    }
    caps.name("path").map(|path| TokenKind::Variable(path.as_str()))
}
