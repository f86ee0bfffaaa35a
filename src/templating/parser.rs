//! Recursive-descent parser producing a template AST.
//!
//! The parser understands nesting, which the rendering passes do not. It is
//! used to validate templates: to report unclosed or stray block tags with a
//! location, and to point out constructs that the single-level renderer will
//! leave unresolved.

use std::collections::BTreeSet;

use super::condition::Condition;
use super::error::TemplateError;
use super::lexer::{Token, TokenKind, tokenize};

/// A node of the template AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'t> {
    Text(&'t str),
    Variable(&'t str),
    Loop {
        key: &'t str,
        body: Vec<Node<'t>>,
        /// Byte offset of the opening tag
        offset: usize,
    },
    If {
        condition: Condition,
        then_branch: Vec<Node<'t>>,
        else_branch: Option<Vec<Node<'t>>>,
        offset: usize,
    },
}

/// Why a sequence of nodes ended.
enum Stop {
    End,
    EachClose(usize),
    Else(usize),
    IfClose(usize),
}

impl Stop {
    fn describe(&self) -> &'static str {
        match self {
            Self::End => "end of template",
            Self::EachClose(_) => "{{/each}}",
            Self::Else(_) => "{{#else}}",
            Self::IfClose(_) => "{{/if}}",
        }
    }

    fn offset(&self) -> Option<usize> {
        match self {
            Self::End => None,
            Self::EachClose(at) | Self::Else(at) | Self::IfClose(at) => Some(*at),
        }
    }
}

struct Parser<'t> {
    source: &'t str,
    tokens: std::vec::IntoIter<Token<'t>>,
}

/// Parse `source` into an AST.
///
/// # Errors
///
/// Returns [`TemplateError::Syntax`] for an opening tag without a matching
/// close, a closing tag or `{{#else}}` without an enclosing block, and a
/// second `{{#else}}` in the same conditional.
pub fn parse(source: &str) -> Result<Vec<Node<'_>>, TemplateError> {
    let mut parser = Parser {
        source,
        tokens: tokenize(source).into_iter(),
    };
    let (nodes, stop) = parser.sequence()?;
    match stop {
        Stop::End => Ok(nodes),
        other => Err(parser.unexpected(&other)),
    }
}

impl<'t> Parser<'t> {
    fn sequence(&mut self) -> Result<(Vec<Node<'t>>, Stop), TemplateError> {
        let mut nodes = Vec::new();
        while let Some(token) = self.tokens.next() {
            let offset = token.span.start;
            match token.kind {
                TokenKind::Text(text) => nodes.push(Node::Text(text)),
                TokenKind::Variable(path) => nodes.push(Node::Variable(path)),
                TokenKind::EachOpen(key) => nodes.push(self.loop_block(key, offset)?),
                TokenKind::IfOpen(condition) => nodes.push(self.if_block(condition, offset)?),
                TokenKind::EachClose => return Ok((nodes, Stop::EachClose(offset))),
                TokenKind::Else => return Ok((nodes, Stop::Else(offset))),
                TokenKind::IfClose => return Ok((nodes, Stop::IfClose(offset))),
            }
        }
        Ok((nodes, Stop::End))
    }

    fn loop_block(&mut self, key: &'t str, offset: usize) -> Result<Node<'t>, TemplateError> {
        let (body, stop) = self.sequence()?;
        match stop {
            Stop::EachClose(_) => Ok(Node::Loop {
                key,
                body,
                offset,
            }),
            Stop::End => Err(TemplateError::syntax(
                format!("unclosed {{{{#each {key}}}}}"),
                self.source,
                offset,
            )),
            other => Err(self.unexpected(&other)),
        }
    }

    fn if_block(&mut self, condition: Condition, offset: usize) -> Result<Node<'t>, TemplateError> {
        let unclosed = |source: &str, condition: &Condition| {
            TemplateError::syntax(format!("unclosed {{{{#if {condition}}}}}"), source, offset)
        };

        let (then_branch, stop) = self.sequence()?;
        let else_branch = match stop {
            Stop::IfClose(_) => None,
            Stop::Else(_) => {
                let (branch, stop) = self.sequence()?;
                match stop {
                    Stop::IfClose(_) => Some(branch),
                    Stop::Else(at) => {
                        return Err(TemplateError::syntax(
                            "duplicate {{#else}} in the same {{#if}} block",
                            self.source,
                            at,
                        ));
                    }
                    Stop::End => return Err(unclosed(self.source, &condition)),
                    other => return Err(self.unexpected(&other)),
                }
            }
            Stop::End => return Err(unclosed(self.source, &condition)),
            other => return Err(self.unexpected(&other)),
        };

        Ok(Node::If {
            condition,
            then_branch,
            else_branch,
            offset,
        })
    }

    fn unexpected(&self, stop: &Stop) -> TemplateError {
        let message = match stop {
            Stop::Else(_) => "{{#else}} outside of an {{#if}} block".to_string(),
            other => format!("unexpected {}", other.describe()),
        };
        TemplateError::syntax(message, self.source, stop.offset().unwrap_or(self.source.len()))
    }
}

/// A construct the single-level renderer will not resolve as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub message: String,
    pub offset: usize,
}

/// Summary of a parsed template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateOutline {
    /// Variable placeholders referenced anywhere in the template
    pub variables: BTreeSet<String>,
    /// Keys iterated by `{{#each}}` blocks
    pub loops: BTreeSet<String>,
    /// Keys tested by `{{#if}}` blocks
    pub conditions: BTreeSet<String>,
    /// Deepest block nesting (0 for a template without blocks)
    pub max_depth: usize,
    pub warnings: Vec<ValidationWarning>,
}

impl TemplateOutline {
    pub fn from_nodes(nodes: &[Node<'_>]) -> Self {
        let mut outline = Self::default();
        outline.visit(nodes, &mut Vec::new());
        outline
    }

    fn visit(&mut self, nodes: &[Node<'_>], enclosing: &mut Vec<Enclosing>) {
        self.max_depth = self.max_depth.max(enclosing.len());
        for node in nodes {
            match node {
                Node::Text(_) => {}
                Node::Variable(path) => {
                    self.variables.insert((*path).to_string());
                }
                Node::Loop {
                    key,
                    body,
                    offset,
                } => {
                    self.loops.insert((*key).to_string());
                    if let Some(outer) = enclosing.iter().rev().find_map(Enclosing::loop_key) {
                        self.warnings.push(ValidationWarning {
                            message: format!(
                                "{{{{#each {key}}}}} is nested inside {{{{#each {outer}}}}} and will not be expanded"
                            ),
                            offset: *offset,
                        });
                    }
                    let mut fields = BTreeSet::new();
                    collect_row_fields(key, body, &mut fields);
                    enclosing.push(Enclosing::Loop {
                        key: (*key).to_string(),
                        fields,
                    });
                    self.visit(body, enclosing);
                    enclosing.pop();
                }
                Node::If {
                    condition,
                    then_branch,
                    else_branch,
                    offset,
                } => {
                    self.conditions.insert(condition.key.clone());
                    if enclosing.iter().any(|e| matches!(e, Enclosing::If)) {
                        self.warnings.push(ValidationWarning {
                            message: format!(
                                "{{{{#if {condition}}}}} is nested inside another {{{{#if}}}} and will not be resolved"
                            ),
                            offset: *offset,
                        });
                    } else if let Some(outer) =
                        enclosing.iter().rev().find_map(|e| e.row_reader(&condition.key))
                    {
                        self.warnings.push(ValidationWarning {
                            message: format!(
                                "{{{{#if {condition}}}}} inside {{{{#each {outer}}}}} is evaluated against top-level data, not the loop row"
                            ),
                            offset: *offset,
                        });
                    }
                    enclosing.push(Enclosing::If);
                    self.visit(then_branch, enclosing);
                    if let Some(branch) = else_branch {
                        self.visit(branch, enclosing);
                    }
                    enclosing.pop();
                }
            }
        }
    }
}

enum Enclosing {
    Loop {
        key: String,
        /// Row fields the loop body reads as `{{key.field}}`
        fields: BTreeSet<String>,
    },
    If,
}

impl Enclosing {
    fn loop_key(&self) -> Option<&str> {
        match self {
            Self::Loop {
                key,
                ..
            } => Some(key),
            Self::If => None,
        }
    }

    /// The loop key, if a condition on `name` looks like a test of this
    /// loop's row: `name` is the loop key itself or a field its body reads.
    fn row_reader(&self, name: &str) -> Option<&str> {
        match self {
            Self::Loop {
                key,
                fields,
            } if key == name || fields.contains(name) => Some(key),
            _ => None,
        }
    }
}

/// Collect the first path segment after `key.` of every variable under `nodes`.
fn collect_row_fields(key: &str, nodes: &[Node<'_>], fields: &mut BTreeSet<String>) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Variable(path) => {
                let field = path
                    .strip_prefix(key)
                    .and_then(|rest| rest.strip_prefix('.'))
                    .and_then(|rest| rest.split('.').next());
                if let Some(field) = field {
                    fields.insert(field.to_string());
                }
            }
            Node::Loop {
                body,
                ..
            } => collect_row_fields(key, body, fields),
            Node::If {
                then_branch,
                else_branch,
                ..
            } => {
                collect_row_fields(key, then_branch, fields);
                if let Some(branch) = else_branch {
                    collect_row_fields(key, branch, fields);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templating::condition::Operator;
    use crate::templating::error::ErrorLocation;

    fn syntax_error(source: &str) -> (String, ErrorLocation) {
        match parse(source) {
            Err(TemplateError::Syntax {
                message,
                location,
            }) => (message, *location),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_flat_template() {
        let nodes = parse("Hello {{name}}!").unwrap();
        assert_eq!(nodes, vec![Node::Text("Hello "), Node::Variable("name"), Node::Text("!")]);
    }

    #[test]
    fn test_parse_nested_blocks() {
        let nodes = parse("{{#each a}}{{#if f}}x{{#else}}{{a.y}}{{/if}}{{/each}}").unwrap();
        let expected = vec![Node::Loop {
            key: "a",
            body: vec![Node::If {
                condition: Condition::truthy("f"),
                then_branch: vec![Node::Text("x")],
                else_branch: Some(vec![Node::Variable("a.y")]),
                offset: 11,
            }],
            offset: 0,
        }];
        assert_eq!(nodes, expected);
    }

    #[test]
    fn test_unclosed_each_reports_opening_tag() {
        let (message, location) = syntax_error("line one\n  {{#each items}}{{items.a}}");
        assert_eq!(message, "unclosed {{#each items}}");
        assert_eq!((location.line, location.column), (2, 3));
    }

    #[test]
    fn test_unclosed_if() {
        let (message, _) = syntax_error("{{#if n > 3}}big");
        assert_eq!(message, "unclosed {{#if n > \"3\"}}");
        let (message, _) = syntax_error("{{#if n}}a{{#else}}b");
        assert_eq!(message, "unclosed {{#if n}}");
    }

    #[test]
    fn test_stray_closing_tags() {
        let (message, location) = syntax_error("text {{/if}}");
        assert_eq!(message, "unexpected {{/if}}");
        assert_eq!(location.column, 6);

        let (message, _) = syntax_error("{{#each a}}{{/if}}");
        assert_eq!(message, "unexpected {{/if}}");
    }

    #[test]
    fn test_else_errors() {
        let (message, _) = syntax_error("a {{#else}} b");
        assert_eq!(message, "{{#else}} outside of an {{#if}} block");

        let (message, _) = syntax_error("{{#if a}}1{{#else}}2{{#else}}3{{/if}}");
        assert_eq!(message, "duplicate {{#else}} in the same {{#if}} block");
    }

    #[test]
    fn test_outline_collects_keys_and_depth() {
        let nodes = parse("{{title}}{{#each rows}}{{rows.id}}{{/each}}{{#if n<3}}{{/if}}").unwrap();
        let outline = TemplateOutline::from_nodes(&nodes);
        assert_eq!(outline.variables.iter().collect::<Vec<_>>(), vec!["rows.id", "title"]);
        assert_eq!(outline.loops.iter().collect::<Vec<_>>(), vec!["rows"]);
        assert_eq!(outline.conditions.iter().collect::<Vec<_>>(), vec!["n"]);
        assert_eq!(outline.max_depth, 1);
        assert!(outline.warnings.is_empty());
    }

    #[test]
    fn test_outline_warns_about_unresolved_nesting() {
        let nodes =
            parse("{{#each a}}{{#each b}}{{/each}}{{#if x}}{{a.x}}{{/if}}{{/each}}").unwrap();
        let outline = TemplateOutline::from_nodes(&nodes);
        assert_eq!(outline.max_depth, 2);
        assert_eq!(outline.warnings.len(), 2);
        assert!(outline.warnings[0].message.contains("{{#each b}} is nested inside {{#each a}}"));
        assert!(outline.warnings[1].message.contains("not the loop row"));

        let nodes = parse("{{#if a}}{{#if b}}{{/if}}{{/if}}").unwrap();
        let outline = TemplateOutline::from_nodes(&nodes);
        assert!(outline.warnings[0].message.contains("nested inside another {{#if}}"));
    }

    #[test]
    fn test_operator_conditions_parse() {
        let nodes = parse("{{#if n != 0}}{{/if}}").unwrap();
        assert!(matches!(
            &nodes[0],
            Node::If { condition, .. } if *condition == Condition::compare("n", Operator::Ne, "0")
        ));
    }

    #[test]
    fn test_if_in_loop_warns_only_for_row_fields() {
        let nodes = parse("{{#each xs}}{{#if show}}{{xs.name}}{{/if}}{{/each}}").unwrap();
        assert!(TemplateOutline::from_nodes(&nodes).warnings.is_empty());

        let nodes = parse("{{#each xs}}{{#if name}}{{xs.name}}{{/if}}{{/each}}").unwrap();
        let outline = TemplateOutline::from_nodes(&nodes);
        assert_eq!(outline.warnings.len(), 1);
        assert_eq!(outline.warnings[0].offset, 12);

        let nodes = parse("{{#each xs}}{{#if xs}}y{{/if}}{{/each}}").unwrap();
        assert_eq!(TemplateOutline::from_nodes(&nodes).warnings.len(), 1);
    }
}
