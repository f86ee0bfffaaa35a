//! Template error handling.
//!
//! Rendering itself never fails. These errors come from the parser (structural
//! validation) and from the configured [`TemplateRenderer`](super::TemplateRenderer),
//! which enforces the size limit.

use thiserror::Error;

/// Errors produced while validating or preparing a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A block tag without its counterpart, or an `{{#else}}` in the wrong place.
    #[error("Template syntax error at {}:{}: {message}", .location.line, .location.column)]
    Syntax {
        message: String,
        location: Box<ErrorLocation>,
    },

    /// The template exceeds the configured `max_template_size`.
    #[error("Template is {size} bytes, exceeding the limit of {limit} bytes")]
    TemplateTooLarge {
        size: usize,
        limit: usize,
    },
}

/// Where in the template an error was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLocation {
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
    /// Source lines around the error, with their 1-based line numbers
    pub context_lines: Vec<(usize, String)>,
}

impl ErrorLocation {
    /// Locate byte `offset` in `source`, keeping `context_size` lines around it.
    pub fn at(source: &str, offset: usize, context_size: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;

        Self {
            line,
            column,
            context_lines: extract_context_lines(source, line, context_size),
        }
    }
}

impl TemplateError {
    pub(crate) fn syntax(message: impl Into<String>, source: &str, offset: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            location: Box::new(ErrorLocation::at(source, offset, 2)),
        }
    }

    /// Generate a user-friendly error report with a source excerpt and a suggestion.
    pub fn format_with_context(&self) -> String {
        match self {
            Self::Syntax {
                message,
                location,
            } => format_syntax_error(message, location),
            Self::TemplateTooLarge {
                size,
                limit,
            } => {
                let mut msg = String::new();
                msg.push_str("ERROR: Template Too Large\n\n");
                msg.push_str(&format!("Size: {size} bytes\n"));
                msg.push_str(&format!("Limit: {limit} bytes\n\n"));
                msg.push_str(
                    "SUGGESTION: Split the template, or raise `max_template_size` in the config \
                     (0 disables the limit).\n",
                );
                msg
            }
        }
    }
}

fn format_syntax_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Syntax Error\n\n");
    msg.push_str(&format!("Error: {message}\n"));
    msg.push_str(&format!("Line: {}, column: {}\n", location.line, location.column));

    if !location.context_lines.is_empty() {
        msg.push('\n');
        let width = location.context_lines.last().map_or(1, |(n, _)| n.to_string().len());
        for (number, text) in &location.context_lines {
            let marker = if *number == location.line {
                ">"
            } else {
                " "
            };
            msg.push_str(&format!("{marker} {number:>width$} | {text}\n"));
        }
    }

    msg.push_str("\nSUGGESTION: Check that every block tag is closed.\n");
    msg.push_str("Common issues:\n");
    msg.push_str("  - {{#each key}} without a matching {{/each}}\n");
    msg.push_str("  - {{#if key}} without a matching {{/if}}\n");
    msg.push_str("  - {{#else}} outside of an {{#if}} block\n");

    msg
}

/// Extract up to `context_size` lines before and after `error_line` (1-based).
fn extract_context_lines(
    content: &str,
    error_line: usize,
    context_size: usize,
) -> Vec<(usize, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return Vec::new();
    }

    let start = error_line.saturating_sub(context_size + 1);
    let end = (error_line + context_size).min(total_lines);

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(idx, line)| (start + idx + 1, (*line).to_string()))
        .collect()
}
