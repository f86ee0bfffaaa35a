//! String templating engine for UXRocket plugins.
//!
//! Templates are plain text with `{{...}}` tokens, rendered against a data
//! [`Context`] by a fixed sequence of passes.
//!
//! # Syntax
//!
//! | Token | Syntax |
//! |---|---|
//! | Variable | `{{key}}` or `{{prefix.key}}` |
//! | Loop | `{{#each key}} body {{/each}}` |
//! | Conditional | `{{#if key}}`, `{{#if key OP value}}` with `OP` one of `== != > <`, optional `{{#else}}`, closed by `{{/if}}` |
//!
//! Conditional operands may be quoted: `{{#if name == "Jane Roe"}}`.
//!
//! # Passes
//!
//! 1. **Substitution** - every scalar key of every context entry replaces the
//!    first matching `{{key}}`. Entries run from last to first, so with a
//!    context list the later entry wins for a shared key, as it does in the
//!    block passes. Keys work on the shared text: a value that itself contains
//!    `{{other}}` is resolved if `other` is substituted afterwards, and left
//!    for stripping otherwise.
//! 2. **Loops** - each `{{#each key}}` block is rendered once per row of
//!    `key`, with `{{key.field}}` bound to the row's fields.
//! 3. **Conditionals** - each `{{#if}}` block is replaced by the branch its
//!    condition selects. Conditions read top-level data only.
//! 4. **Stripping** - any `{{path}}` placeholder still present is removed.
//!
//! Blocks do not nest. A block body runs up to the first closing tag of the
//! same kind, so a nested block of the same kind breaks matching and its tags
//! remain in the output as literal text. A conditional inside a loop is copied
//! once per row and then resolved against top-level data. Use
//! [`TemplateRenderer::validate`] to find such constructs ahead of time.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use uxr_template::templating::{Context, render};
//!
//! let data = Context::from(json!({
//!     "name": "World",
//!     "items": [{"val": "1"}, {"val": "2"}],
//!     "count": 10
//! }));
//!
//! let out = render(
//!     "Hello {{name}}! {{#each items}}[{{items.val}}]{{/each}} {{#if count>5}}Big{{/if}}",
//!     &data,
//! );
//! assert_eq!(out, "Hello World! [1][2] Big");
//! ```

mod condition;
mod conditionals;
mod context;
mod error;
mod lexer;
mod loops;
mod matcher;
mod parser;
mod renderer;
mod strip;
mod substitute;
mod value;


pub use condition::{Condition, Operator};
pub use context::Context;
pub use error::{ErrorLocation, TemplateError};
pub use loops::MissingBlocks;
pub use parser::{Node, TemplateOutline, ValidationWarning, parse};
pub use renderer::{RenderOptions, TemplateRenderer, render};
pub use value::{Mapping, Value};
