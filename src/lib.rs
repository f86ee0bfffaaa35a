//! UXRocket templating and plugin helpers.
//!
//! The heart of the crate is a small mustache-style template engine used by
//! UXRocket plugins to build their markup:
//!
//! ```
//! use serde_json::json;
//! use uxr_template::templating::{Context, render};
//!
//! let context = Context::from(json!({
//!     "title": "Menu",
//!     "items": [{"label": "Home"}, {"label": "About"}],
//! }));
//! let html = render("<h3>{{title}}</h3>{{#each items}}<a>{{items.label}}</a>{{/each}}", &context);
//! assert_eq!(html, "<h3>Menu</h3><a>Home</a><a>About</a>");
//! ```
//!
//! # Modules
//!
//! - [`templating`] - the rendering pipeline, template validation and the data model
//! - [`plugin`] - helpers shared by plugins: callbacks, namespaces, selectors, positioning
//! - [`config`] - the global rendering configuration (`~/.uxr/config.toml`)
//! - [`core`] - CLI error types and user-facing error reports
//! - [`cli`] - the `uxr` command line
//! - [`constants`] - limits and file locations shared across modules

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod plugin;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
