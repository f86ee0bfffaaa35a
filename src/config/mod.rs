//! Configuration for the `uxr` tool.
//!
//! A single global TOML file holds the rendering settings; see
//! [`RenderConfig`] for the format and lookup order.

mod global;

pub use global::RenderConfig;
