//! Global constants used throughout the crate.
//!
//! Size limits and the locations the configuration is read from live here so
//! the CLI and the library agree on them.

/// Default upper bound on the size of a template accepted by
/// [`TemplateRenderer`](crate::templating::TemplateRenderer) (1 MiB).
pub const DEFAULT_MAX_TEMPLATE_SIZE: usize = 1024 * 1024;

/// Directory under the user's home holding the configuration file.
pub const CONFIG_DIR_NAME: &str = ".uxr";

/// File name of the global configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "UXR_CONFIG";

/// Path argument meaning "read from stdin" or "write to stdout".
pub const STDIO_PATH: &str = "-";
