//! Loading render data from JSON, YAML and TOML files.

use anyhow::{Context as _, Result};
use std::fmt;
use std::path::Path;
use tokio::io::AsyncReadExt;

use crate::constants::STDIO_PATH;
use crate::core::UxrError;
use crate::templating::Context;

/// Serialization format of a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    /// Pick the format from the file extension. Files without an extension
    /// are read as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`UxrError::UnsupportedDataFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, UxrError> {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            return Ok(Self::Json);
        };
        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(UxrError::UnsupportedDataFormat {
                path: path.display().to_string(),
                extension: extension.to_string(),
            }),
        }
    }

    /// Parse `content` into a JSON value tree.
    ///
    /// # Errors
    ///
    /// Returns [`UxrError::DataParse`] when `content` is not valid in this
    /// format.
    pub fn parse(self, content: &str, path: &Path) -> Result<serde_json::Value, UxrError> {
        let parsed = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| UxrError::DataParse {
            path: path.display().to_string(),
            format: self.to_string(),
            reason,
        })
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
            Self::Toml => write!(f, "TOML"),
        }
    }
}

/// Read a file, or stdin when `path` is `-`.
pub(crate) async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new(STDIO_PATH) {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .context("Failed to read from stdin")?;
        return Ok(content);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))
}

/// Build a render context from data files, in order.
///
/// Each file contributes the entries its top-level value normalizes to: an
/// object is one entry, an array contributes its object elements.
///
/// # Errors
///
/// Returns an error if a file cannot be read, has an unsupported extension,
/// or fails to parse.
pub async fn load_context(paths: &[impl AsRef<Path>]) -> Result<Context> {
    let mut context = Context::new();
    for path in paths {
        let path = path.as_ref();
        let format = DataFormat::from_path(path)?;
        let content = read_input(path).await?;
        let value = format.parse(&content, path)?;

        let loaded = Context::from(value);
        tracing::debug!(
            "Loaded {} context entr{} from {} ({format})",
            loaded.entries().len(),
            if loaded.entries().len() == 1 {
                "y"
            } else {
                "ies"
            },
            path.display()
        );
        for entry in loaded.entries() {
            context.push(entry.clone());
        }
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templating::Value;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a.json")).unwrap(), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("a.YML")).unwrap(), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path(Path::new("a.yaml")).unwrap(), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path(Path::new("a.toml")).unwrap(), DataFormat::Toml);
        assert_eq!(DataFormat::from_path(Path::new("data")).unwrap(), DataFormat::Json);
        assert!(matches!(
            DataFormat::from_path(Path::new("a.csv")),
            Err(UxrError::UnsupportedDataFormat { .. })
        ));
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = DataFormat::Yaml.parse("a: [", Path::new("bad.yaml")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse data file 'bad.yaml' as YAML");
    }

    #[test]
    fn test_toml_parses_nested_tables() {
        let value = DataFormat::Toml
            .parse("title = \"x\"\n[[items]]\nname = \"a\"\n", Path::new("d.toml"))
            .unwrap();
        assert_eq!(value["items"][0]["name"], "a");
    }

    #[tokio::test]
    async fn test_load_context_from_several_files() {
        let temp = TempDir::new().unwrap();
        let json = temp.path().join("a.json");
        let yaml = temp.path().join("b.yaml");
        std::fs::write(&json, r#"{"name": "first", "count": 2}"#).unwrap();
        std::fs::write(&yaml, "name: second\n").unwrap();

        let context = load_context(&[&json, &yaml]).await.unwrap();
        assert_eq!(context.entries().len(), 2);
        assert_eq!(context.merged().get("name"), Some(&Value::from("second")));
        assert_eq!(context.merged().get("count"), Some(&Value::from(2.0)));
    }

    #[tokio::test]
    async fn test_load_context_array_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("list.json");
        std::fs::write(&path, r#"[{"a": 1}, 5, {"b": 2}]"#).unwrap();

        let context = load_context(&[&path]).await.unwrap();
        assert_eq!(context.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_context(&[Path::new("/nonexistent/data.json")]).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
