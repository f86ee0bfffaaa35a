//! Parse a template and report its structure.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::PathBuf;

use super::data::read_input;
use crate::config::RenderConfig;
use crate::core::UxrError;
use crate::templating::{ErrorLocation, TemplateOutline};

/// Validate block structure and list the keys a template uses.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Template file, or `-` for stdin
    template: PathBuf,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,

    /// Print the outline as JSON
    #[arg(long)]
    json: bool,
}

impl CheckCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = RenderConfig::load_with_optional(config_path).await?;
        let source = read_input(&self.template).await?;

        let outline = config.renderer().validate(&source).map_err(UxrError::from)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outline_json(&source, &outline))?);
        } else {
            self.print_outline(&source, &outline);
        }

        if self.strict && !outline.warnings.is_empty() {
            anyhow::bail!(
                "Template '{}' has {} warning(s)",
                self.template.display(),
                outline.warnings.len()
            );
        }
        Ok(())
    }

    fn print_outline(&self, source: &str, outline: &TemplateOutline) {
        println!("{} {}", "✓".green(), format!("{} is well formed", self.template.display()).bold());
        print_keys("Variables", &outline.variables);
        print_keys("Loops", &outline.loops);
        print_keys("Conditions", &outline.conditions);
        println!("  {}: {}", "Max depth".cyan(), outline.max_depth);

        if !outline.warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow());
            for warning in &outline.warnings {
                let location = ErrorLocation::at(source, warning.offset, 0);
                println!("  {}:{} {}", location.line, location.column, warning.message);
            }
        }
    }
}

fn print_keys(label: &str, keys: &BTreeSet<String>) {
    let listed = if keys.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        keys.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    println!("  {}: {}", label.cyan(), listed);
}

fn outline_json(source: &str, outline: &TemplateOutline) -> serde_json::Value {
    let warnings: Vec<_> = outline
        .warnings
        .iter()
        .map(|warning| {
            let location = ErrorLocation::at(source, warning.offset, 0);
            serde_json::json!({
                "line": location.line,
                "column": location.column,
                "message": warning.message,
            })
        })
        .collect();

    serde_json::json!({
        "variables": outline.variables,
        "loops": outline.loops,
        "conditions": outline.conditions,
        "max_depth": outline.max_depth,
        "warnings": warnings,
    })
}
