//! Expand command implementation

use crate::OutputFormat;
use anyhow::{Context, Result};
use colored::Colorize;
use dm_syntax::Module;
use dm_transform::{MacroConfig, MacroTransform};
use miette::{Diagnostic, Report};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Prints a diagnostic-carrying error through miette and hands back a
/// plain error for the exit status
pub fn report<E>(error: E, what: &str) -> anyhow::Error
where
    E: Diagnostic + Send + Sync + 'static,
{
    eprintln!("{:?}", Report::new(error));
    anyhow::anyhow!("{what}")
}

pub fn expand(
    module_path: &Path,
    config_path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let config = MacroConfig::load(config_path)
        .map_err(|error| report(error, "could not load configuration"))?;

    let source = fs::read_to_string(module_path)
        .with_context(|| format!("Failed to read module {}", module_path.display()))?;
    let mut module: Module = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse module {}", module_path.display()))?;
    debug!(path = %module_path.display(), statements = module.len(), "loaded module");

    let summary = MacroTransform::new(&config)
        .run(&mut module)
        .map_err(|error| report(error, "expansion failed"))?;

    let rendered = match format {
        OutputFormat::Js => module.to_string(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&module)?;
            json.push('\n');
            json
        }
    };

    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }

    eprintln!(
        "{} {} macro call(s), emitted {} constant(s), removed {} import(s)",
        "Expanded".green().bold(),
        summary.expanded,
        summary.constants,
        summary.removed_imports
    );

    Ok(())
}
