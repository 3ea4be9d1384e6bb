//! Check-config command implementation

use crate::expand::report;
use anyhow::Result;
use colored::Colorize;
use dm_macro::HelperConfig;
use dm_transform::{FlagValue, MacroConfig};
use std::path::Path;

pub fn check_config(path: &Path) -> Result<()> {
    let config =
        MacroConfig::load(path).map_err(|error| report(error, "invalid configuration"))?;

    println!("{} {}", "Valid:".green().bold(), path.display());
    println!(
        "  {} {} [{}]",
        "env flags:".bold(),
        config.env_flags.source,
        flags_line(config.env_flags.flags.iter())
    );
    for feature in &config.features {
        println!(
            "  {} {} [{}]",
            "features:".bold(),
            feature.source,
            flags_line(feature.flags.iter())
        );
    }
    println!("  {} {}", "debug tools:".bold(), config.debug_tools.source);

    let helpers = match config.helper_config() {
        HelperConfig::Console => "console".to_string(),
        HelperConfig::Local => "local helpers".to_string(),
        HelperConfig::Global { namespace } => format!("helpers on `{namespace}`"),
    };
    println!("  {} {helpers}", "diagnostics:".bold());

    if config.debug_value().is_none() {
        println!(
            "  {} no DEBUG value; modules must import it from {}",
            "Warning:".yellow().bold(),
            config.env_flags.source
        );
    }

    Ok(())
}

/// `NAME=value, ..` in configuration order
fn flags_line<'flags>(flags: impl Iterator<Item = (&'flags String, &'flags FlagValue)>) -> String {
    flags
        .map(|(name, value)| format!("{name}={}", value.value()))
        .collect::<Vec<_>>()
        .join(", ")
}
