//! Fixture loading for end-to-end expansion tests

use anyhow::{Context, Result};
use dm_syntax::Module;
use dm_transform::{MacroConfig, MacroTransform, TransformError, TransformReport};

/// A module fixture paired with its configuration
pub struct Fixture {
    /// Module as handed over by the host parser
    pub module: Module,
    /// Transform configuration
    pub config: MacroConfig,
}

impl Fixture {
    /// Parses a JSON module and a TOML configuration
    ///
    /// # Errors
    ///
    /// Returns an error if either input is malformed
    pub fn parse(module_json: &str, config_toml: &str) -> Result<Self> {
        let module = serde_json::from_str(module_json).context("Failed to parse module fixture")?;
        let config =
            MacroConfig::from_toml_str(config_toml).context("Failed to parse config fixture")?;
        Ok(Self { module, config })
    }

    /// Runs the transform, returning the printed module and the report
    ///
    /// # Errors
    ///
    /// Returns the transform error unchanged
    pub fn expand(mut self) -> Result<(String, TransformReport), TransformError> {
        let report = MacroTransform::new(&self.config).run(&mut self.module)?;
        Ok((self.module.to_string(), report))
    }
}
