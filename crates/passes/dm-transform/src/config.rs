//! Transform configuration, loaded from TOML

use crate::error::ConfigError;
use dm_macro::{AssertGuards, FlagTable, HelperConfig};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the flag that gates every expansion
pub const DEBUG_FLAG: &str = "DEBUG";

fn default_env_source() -> String {
    "@ember/env-flags".to_string()
}

fn default_debug_tools_source() -> String {
    "@ember/debug-tools".to_string()
}

/// Complete transform configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MacroConfig {
    /// Build-environment flags, including `DEBUG`
    #[serde(default)]
    pub env_flags: EnvFlags,

    /// Feature flag sets
    #[serde(default)]
    pub features: Vec<FeatureSet>,

    /// Module the debug macros are imported from
    #[serde(default)]
    pub debug_tools: DebugTools,

    /// External helpers; absent means console primitives
    #[serde(default)]
    pub externalize_helpers: Option<ExternalizeHelpers>,
}

/// Environment flags section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EnvFlags {
    /// Import source of the flags
    #[serde(default = "default_env_source")]
    pub source: String,

    /// Flag values
    #[serde(default)]
    pub flags: IndexMap<String, FlagValue>,
}

impl Default for EnvFlags {
    fn default() -> Self {
        Self {
            source: default_env_source(),
            flags: IndexMap::new(),
        }
    }
}

/// One set of feature flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FeatureSet {
    /// Human-readable name of the set
    #[serde(default)]
    pub name: Option<String>,

    /// Import source of the flags
    pub source: String,

    /// Flag values
    #[serde(default)]
    pub flags: IndexMap<String, FlagValue>,
}

/// Debug tools section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DebugTools {
    /// Import source of `assert`, `warn` and `deprecate`
    #[serde(default = "default_debug_tools_source")]
    pub source: String,

    /// Which `assert` arguments guard the call
    #[serde(default)]
    pub assert_guards: GuardSelection,
}

impl Default for DebugTools {
    fn default() -> Self {
        Self {
            source: default_debug_tools_source(),
            assert_guards: GuardSelection::default(),
        }
    }
}

/// Configured spelling of [`AssertGuards`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuardSelection {
    /// Every bare identifier argument
    #[default]
    AllIdentifiers,
    /// Only an identifier predicate
    Predicate,
    /// No extra guards
    None,
}

impl From<GuardSelection> for AssertGuards {
    fn from(selection: GuardSelection) -> Self {
        match selection {
            GuardSelection::AllIdentifiers => Self::AllIdentifiers,
            GuardSelection::Predicate => Self::PredicateOnly,
            GuardSelection::None => Self::Disabled,
        }
    }
}

/// External helper section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExternalizeHelpers {
    /// Global object carrying the helpers; absent means local helpers
    #[serde(default)]
    pub global: Option<String>,
}

/// Flag value as written in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// `true` is 1, `false` is 0
    Bool(bool),
    /// Used as-is
    Integer(i64),
}

impl FlagValue {
    /// Numeric value emitted into constants
    pub fn value(self) -> i64 {
        match self {
            Self::Bool(flag) => i64::from(flag),
            Self::Integer(value) => value,
        }
    }
}

fn table(flags: &IndexMap<String, FlagValue>) -> FlagTable {
    flags
        .iter()
        .map(|(name, value)| (name.as_str(), value.value()))
        .collect()
}

impl MacroConfig {
    /// Parses and validates a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid configuration or if
    /// two sections claim the same import source.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks that every import source is claimed by one section only
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConflictingSource`] for the first source
    /// claimed twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = vec![self.env_flags.source.as_str(), self.debug_tools.source.as_str()];
        if self.env_flags.source == self.debug_tools.source {
            return Err(ConfigError::ConflictingSource {
                module: self.debug_tools.source.clone(),
            });
        }
        for feature in &self.features {
            if seen.contains(&feature.source.as_str()) {
                return Err(ConfigError::ConflictingSource {
                    module: feature.source.clone(),
                });
            }
            seen.push(feature.source.as_str());
        }
        Ok(())
    }

    /// Helper configuration for the macro builder
    pub fn helper_config(&self) -> HelperConfig {
        HelperConfig::from_options(
            self.externalize_helpers.is_some(),
            self.externalize_helpers
                .as_ref()
                .and_then(|helpers| helpers.global.clone()),
        )
    }

    /// Guard selection for `assert`
    pub fn assert_guards(&self) -> AssertGuards {
        self.debug_tools.assert_guards.into()
    }

    /// Environment flags as a table
    pub fn env_table(&self) -> FlagTable {
        table(&self.env_flags.flags)
    }

    /// Configured value of `DEBUG`
    pub fn debug_value(&self) -> Option<i64> {
        self.env_flags.flags.get(DEBUG_FLAG).map(|value| value.value())
    }

    /// Feature flags importable from `source`, if any set uses it
    pub fn feature_table(&self, source: &str) -> Option<FlagTable> {
        self.features
            .iter()
            .find(|feature| feature.source == source)
            .map(|feature| table(&feature.flags))
    }
}
