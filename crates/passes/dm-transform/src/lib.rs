//! Debug macro pass over a parsed module
//!
//! This crate plays the host's part around `dm-macro`: it reads the
//! configuration, scans import declarations for flag sources and the debug
//! tools module, recognizes macro calls among the module's statements,
//! feeds them to the builder and applies the collected expansions once the
//! `DEBUG` binding is known.

mod config;
mod error;
mod transform;

pub use config::{
    DEBUG_FLAG, DebugTools, EnvFlags, ExternalizeHelpers, FeatureSet, FlagValue, GuardSelection,
    MacroConfig,
};
pub use error::{ConfigError, TransformError};
pub use transform::{MacroTransform, TransformReport};
