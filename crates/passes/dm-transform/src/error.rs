//! Error types for configuration and the module transform

use dm_macro::{MacroExpansionError, MacroKind};
use dm_span::Span;
use miette::Diagnostic;
use std::io;
use std::path::PathBuf;

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read configuration file {}", .path.display())]
    #[diagnostic(code(config::read))]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        error: io::Error,
    },

    /// Configuration is not valid TOML or has unexpected keys
    #[error("invalid configuration")]
    #[diagnostic(code(config::parse))]
    Parse(#[from] toml::de::Error),

    /// Two sections use the same import source
    #[error("import source `{module}` is configured more than once")]
    #[diagnostic(
        code(config::conflicting_source),
        help("env flags, feature sets and debug tools each need their own source")
    )]
    ConflictingSource {
        /// The shared source
        module: String,
    },
}

/// Errors raised while transforming a module
#[derive(Debug, Clone, thiserror::Error, Diagnostic)]
pub enum TransformError {
    /// A macro call or flag import is invalid
    #[error("macro expansion failed at {span}")]
    #[diagnostic(code(transform::macro_expansion))]
    Macro {
        /// What went wrong
        #[source]
        #[diagnostic_source]
        source: MacroExpansionError,
        /// Statement that triggered the failure
        span: Span,
    },

    /// A recognized macro call has the wrong argument shape
    #[error("malformed `{kind}` call at {span}: {reason}")]
    #[diagnostic(code(transform::malformed_macro))]
    MalformedMacro {
        /// Macro being called
        kind: MacroKind,
        /// What is wrong with the arguments
        reason: &'static str,
        /// Statement holding the call
        span: Span,
    },

    /// The debug tools module was asked for something it does not export
    #[error("`{name}` is not a debug macro exported by {module}")]
    #[diagnostic(
        code(transform::unknown_debug_tool),
        help("the debug tools export `assert`, `warn` and `deprecate`")
    )]
    UnknownDebugTool {
        /// Imported name
        name: String,
        /// Debug tools source
        module: String,
        /// Import statement
        span: Span,
    },

    /// A debug macro is imported under an alias while helpers are local
    #[error("`{name}` is imported as `{local}` but local helpers are called as `{name}`")]
    #[diagnostic(
        code(transform::aliased_local_helper),
        help("import `{name}` without an alias, or configure a global helper namespace")
    )]
    AliasedLocalHelper {
        /// Imported macro name
        name: String,
        /// Alias it is bound to
        local: String,
        /// Import statement
        span: Span,
    },

    /// Macros are used, `DEBUG` is not imported and has no configured value
    #[error("debug macros are used but no `DEBUG` flag is configured for {module}")]
    #[diagnostic(
        code(transform::missing_debug_flag),
        help("set `DEBUG` under [env-flags.flags] or import it from {module}")
    )]
    MissingDebugFlag {
        /// Environment flags source
        module: String,
    },
}
