//! Choosing the call a diagnostic macro expands to

use dm_syntax::Expr;
use std::fmt;

/// Object whose methods serve as the built-in diagnostic primitives
pub const CONSOLE: &str = "console";

/// Diagnostic macro kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroKind {
    /// `assert(predicate, message)`
    Assert,
    /// `warn(message)`
    Warn,
    /// `deprecate(message, predicate, meta)`
    Deprecate,
}

impl MacroKind {
    /// All kinds, in a stable order
    pub const ALL: [Self; 3] = [Self::Assert, Self::Warn, Self::Deprecate];

    /// Name of the external helper function, and of the macro itself
    pub fn helper_name(self) -> &'static str {
        match self {
            Self::Assert => "assert",
            Self::Warn => "warn",
            Self::Deprecate => "deprecate",
        }
    }

    /// Console method used when no helpers are configured
    pub fn console_method(self) -> &'static str {
        match self {
            Self::Assert => "assert",
            Self::Warn | Self::Deprecate => "warn",
        }
    }

    /// Looks a kind up by its macro name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.helper_name() == name)
    }
}

impl fmt::Display for MacroKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.helper_name())
    }
}

/// Where the diagnostic call of an expansion is directed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HelperConfig {
    /// `console.<method>(..)`
    #[default]
    Console,
    /// `<helper>(..)`, resolved against the module's own bindings
    Local,
    /// `<namespace>.<helper>(..)`
    Global {
        /// Global object carrying the helpers
        namespace: String,
    },
}

impl HelperConfig {
    /// Builds the configuration from the "helpers enabled" switch and an
    /// optional global namespace; the namespace is ignored when disabled.
    pub fn from_options(enabled: bool, global: Option<String>) -> Self {
        match (enabled, global) {
            (false, _) => Self::Console,
            (true, None) => Self::Local,
            (true, Some(namespace)) => Self::Global { namespace },
        }
    }
}

/// Produces the terminal call for `kind` with `arguments`
pub fn resolve_helper(kind: MacroKind, arguments: Vec<Expr>, config: &HelperConfig) -> Expr {
    let callee = match config {
        HelperConfig::Console => Expr::member(Expr::identifier(CONSOLE), kind.console_method()),
        HelperConfig::Local => Expr::identifier(kind.helper_name()),
        HelperConfig::Global { namespace } => {
            Expr::member(Expr::identifier(namespace.as_str()), kind.helper_name())
        }
    };
    Expr::call(callee, arguments)
}
