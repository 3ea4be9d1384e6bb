//! Macro expansion error types

use crate::helper::MacroKind;
use miette::Diagnostic;
use std::fmt;

/// Required metadata field of a `deprecate` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaField {
    /// Deprecation identifier
    Id,
    /// Removal milestone
    Until,
}

impl fmt::Display for MetaField {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(formatter, "id"),
            Self::Until => write!(formatter, "until"),
        }
    }
}

/// Error type for macro expansion
///
/// Both kinds are authoring mistakes caught while collecting expansions;
/// nothing is queued for the offending call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum MacroExpansionError {
    /// Metadata object of a `deprecate` call lacks a required field
    #[error("{kind}'s meta information requires an \"{field}\" field.")]
    #[diagnostic(
        code(macros::missing_metadata),
        help("add `{field}: \"...\"` to the metadata object passed to `{kind}`")
    )]
    MissingMetadata {
        /// Macro being expanded
        kind: MacroKind,
        /// The missing field
        field: MetaField,
        /// Deprecation id, when it was present
        id: Option<String>,
    },
    /// Imported flag name is absent from the flag table
    #[error("Imported {name} from {source_label} which is not a supported flag.")]
    #[diagnostic(
        code(macros::unsupported_flag),
        help("only flags configured for `{source_label}` can be imported from it")
    )]
    UnsupportedFlag {
        /// Imported specifier name
        name: String,
        /// Module the flag was imported from
        source_label: String,
    },
}
