//! Constant declarations for debug and feature flags

use crate::error::MacroExpansionError;
use dm_syntax::{Expr, ImportSpecifier, Stmt};
use indexmap::IndexMap;
use tracing::debug;

/// Supported flag names and their configured values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagTable {
    flags: IndexMap<String, i64>,
}

impl FlagTable {
    /// Value configured for `name`
    pub fn get(&self, name: &str) -> Option<i64> {
        self.flags.get(name).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for FlagTable {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self {
            flags: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// `const <name> = <value>;`
pub fn debug_flag(name: &str, value: i64) -> Stmt {
    Stmt::constant(name, Expr::integer(value))
}

/// One constant per imported flag, bound under the specifier's local name
///
/// # Errors
///
/// Returns [`MacroExpansionError::UnsupportedFlag`] for the first specifier
/// whose imported name is not in `table`; no declarations are produced then.
pub fn flag_constants(
    specifiers: &[ImportSpecifier],
    table: &FlagTable,
    source_label: &str,
) -> Result<Vec<Stmt>, MacroExpansionError> {
    specifiers
        .iter()
        .map(|specifier| {
            let value = table.get(&specifier.imported).ok_or_else(|| {
                MacroExpansionError::UnsupportedFlag {
                    name: specifier.imported.clone(),
                    source_label: source_label.to_string(),
                }
            })?;
            debug!(
                flag = %specifier.imported,
                value,
                source = source_label,
                "emitting flag constant"
            );
            Ok(debug_flag(specifier.local_name(), value))
        })
        .collect()
}
