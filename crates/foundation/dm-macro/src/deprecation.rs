//! Deprecation metadata and message formatting

use crate::error::{MacroExpansionError, MetaField};
use crate::helper::MacroKind;
use dm_syntax::{Expr, Literal, Property};

/// Arguments of a `deprecate(message, predicate, meta)` call, as validated
/// by the host's recognition step
#[derive(Debug, Clone, Copy)]
pub struct DeprecateArgs<'args> {
    /// Text of the message string literal
    pub message: &'args str,
    /// Guard evaluated before reporting
    pub predicate: &'args Expr,
    /// Properties of the metadata object literal
    pub meta: &'args [Property],
}

/// Metadata accompanying a deprecation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationMeta {
    /// Deprecation identifier
    pub id: String,
    /// Version or milestone the deprecated API is removed in
    pub until: String,
    /// Page with migration details
    pub url: Option<String>,
}

impl DeprecationMeta {
    /// Reads `id`, `until` and `url` off an object literal's properties
    ///
    /// Later duplicates win and unknown keys are ignored. Only truthy
    /// literals count as present: `""`, `0`, `false` and `null` are absent,
    /// as is any non-literal value.
    ///
    /// # Errors
    ///
    /// Returns [`MacroExpansionError::MissingMetadata`] when `id` or
    /// `until` is absent.
    pub fn from_properties(properties: &[Property]) -> Result<Self, MacroExpansionError> {
        let mut id = None;
        let mut until = None;
        let mut url = None;

        for property in properties {
            let slot = match property.key.as_str() {
                "id" => &mut id,
                "until" => &mut until,
                "url" => &mut url,
                _ => continue,
            };
            *slot = literal_text(&property.value);
        }

        let id = id.ok_or(MacroExpansionError::MissingMetadata {
            kind: MacroKind::Deprecate,
            field: MetaField::Id,
            id: None,
        })?;
        let until = until.ok_or_else(|| MacroExpansionError::MissingMetadata {
            kind: MacroKind::Deprecate,
            field: MetaField::Until,
            id: Some(id.clone()),
        })?;

        Ok(Self { id, until, url })
    }
}

/// Rendered text of a truthy literal; falsy literals count as absent
fn literal_text(value: &Expr) -> Option<String> {
    let Expr::Literal { value } = value else {
        return None;
    };
    match value {
        Literal::String(text) if !text.is_empty() => Some(text.clone()),
        Literal::Integer(number) if *number != 0 => Some(number.to_string()),
        Literal::Float(number) if *number != 0.0 && !number.is_nan() => Some(number.to_string()),
        Literal::Bool(true) => Some(true.to_string()),
        _ => None,
    }
}

/// Formats the single-line deprecation notice
pub fn format_deprecation(message: &str, meta: &DeprecationMeta) -> String {
    let mut text = format!(
        "DEPRECATED [{}]: {message}. Will be removed in {}.",
        meta.id, meta.until
    );
    if let Some(url) = &meta.url {
        text.push_str(" See ");
        text.push_str(url);
        text.push_str(" for more information.");
    }
    text
}

/// [`format_deprecation`] as a string literal node
pub fn deprecation_literal(message: &str, meta: &DeprecationMeta) -> Expr {
    Expr::string(format_deprecation(message, meta))
}
