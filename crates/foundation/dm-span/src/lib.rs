//! Byte spans for statements handed over by the host parser

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A byte offset span in a source file
///
/// Hosts that do not track locations leave spans at their default, which
/// renders as `0..0` and is treated as "unknown" by diagnostics.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize, Display)]
#[display("{start}..{end}")]
pub struct Span {
    /// Inclusive start offset
    pub start: u32,
    /// Exclusive end offset
    pub end: u32,
}

impl Span {
    /// Creates a span covering `start..end`
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Whether the host supplied a location at all
    pub fn is_known(&self) -> bool {
        *self != Self::default()
    }
}
