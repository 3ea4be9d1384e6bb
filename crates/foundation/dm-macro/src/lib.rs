//! Expansion of the `assert`, `warn` and `deprecate` debug macros
//!
//! Expansion runs in two phases per compilation unit:
//!
//! 1. **Collection.** The host calls [`MacroBuilder::assert`],
//!    [`MacroBuilder::warn`] or [`MacroBuilder::deprecate`] once per
//!    recognized call site. Each call resolves the diagnostic call to emit
//!    and appends an [`ExpansionPlan`] to the [`ExpansionQueue`].
//! 2. **Apply.** Once the name the debug flag is bound to is known,
//!    [`ExpansionQueue::expand_macros`] rewrites every collected site to
//!    `(DEBUG && ..guards && diagnostic(..))`.
//!
//! Setting the flag to a falsy constant turns every diagnostic into dead
//! code for a downstream minifier. [`debug_flag`] and [`flag_constants`]
//! produce those constant declarations.

mod builder;
mod chain;
mod constants;
mod deprecation;
mod error;
mod helper;
mod queue;

pub use builder::{AssertGuards, MacroBuilder};
pub use chain::ExpansionPlan;
pub use constants::{FlagTable, debug_flag, flag_constants};
pub use deprecation::{DeprecateArgs, DeprecationMeta, deprecation_literal, format_deprecation};
pub use error::{MacroExpansionError, MetaField};
pub use helper::{CONSOLE, HelperConfig, MacroKind, resolve_helper};
pub use queue::{ExpansionQueue, PendingExpansion};
