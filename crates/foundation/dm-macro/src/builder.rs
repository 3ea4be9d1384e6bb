//! Collection-phase entry points for the diagnostic macros

use crate::chain::ExpansionPlan;
use crate::deprecation::{DeprecateArgs, DeprecationMeta, deprecation_literal};
use crate::error::MacroExpansionError;
use crate::helper::{HelperConfig, MacroKind, resolve_helper};
use crate::queue::ExpansionQueue;
use dm_syntax::{CallSite, Expr};
use tracing::debug;

/// Which `assert` arguments additionally guard the diagnostic call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AssertGuards {
    /// Every argument that is a bare identifier, in argument order
    #[default]
    AllIdentifiers,
    /// The predicate, when it is a bare identifier
    PredicateOnly,
    /// No extra guards
    Disabled,
}

impl AssertGuards {
    /// Picks the guard expressions out of an `assert` argument list
    pub fn select(self, arguments: &[Expr]) -> Vec<Expr> {
        match self {
            Self::AllIdentifiers => arguments
                .iter()
                .filter(|argument| argument.is_identifier())
                .cloned()
                .collect(),
            Self::PredicateOnly => arguments
                .first()
                .filter(|predicate| predicate.is_identifier())
                .cloned()
                .into_iter()
                .collect(),
            Self::Disabled => Vec::new(),
        }
    }
}

/// Turns recognized macro calls into queued expansions
///
/// One builder serves one compilation unit. The recognizers never touch the
/// tree; they append to the [`ExpansionQueue`] passed in, which is applied
/// once the debug flag's binding name is known.
#[derive(Debug, Clone, Default)]
pub struct MacroBuilder {
    helpers: HelperConfig,
    assert_guards: AssertGuards,
}

impl MacroBuilder {
    /// Creates a builder directing diagnostics according to `helpers`
    #[must_use]
    pub fn new(helpers: HelperConfig) -> Self {
        Self {
            helpers,
            assert_guards: AssertGuards::default(),
        }
    }

    /// Overrides the `assert` guard selection
    #[must_use]
    pub fn with_assert_guards(mut self, assert_guards: AssertGuards) -> Self {
        self.assert_guards = assert_guards;
        self
    }

    /// Helper configuration in use
    pub fn helpers(&self) -> &HelperConfig {
        &self.helpers
    }

    /// Queues `assert(predicate, message)` as
    /// `(DEBUG && ..identifiers && console.assert(predicate, message))`
    pub fn assert(&self, queue: &mut ExpansionQueue, site: CallSite, arguments: &[Expr]) {
        let terminal = resolve_helper(MacroKind::Assert, arguments.to_vec(), &self.helpers);
        let guards = self.assert_guards.select(arguments);
        debug!(?site, guards = guards.len(), "queued assert");
        queue.push(site, ExpansionPlan::new(guards, terminal));
    }

    /// Queues `warn(message)` as `(DEBUG && console.warn(message))`
    pub fn warn(&self, queue: &mut ExpansionQueue, site: CallSite, arguments: &[Expr]) {
        let terminal = resolve_helper(MacroKind::Warn, arguments.to_vec(), &self.helpers);
        debug!(?site, "queued warn");
        queue.push(site, ExpansionPlan::new(Vec::new(), terminal));
    }

    /// Queues `deprecate(message, predicate, meta)` as
    /// `(DEBUG && predicate && console.warn("DEPRECATED [id]: .."))`
    ///
    /// # Errors
    ///
    /// Returns [`MacroExpansionError::MissingMetadata`] when the metadata
    /// lacks `id` or `until`; the queue is left untouched.
    pub fn deprecate(
        &self,
        queue: &mut ExpansionQueue,
        site: CallSite,
        arguments: DeprecateArgs<'_>,
    ) -> Result<(), MacroExpansionError> {
        let meta = DeprecationMeta::from_properties(arguments.meta)?;
        let message = deprecation_literal(arguments.message, &meta);
        let terminal = resolve_helper(MacroKind::Deprecate, vec![message], &self.helpers);
        debug!(?site, id = %meta.id, until = %meta.until, "queued deprecate");
        queue.push(
            site,
            ExpansionPlan::new(vec![arguments.predicate.clone()], terminal),
        );
        Ok(())
    }
}
