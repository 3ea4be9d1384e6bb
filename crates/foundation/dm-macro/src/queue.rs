//! Expansions collected for one compilation unit

use crate::chain::ExpansionPlan;
use dm_syntax::{CallSite, Expr, ExpressionSites};
use tracing::{debug, trace};

/// A call site together with the plan that will replace it
#[derive(Debug, Clone, PartialEq)]
pub struct PendingExpansion {
    /// Statement to rewrite
    pub site: CallSite,
    /// Replacement, minus the flag binding
    pub plan: ExpansionPlan,
}

/// Append-only list of pending expansions, drained once by
/// [`ExpansionQueue::expand_macros`]
#[derive(Debug, Clone, Default)]
pub struct ExpansionQueue {
    pending: Vec<PendingExpansion>,
}

impl ExpansionQueue {
    /// Creates an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an expansion
    pub fn push(&mut self, site: CallSite, plan: ExpansionPlan) {
        self.pending.push(PendingExpansion { site, plan });
    }

    /// Number of expansions waiting to be applied
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending expansions in collection order
    pub fn iter(&self) -> impl Iterator<Item = &PendingExpansion> {
        self.pending.iter()
    }

    /// Rewrites every collected site, in collection order, to
    /// `(binding && ..guards && terminal)`
    ///
    /// Returns the number of sites rewritten. The queue is empty afterwards,
    /// so a second call does nothing and returns 0.
    pub fn expand_macros<T>(&mut self, tree: &mut T, binding: &str) -> usize
    where
        T: ExpressionSites + ?Sized,
    {
        let count = self.pending.len();
        for PendingExpansion { site, plan } in self.pending.drain(..) {
            let chain = plan.realize(binding);
            trace!(?site, expansion = %chain, "expanding macro");
            tree.replace_with(site, Expr::paren(chain));
        }
        if count > 0 {
            debug!(count, binding, "expanded macros");
        }
        count
    }
}
