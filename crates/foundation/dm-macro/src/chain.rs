//! Short-circuit chains guarding a diagnostic call

use dm_syntax::Expr;

/// Guards and terminal call of one expansion, waiting for the name of the
/// debug flag binding
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionPlan {
    guards: Vec<Expr>,
    terminal: Expr,
}

impl ExpansionPlan {
    /// Creates a plan; `guards` are evaluated in the given order
    pub fn new(guards: Vec<Expr>, terminal: Expr) -> Self {
        Self { guards, terminal }
    }

    /// Guards placed between the flag and the terminal call
    pub fn guards(&self) -> &[Expr] {
        &self.guards
    }

    /// The diagnostic call
    pub fn terminal(&self) -> &Expr {
        &self.terminal
    }

    /// Builds `binding && guard.. && terminal`, folded to the left
    pub fn realize(self, binding: &str) -> Expr {
        let chain = self
            .guards
            .into_iter()
            .fold(Expr::identifier(binding), Expr::and);
        Expr::and(chain, self.terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term() -> Expr {
        Expr::call(Expr::identifier("report"), vec![])
    }

    #[test]
    fn test_left_fold() {
        let plan = ExpansionPlan::new(
            vec![Expr::identifier("g1"), Expr::identifier("g2")],
            term(),
        );
        let expected = Expr::and(
            Expr::and(
                Expr::and(Expr::identifier("DEBUG"), Expr::identifier("g1")),
                Expr::identifier("g2"),
            ),
            term(),
        );
        assert_eq!(plan.realize("DEBUG"), expected);
    }

    #[test]
    fn test_no_guards() {
        let plan = ExpansionPlan::new(Vec::new(), term());
        assert_eq!(
            plan.realize("DEBUG"),
            Expr::and(Expr::identifier("DEBUG"), term())
        );
    }

    #[test]
    fn test_binding_name_is_used_verbatim() {
        let plan = ExpansionPlan::new(vec![Expr::identifier("ready")], term());
        assert_eq!(plan.realize("IS_DEBUG").to_string(), "IS_DEBUG && ready && report()");
    }
}
